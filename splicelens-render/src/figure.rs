use log::info;

use splicelens_core::models::{SiteCategory, TranscriptModel};

use crate::config::RenderConfig;
use crate::errors::RenderError;
use crate::layout::{PanelAllocator, PanelGrid, Rect};
use crate::overview::{
    render_gene_model, render_ruler, render_site_annotations, render_summary_bars,
};
use crate::primitives::{DrawCommand, Layer, Scene, TextAnchor};
use crate::scale::LinearScale;
use crate::zoom::{SiteTrack, ZoomBands, ZoomOrchestrator, ZoomPlan};

pub const GENE_MODEL_LAYER: &str = "gene_model";
pub const SUMMARY_BARS_LAYER: &str = "summary_bars";
pub const SITE_ANNOTATIONS_LAYER: &str = "site_annotations";
pub const TITLE_LAYER: &str = "title";

pub fn category_color(category: SiteCategory) -> &'static str {
    match category {
        SiteCategory::Donor => "#1f77b4",
        SiteCategory::Acceptor => "#d62728",
    }
}

/// Rows owned by one site track's zoom strip.
struct StripRows {
    ruler: Rect,
    bands: ZoomBands,
}

///
/// Grid rows top to bottom: gene model, summary bars, then for every track a
/// ruler, connector band, box strip and (when logos are drawn) logo strip.
///
fn figure_rows(tracks: &[SiteTrack], config: &RenderConfig) -> (Rect, Rect, Vec<StripRows>) {
    let r = &config.row_ratios;
    let summary = if tracks.is_empty() { 0.0 } else { r.summary_bars };

    let mut ratios = vec![r.gene_model, summary];
    for track in tracks {
        let logo = if config.show_logos && track.counts.is_some() {
            r.logo_strip
        } else {
            0.0
        };
        ratios.extend([r.ruler, r.connector, r.box_strip, logo]);
    }

    let rows = PanelGrid::rows(config.width, config.height, config.margin, &ratios);
    let strips = rows[2..]
        .chunks(4)
        .map(|chunk| StripRows {
            ruler: chunk[0],
            bands: ZoomBands {
                connector: chunk[1],
                boxes: chunk[2],
                logos: (chunk[3].height > 0.0).then_some(chunk[3]),
            },
        })
        .collect();

    (rows[0], rows[1], strips)
}

///
/// Build the complete figure for a transcript model and its site tracks.
///
/// Every call produces a fresh [Scene]. Shared axes of all tracks are
/// computed before any panel is drawn; the gene-model and summary-bar layers
/// end up above the site annotations drawn last.
///
/// # Arguments
/// - model: transcripts; its genome length is the overview coordinate space
/// - tracks: one per site category to zoom into, drawn in the given order
/// - config: figure geometry and toggles
/// - allocator: places the detail panels of each zoom strip
pub fn render_figure<A: PanelAllocator + ?Sized>(
    model: &TranscriptModel,
    tracks: &[SiteTrack],
    config: &RenderConfig,
    allocator: &A,
) -> Result<Scene, RenderError> {
    config.validate()?;

    let genome_length = model.genome_length();
    if genome_length == 0 {
        return Err(RenderError::EmptyGenome);
    }

    let (gene_band, summary_band, strips) = figure_rows(tracks, config);
    let overview = LinearScale::new(
        (0.0, genome_length as f64),
        (gene_band.x, gene_band.right()),
    );
    let orchestrator = ZoomOrchestrator::new(model, allocator, config);

    // phase 1: slots and shared axes of every track
    let plans: Vec<ZoomPlan> = tracks
        .iter()
        .zip(&strips)
        .map(|(track, rows)| orchestrator.plan(track, rows.bands.boxes))
        .collect();

    // phase 2: draw
    let mut scene = Scene::new(config.width, config.height);

    if let Some(title) = &config.title {
        let mut layer = Layer::new(TITLE_LAYER);
        layer.push(DrawCommand::text(
            config.width / 2.0,
            config.margin * 0.7,
            title.as_str(),
            14.0,
            TextAnchor::Middle,
        ));
        scene.push(layer);
    }

    let mut gene_layer = Layer::new(GENE_MODEL_LAYER);
    gene_layer.extend(render_gene_model(model, &overview, &gene_band));
    scene.push(gene_layer);

    let mut summary_layer = Layer::new(SUMMARY_BARS_LAYER);
    for (track, band) in tracks.iter().zip(summary_band.split_rows(tracks.len())) {
        summary_layer.extend(render_summary_bars(
            &track.scores,
            &overview,
            &band,
            track.label(),
            category_color(track.category),
        ));
    }
    scene.push(summary_layer);

    for ((track, rows), plan) in tracks.iter().zip(&strips).zip(&plans) {
        let label = track.label();
        let drawn = orchestrator.draw(plan, track, &rows.bands)?;

        let mut ruler = Layer::new(&format!("{label}_ruler"));
        ruler.extend(render_ruler(&overview, &rows.ruler));

        let mut connectors = Layer::new(&format!("{label}_connectors"));
        connectors.extend(drawn.connectors);

        let mut panels = Layer::new(&format!("{label}_panels"));
        panels.extend(drawn.panels);

        let mut logos = Layer::new(&format!("{label}_logos"));
        logos.extend(drawn.logos);

        for layer in [ruler, connectors, panels, logos] {
            scene.push(layer);
        }
    }

    let mut annotations = Layer::new(SITE_ANNOTATIONS_LAYER);
    for category in [SiteCategory::Donor, SiteCategory::Acceptor] {
        annotations.extend(render_site_annotations(
            model.sites(category),
            &overview,
            gene_band.y,
            summary_band.bottom(),
            category_color(category),
        ));
    }
    scene.push(annotations);

    scene.promote(GENE_MODEL_LAYER);
    scene.promote(SUMMARY_BARS_LAYER);

    info!(
        "rendered {} transcripts and {} site tracks into {} layers ({} commands)",
        model.transcripts.len(),
        tracks.len(),
        scene.layers.len(),
        scene.command_count()
    );

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use splicelens_core::models::{Exon, IntervalCollection, Strand, Transcript};

    use crate::layout::StripAllocator;

    fn model() -> TranscriptModel {
        TranscriptModel::from(vec![Transcript::new(
            "T1",
            "chr1",
            Strand::Plus,
            vec![Exon { start: 0, end: 100 }, Exon { start: 200, end: 300 }],
        )])
    }

    #[rstest]
    fn test_rows_without_counts_have_no_logo_band() {
        let tracks = vec![SiteTrack::new(SiteCategory::Donor, IntervalCollection::default())];
        let (gene, summary, strips) = figure_rows(&tracks, &RenderConfig::default());

        assert_eq!(strips.len(), 1);
        assert!(strips[0].bands.logos.is_none());
        assert!(gene.bottom() <= summary.y + 1e-9);
        assert!(summary.bottom() <= strips[0].ruler.y + 1e-9);
    }

    #[rstest]
    fn test_overview_layers_end_on_top() {
        let tracks = vec![SiteTrack::new(SiteCategory::Acceptor, IntervalCollection::default())];
        let config = RenderConfig::default();
        let scene = render_figure(&model(), &tracks, &config, &StripAllocator::default()).unwrap();

        assert_eq!(
            scene.layer_names(),
            vec![
                "acceptor_ruler",
                "acceptor_connectors",
                "acceptor_panels",
                "acceptor_logos",
                "site_annotations",
                "gene_model",
                "summary_bars",
            ]
        );
    }

    #[rstest]
    fn test_empty_genome_is_rejected() {
        let result = render_figure(
            &TranscriptModel::default(),
            &[],
            &RenderConfig::default(),
            &StripAllocator::default(),
        );
        assert!(matches!(result, Err(RenderError::EmptyGenome)));
    }

    #[rstest]
    fn test_invalid_config_is_rejected() {
        let config = RenderConfig {
            width: 0.0,
            ..Default::default()
        };
        let result = render_figure(&model(), &[], &config, &StripAllocator::default());
        assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
    }
}
