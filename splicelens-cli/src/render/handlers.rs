use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{info, warn};

use splicelens_core::models::{CountTrack, IntervalCollection, SiteCategory, TranscriptModel};
use splicelens_render::{RenderConfig, SiteTrack, StripAllocator, SvgBackend, render_figure};

///
/// Scores from a BED file when given, otherwise the read depth of the
/// count table. `None` when neither input is present.
///
fn load_site_track(
    category: SiteCategory,
    counts_path: Option<&String>,
    scores_path: Option<&String>,
) -> Result<Option<SiteTrack>> {
    let counts = counts_path
        .map(|p| {
            CountTrack::try_from(p.as_str())
                .with_context(|| format!("Failed to load {} counts: {}", category.label(), p))
        })
        .transpose()?;

    let scores = scores_path
        .map(|p| {
            IntervalCollection::try_from(p.as_str())
                .with_context(|| format!("Failed to load {} scores: {}", category.label(), p))
        })
        .transpose()?;

    let track = match (scores, counts) {
        (Some(scores), Some(counts)) => Some(SiteTrack::new(category, scores).with_counts(counts)),
        (Some(scores), None) => Some(SiteTrack::new(category, scores)),
        (None, Some(counts)) => Some(SiteTrack::from_counts(category, counts)),
        (None, None) => None,
    };

    Ok(track)
}

fn build_config(matches: &ArgMatches) -> Result<RenderConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(p) => RenderConfig::try_from(Path::new(p))
            .with_context(|| format!("Failed to load render config: {}", p))?,
        None => RenderConfig::default(),
    };

    if let Some(zoom) = matches.get_one::<String>("zoom-width") {
        config.zoom_width = zoom
            .parse()
            .context("--zoom-width must be a non-negative integer")?;
    }
    if matches.get_flag("no-outliers") {
        config.show_outliers = false;
    }
    if matches.get_flag("no-logos") {
        config.show_logos = false;
    }
    if let Some(title) = matches.get_one::<String>("title") {
        config.title = Some(title.clone());
    }

    config.validate().context("Invalid render settings")?;
    Ok(config)
}

pub fn run_render(matches: &ArgMatches) -> Result<()> {
    let gtf_path = matches
        .get_one::<String>("gtf")
        .expect("--gtf is required");
    let output_path = matches
        .get_one::<String>("output")
        .expect("--output is required");

    let config = build_config(matches)?;

    let mut model = TranscriptModel::try_from(gtf_path.as_str())
        .with_context(|| format!("Failed to load transcript model: {}", gtf_path))?;
    if let Some(length) = matches.get_one::<String>("genome-length") {
        let length: u32 = length
            .parse()
            .context("--genome-length must be a positive integer")?;
        model = model.with_genome_length(length);
    }

    let tracks: Vec<SiteTrack> = [
        load_site_track(
            SiteCategory::Donor,
            matches.get_one::<String>("donor-counts"),
            matches.get_one::<String>("donor-scores"),
        )?,
        load_site_track(
            SiteCategory::Acceptor,
            matches.get_one::<String>("acceptor-counts"),
            matches.get_one::<String>("acceptor-scores"),
        )?,
    ]
    .into_iter()
    .flatten()
    .collect();

    if tracks.is_empty() {
        warn!("No donor or acceptor input given, rendering the gene model only");
    }

    let allocator = StripAllocator {
        gap: config.slot_gap,
    };
    let scene = render_figure(&model, &tracks, &config, &allocator)
        .context("Failed to lay out figure")?;

    SvgBackend::default()
        .save(&scene, output_path)
        .with_context(|| format!("Failed to write SVG: {}", output_path))?;
    info!("Figure written to {}", output_path);

    Ok(())
}
