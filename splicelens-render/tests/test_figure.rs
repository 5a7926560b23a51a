use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rstest::*;

use splicelens_core::models::{
    CountTrack, Exon, IntervalCollection, ScoredInterval, SiteCategory, Strand, Transcript,
    TranscriptModel,
};
use splicelens_render::layout::Rect;
use splicelens_render::zoom::ZoomOrchestrator;
use splicelens_render::{
    DrawCommand, RenderConfig, Scene, SiteTrack, StripAllocator, SvgBackend, render_figure,
};

fn get_test_path(file_name: &str) -> PathBuf {
    std::env::current_dir()
        .unwrap()
        .join("../tests/data")
        .join(file_name)
}

#[fixture]
fn toy_model() -> TranscriptModel {
    TranscriptModel::try_from(get_test_path("toy.gtf").as_path()).unwrap()
}

#[fixture]
fn toy_tracks() -> Vec<SiteTrack> {
    let donor_scores =
        IntervalCollection::try_from(get_test_path("donor_scores.bed").as_path()).unwrap();
    let donor_counts =
        CountTrack::try_from(get_test_path("donor_counts.tsv").as_path()).unwrap();
    let acceptor_counts =
        CountTrack::try_from(get_test_path("acceptor_counts.tsv").as_path()).unwrap();

    vec![
        SiteTrack::new(SiteCategory::Donor, donor_scores).with_counts(donor_counts),
        SiteTrack::from_counts(SiteCategory::Acceptor, acceptor_counts),
    ]
}

fn layer_len(scene: &Scene, name: &str) -> usize {
    scene.layer(name).map(|l| l.commands.len()).unwrap_or(0)
}

fn circles(scene: &Scene, name: &str) -> usize {
    scene
        .layer(name)
        .map(|l| {
            l.commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::Circle { .. }))
                .count()
        })
        .unwrap_or(0)
}

#[rstest]
fn test_toy_figure_layers(toy_model: TranscriptModel, toy_tracks: Vec<SiteTrack>) {
    let scene = render_figure(
        &toy_model,
        &toy_tracks,
        &RenderConfig::default(),
        &StripAllocator::default(),
    )
    .unwrap();

    assert_eq!(
        scene.layer_names(),
        vec![
            "donor_ruler",
            "donor_connectors",
            "donor_panels",
            "donor_logos",
            "acceptor_ruler",
            "acceptor_connectors",
            "acceptor_panels",
            "acceptor_logos",
            "site_annotations",
            "gene_model",
            "summary_bars",
        ]
    );

    // two donors and two acceptors in the toy model
    assert_eq!(layer_len(&scene, "donor_connectors"), 2);
    assert_eq!(layer_len(&scene, "acceptor_connectors"), 2);
    assert_eq!(layer_len(&scene, "site_annotations"), 4);
    assert!(layer_len(&scene, "donor_logos") > 0);
    assert!(layer_len(&scene, "acceptor_logos") > 0);

    // 80 is an outlier at both donor sites
    assert!(circles(&scene, "donor_panels") >= 2);
}

#[rstest]
fn test_toy_donor_axis_is_outlier_robust(toy_model: TranscriptModel, toy_tracks: Vec<SiteTrack>) {
    let config = RenderConfig::default();
    let allocator = StripAllocator::default();
    let orchestrator = ZoomOrchestrator::new(&toy_model, &allocator, &config);
    let donors = &toy_tracks[0];

    let plan = orchestrator.plan(donors, Rect::new(30.0, 400.0, 1340.0, 120.0));
    assert_eq!(plan.sites, vec![200, 500]);
    assert_eq!(plan.y_max, 6.0);

    let panels = orchestrator.detail_panels(&plan, donors, None).unwrap();
    let site = panels[0]
        .boxes
        .iter()
        .find(|b| b.summary.position == 200)
        .unwrap();
    assert_eq!(site.summary.median, 5.5);
    assert_eq!(site.summary.outliers, vec![80.0]);
    assert_eq!(site.summary.adjusted_max, 6.0);
}

#[rstest]
fn test_hidden_outliers_draw_no_markers(toy_model: TranscriptModel, toy_tracks: Vec<SiteTrack>) {
    let config = RenderConfig {
        show_outliers: false,
        show_logos: false,
        ..Default::default()
    };
    let scene = render_figure(&toy_model, &toy_tracks, &config, &StripAllocator::default()).unwrap();

    assert_eq!(circles(&scene, "donor_panels"), 0);
    assert_eq!(circles(&scene, "acceptor_panels"), 0);
    assert_eq!(layer_len(&scene, "donor_logos"), 0);
}

#[rstest]
fn test_single_donor_scenario() {
    // one intron [100, 300): donor 100
    let model = TranscriptModel::from(vec![Transcript::new(
        "T1",
        "chr1",
        Strand::Plus,
        vec![Exon { start: 0, end: 100 }, Exon { start: 300, end: 400 }],
    )]);
    let scores: IntervalCollection = [1.0, 2.0, 2.0, 2.0, 100.0]
        .into_iter()
        .map(|s| ScoredInterval::per_base("chr1", 100, s))
        .collect();
    let track = SiteTrack::new(SiteCategory::Donor, scores);
    let config = RenderConfig {
        zoom_width: 5,
        ..Default::default()
    };
    let allocator = StripAllocator::default();
    let orchestrator = ZoomOrchestrator::new(&model, &allocator, &config);

    let plan = orchestrator.plan(&track, Rect::new(0.0, 0.0, 800.0, 100.0));
    let panels = orchestrator.detail_panels(&plan, &track, None).unwrap();
    let boxes = &panels[0].boxes;

    assert_eq!(boxes.len(), 11);
    for b in boxes {
        if b.summary.position == 100 {
            assert_eq!(b.summary.median, 2.0);
            assert!(b.summary.outliers.contains(&100.0));
            assert_eq!(b.summary.adjusted_max, 2.0);
            // marker clamped to the panel top, whisker at the shared axis max
            assert_eq!(b.whisker_top, 0.0);
        } else {
            assert!((95..=105).contains(&b.summary.position));
            assert_eq!(b.summary.median, 0.0);
            assert_eq!(b.summary.max, 0.0);
        }
    }

    let scene = render_figure(&model, &[track], &config, &allocator).unwrap();
    assert_eq!(circles(&scene, "donor_panels"), 2);
}

#[rstest]
fn test_figure_round_trips_to_svg_file(toy_model: TranscriptModel, toy_tracks: Vec<SiteTrack>) {
    let config = RenderConfig {
        title: Some("toy".to_string()),
        ..Default::default()
    };
    let scene = render_figure(&toy_model, &toy_tracks, &config, &StripAllocator::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("toy.svg");
    SvgBackend::default().save(&scene, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    for layer in scene.layer_names() {
        assert!(written.contains(&format!("id=\"{layer}\"")));
    }
    assert_eq!(scene.layer_names()[0], "title");
}
