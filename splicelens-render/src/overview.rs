//! Genome-wide overview rows: gene model lanes, mean-mode summary bars,
//! coordinate rulers and dashed site annotations.

use log::debug;

use splicelens_core::models::{IntervalCollection, TranscriptModel};
use splicelens_stats::PerBaseStatistics;

use crate::layout::Rect;
use crate::primitives::{DrawCommand, Style, TextAnchor};
use crate::scale::LinearScale;

const EXON_COLOR: &str = "#4a6fa5";
const INTRON_COLOR: &str = "#555555";
const FRAME_COLOR: &str = "#999999";
const LABEL_SIZE: f64 = 10.0;

/// Approximate number of labelled ticks on a ruler.
pub const TARGET_TICKS: usize = 8;

/// Outline of a panel.
pub fn panel_frame(rect: &Rect) -> DrawCommand {
    DrawCommand::Rect {
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
        style: Style::stroked(FRAME_COLOR, 1.0).with_fill("none"),
    }
}

///
/// One lane per transcript: a thin intron line across the transcript span
/// with exon boxes on top and the transcript id at the lane's left edge.
///
pub fn render_gene_model(
    model: &TranscriptModel,
    scale: &LinearScale,
    band: &Rect,
) -> Vec<DrawCommand> {
    let mut commands = vec![panel_frame(band)];
    let lanes = band.split_rows(model.transcripts.len());

    for (transcript, lane) in model.transcripts.iter().zip(lanes) {
        let mid = lane.y + lane.height / 2.0;
        let exon_height = (lane.height * 0.6).max(1.0);

        commands.push(DrawCommand::line(
            scale.map(transcript.start() as f64),
            mid,
            scale.map(transcript.end() as f64),
            mid,
            Style::stroked(INTRON_COLOR, 1.0),
        ));

        for exon in &transcript.exons {
            let x = scale.map(exon.start as f64);
            commands.push(DrawCommand::Rect {
                x,
                y: mid - exon_height / 2.0,
                width: (scale.map(exon.end as f64) - x).max(1.0),
                height: exon_height,
                style: Style::filled(EXON_COLOR),
            });
        }

        commands.push(DrawCommand::text(
            lane.x + 2.0,
            lane.y + LABEL_SIZE,
            format!("{} ({})", transcript.id, transcript.strand.as_char()),
            LABEL_SIZE,
            TextAnchor::Start,
        ));
    }

    commands
}

///
/// Mean-mode aggregation of a track drawn as one bar per covered position,
/// heights relative to the largest mean.
///
pub fn render_summary_bars(
    track: &IntervalCollection,
    scale: &LinearScale,
    band: &Rect,
    label: &str,
    color: &str,
) -> Vec<DrawCommand> {
    let mut commands = vec![panel_frame(band)];
    let means = track.mean_per_position();

    let y_max = means
        .iter()
        .map(|r| r.score)
        .reduce(f64::max)
        .filter(|m| *m > 0.0)
        .unwrap_or(1.0);
    let y_scale = LinearScale::new((0.0, y_max), (band.bottom(), band.y));
    let bar_width = scale.unit_width().max(1.0);

    debug!("{}: {} summary bars, max mean {:.2}", label, means.len(), y_max);

    for record in means.iter() {
        let top = y_scale.clamp_pixel(y_scale.map(record.score));
        commands.push(DrawCommand::Rect {
            x: scale.map(record.start as f64),
            y: top,
            width: bar_width,
            height: band.bottom() - top,
            style: Style::filled(color),
        });
    }

    commands.push(DrawCommand::text(
        band.x + 2.0,
        band.y + LABEL_SIZE,
        format!("{label} (mean, max {y_max:.1})"),
        LABEL_SIZE,
        TextAnchor::Start,
    ));

    commands
}

/// Tick spacing of 1, 2 or 5 times a power of ten giving about `target` ticks.
pub fn tick_step(span: f64, target: usize) -> f64 {
    if !(span > 0.0) || target == 0 {
        return 1.0;
    }
    let raw = span / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);
    step.max(1.0)
}

/// Horizontal axis along the bottom of `band` with labelled ticks.
pub fn render_ruler(scale: &LinearScale, band: &Rect) -> Vec<DrawCommand> {
    let axis_style = Style::stroked(INTRON_COLOR, 1.0);
    let y = band.bottom();
    let mut commands = vec![DrawCommand::line(
        band.x,
        y,
        band.right(),
        y,
        axis_style.clone(),
    )];

    let (lo, hi) = scale.domain;
    let step = tick_step(hi - lo, TARGET_TICKS);
    let tick_len = (band.height / 3.0).min(6.0);

    let mut tick = (lo / step).ceil() * step;
    while tick <= hi {
        let x = scale.map(tick);
        commands.push(DrawCommand::line(x, y, x, y - tick_len, axis_style.clone()));
        commands.push(DrawCommand::text(
            x,
            y - tick_len - 1.0,
            format!("{}", tick as u64),
            LABEL_SIZE * 0.8,
            TextAnchor::Middle,
        ));
        tick += step;
    }

    commands
}

/// Dashed vertical line through `[top, bottom]` at every site's midpoint.
pub fn render_site_annotations(
    sites: impl IntoIterator<Item = u32>,
    scale: &LinearScale,
    top: f64,
    bottom: f64,
    color: &str,
) -> Vec<DrawCommand> {
    sites
        .into_iter()
        .map(|site| {
            let x = scale.map(site as f64 + 0.5);
            DrawCommand::line(
                x,
                top,
                x,
                bottom,
                Style::stroked(color, 1.0).with_dash("4,3").with_opacity(0.8),
            )
        })
        .collect()
}
