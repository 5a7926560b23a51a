//! Sequence logo: per-position nucleotide frequencies drawn as stacked glyphs.

use splicelens_core::models::nucleotide_counts::merge_counts_by_position;
use splicelens_core::models::{Nucleotide, NucleotideCounts};

use crate::layout::Rect;
use crate::primitives::{DrawCommand, Style};
use crate::scale::LinearScale;

pub fn nucleotide_color(nucleotide: Nucleotide) -> &'static str {
    match nucleotide {
        Nucleotide::A => "#109648",
        Nucleotide::C => "#255c99",
        Nucleotide::G => "#f7b32b",
        Nucleotide::T => "#d62839",
        Nucleotide::N => "#8a8a8a",
    }
}

///
/// Glyph heights for one position, in stacking order. Categories with a
/// zero count are left out; a position without reads has no glyphs.
///
pub fn glyph_heights(counts: &NucleotideCounts, panel_height: f64) -> Vec<(Nucleotide, f64)> {
    let total = counts.total();
    if total == 0 {
        return Vec::new();
    }

    Nucleotide::ORDER
        .iter()
        .filter_map(|&nt| {
            let count = counts.get(nt);
            (count > 0).then(|| (nt, count as f64 / total as f64 * panel_height))
        })
        .collect()
}

///
/// Stack glyphs bottom-up in `A C G T N` order for every position present.
///
/// Rows sharing a position are summed first. The x range is split into one
/// equal band per distinct position, in position order, so a sparse window
/// still fills the panel edge to edge without overlap.
///
pub fn stack_glyphs(
    counts: &[NucleotideCounts],
    x_scale: &LinearScale,
    panel: &Rect,
) -> Vec<DrawCommand> {
    let merged = merge_counts_by_position(counts);
    if merged.is_empty() {
        return Vec::new();
    }

    let slot_width = x_scale.range_width() / merged.len() as f64;
    let left = x_scale.range.0.min(x_scale.range.1);
    let mut commands = Vec::new();

    for (band, position) in merged.iter().enumerate() {
        let x = left + band as f64 * slot_width;
        let mut consumed = 0.0;

        for (nucleotide, height) in glyph_heights(position, panel.height) {
            consumed += height;
            commands.push(DrawCommand::Glyph {
                letter: nucleotide.as_char(),
                x,
                y: panel.bottom() - consumed,
                width: slot_width,
                height,
                style: Style::filled(nucleotide_color(nucleotide)),
            });
        }
    }

    commands
}
