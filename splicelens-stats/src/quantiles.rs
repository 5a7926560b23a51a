//! Quantiles and IQR-fence outlier detection over unordered score samples.
//!
//! Quantiles use linear interpolation between order statistics at rank
//! `p * (n - 1)` (R type 7), so results are reproducible across tools.

use crate::models::FiveNumberSummary;

/// Multiplier applied to the IQR to place the outlier fences.
pub const IQR_FENCE_FACTOR: f64 = 1.5;

/// Sort scores ascending; NaN sorts last.
pub fn sorted_scores(scores: &[f64]) -> Vec<f64> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

///
/// Linear-interpolation quantile of an ascending slice.
///
/// Returns `None` for an empty slice.
///
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let rank = p.clamp(0.0, 1.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (lower + 1).min(n - 1);
    let fraction = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

///
/// Compute the five-number summary and outlier set for the scores at one
/// position. An empty sample has no summary.
///
pub fn five_number_summary(position: u32, scores: &[f64]) -> Option<FiveNumberSummary> {
    let sorted = sorted_scores(scores);

    let min = *sorted.first()?;
    let max = *sorted.last()?;
    let q1 = quantile_sorted(&sorted, 0.25)?;
    let median = quantile_sorted(&sorted, 0.5)?;
    let q3 = quantile_sorted(&sorted, 0.75)?;

    let iqr = q3 - q1;
    let lower_fence = q1 - IQR_FENCE_FACTOR * iqr;
    let upper_fence = q3 + IQR_FENCE_FACTOR * iqr;

    let (inside, outliers): (Vec<f64>, Vec<f64>) = sorted
        .iter()
        .copied()
        .partition(|&x| x >= lower_fence && x <= upper_fence);

    // all values outside the fences: fall back to the raw bounds
    let adjusted_min = inside.first().copied().unwrap_or(min);
    let adjusted_max = inside.last().copied().unwrap_or(max);

    Some(FiveNumberSummary {
        position,
        min,
        q1,
        median,
        q3,
        max,
        outliers,
        adjusted_min,
        adjusted_max,
    })
}

///
/// Largest value not above the upper IQR fence. The lower fence is ignored.
///
/// Used for axis scaling only: one extreme read count should not flatten
/// every other box in a panel.
///
pub fn max_non_outlier(scores: &[f64]) -> Option<f64> {
    let sorted = sorted_scores(scores);
    let q1 = quantile_sorted(&sorted, 0.25)?;
    let q3 = quantile_sorted(&sorted, 0.75)?;
    let upper_fence = q3 + IQR_FENCE_FACTOR * (q3 - q1);

    sorted
        .iter()
        .rev()
        .copied()
        .find(|&x| x <= upper_fence)
        .or_else(|| sorted.last().copied())
}
