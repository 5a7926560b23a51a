use serde::Serialize;

use crate::quantiles::IQR_FENCE_FACTOR;

/// Tukey box-plot statistics for the scores recorded at one position.
///
/// `min <= q1 <= median <= q3 <= max` holds on the raw sample. The adjusted
/// bounds are the most extreme values inside the IQR fences (or the raw
/// bounds when every value is an outlier).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub position: u32,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Values strictly outside `[lower_fence, upper_fence]`, ascending
    pub outliers: Vec<f64>,
    pub adjusted_min: f64,
    pub adjusted_max: f64,
}

impl FiveNumberSummary {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    pub fn lower_fence(&self) -> f64 {
        self.q1 - IQR_FENCE_FACTOR * self.iqr()
    }

    pub fn upper_fence(&self) -> f64 {
        self.q3 + IQR_FENCE_FACTOR * self.iqr()
    }
}
