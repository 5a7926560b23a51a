//! Per-position statistics for per-base read-support tracks.
//!
//! This crate provides:
//!
//! - Linear-interpolation quantiles and Tukey five-number summaries with IQR outliers
//! - Mean-per-position aggregation and the outlier-robust axis maximum of a track
//! - Gap filling of a window so that every base is represented
//!
//! # Example
//!
//! ```no_run
//! use splicelens_core::models::CountTrack;
//! use splicelens_stats::PerBaseStatistics;
//!
//! let counts = CountTrack::try_from("donor_counts.tsv").unwrap();
//! let scores = counts.to_scored_intervals();
//!
//! let overview = scores.mean_per_position();
//! let y_max = scores.robust_axis_max();
//! ```

pub mod aggregate;
pub mod errors;
pub mod gap_fill;
pub mod models;
pub mod quantiles;

// re-exports
pub use aggregate::PerBaseStatistics;
pub use gap_fill::{PlaceholderFields, fill_gaps};
pub use models::FiveNumberSummary;
