//! Per-position reductions over scored interval tracks.
//!
//! Every reduction first expands multi-base intervals into per-base records
//! and groups them by genomic coordinate. An empty collection reduces to an
//! empty result.

use std::collections::BTreeMap;

use log::debug;

use splicelens_core::models::{IntervalCollection, ScoredInterval};

use crate::models::FiveNumberSummary;
use crate::quantiles::{five_number_summary, max_non_outlier};

/// Trait for computing per-base statistics over a scored track.
pub trait PerBaseStatistics {
    /// Scores grouped by covered position, ascending.
    fn scores_by_position(&self) -> BTreeMap<u32, Vec<f64>>;

    /// Mean mode: one per-base record per position scoring the mean of all
    /// scores covering it. Metadata comes from the first record at the position.
    fn mean_per_position(&self) -> IntervalCollection;

    /// Largest non-outlier score at each position.
    fn robust_max_per_position(&self) -> BTreeMap<u32, f64>;

    /// Track-wide upper bound for a shared y-axis: the maximum over all
    /// positions of the per-position [PerBaseStatistics::robust_max_per_position].
    fn robust_axis_max(&self) -> Option<f64> {
        self.robust_max_per_position()
            .into_values()
            .reduce(f64::max)
    }

    /// Five-number summaries of every position holding at least one score.
    fn five_number_summaries(&self) -> Vec<FiveNumberSummary>;
}

impl PerBaseStatistics for IntervalCollection {
    fn scores_by_position(&self) -> BTreeMap<u32, Vec<f64>> {
        let mut by_position: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for interval in self.iter() {
            for position in interval.start..interval.end {
                by_position.entry(position).or_default().push(interval.score);
            }
        }
        by_position
    }

    fn mean_per_position(&self) -> IntervalCollection {
        let mut groups: BTreeMap<u32, (&ScoredInterval, f64, u32)> = BTreeMap::new();
        for interval in self.iter() {
            for position in interval.start..interval.end {
                groups
                    .entry(position)
                    .and_modify(|(_, sum, count)| {
                        *sum += interval.score;
                        *count += 1;
                    })
                    .or_insert((interval, interval.score, 1));
            }
        }

        debug!("mean-aggregated {} records into {} positions", self.len(), groups.len());

        groups
            .into_iter()
            .map(|(position, (first, sum, count))| ScoredInterval {
                seqid: first.seqid.clone(),
                start: position,
                end: position + 1,
                name: first.name.clone(),
                score: sum / count as f64,
                strand: first.strand,
            })
            .collect()
    }

    fn robust_max_per_position(&self) -> BTreeMap<u32, f64> {
        self.scores_by_position()
            .into_iter()
            .filter_map(|(position, scores)| Some((position, max_non_outlier(&scores)?)))
            .collect()
    }

    fn five_number_summaries(&self) -> Vec<FiveNumberSummary> {
        self.scores_by_position()
            .into_iter()
            .filter_map(|(position, scores)| five_number_summary(position, &scores))
            .collect()
    }
}
