use log::debug;

use splicelens_core::models::{IntervalCollection, ScoredInterval, Strand};

use crate::errors::SpliceLensStatsError;

pub const PLACEHOLDER_SEQID: &str = "placeholder";
pub const PLACEHOLDER_NAME: &str = "placeholder";

/// Field overrides for synthesized placeholder records. Unset fields take
/// the defaults: score 0, unknown strand, sentinel seqid and name.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderFields {
    pub seqid: Option<String>,
    pub name: Option<String>,
    pub score: Option<f64>,
    pub strand: Option<Strand>,
}

impl PlaceholderFields {
    pub fn with_seqid(seqid: &str) -> PlaceholderFields {
        PlaceholderFields {
            seqid: Some(seqid.to_string()),
            ..Default::default()
        }
    }

    fn record_at(&self, position: u32) -> ScoredInterval {
        ScoredInterval {
            seqid: self
                .seqid
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_SEQID.to_string()),
            start: position,
            end: position + 1,
            name: self
                .name
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_NAME.to_string()),
            score: self.score.unwrap_or(0.0),
            strand: self.strand.unwrap_or(Strand::Unknown),
        }
    }
}

///
/// Produce a dense per-base series over the inclusive window
/// `[start_pos, end_pos]`.
///
/// Every covered position keeps all of its records in per-base form, so a
/// multi-base record contributes to each base it spans. Each uncovered
/// position gets exactly one placeholder record, so the result never shows
/// a gap where "no data" could be misread as "zero reads".
///
/// # Arguments
/// - collection: source records, single- or multi-base
/// - start_pos: first position of the window
/// - end_pos: last position of the window (inclusive)
/// - placeholder: overrides for synthesized records
pub fn fill_gaps(
    collection: &IntervalCollection,
    start_pos: u32,
    end_pos: u32,
    placeholder: &PlaceholderFields,
) -> Result<IntervalCollection, SpliceLensStatsError> {
    if start_pos > end_pos {
        return Err(SpliceLensStatsError::InvalidRange {
            start: start_pos,
            end: end_pos,
        });
    }

    let covered = collection.window(start_pos, end_pos);
    let mut filled: Vec<ScoredInterval> = Vec::with_capacity(covered.len());
    let mut synthesized = 0usize;

    for position in start_pos..=end_pos {
        let present = covered.at(position);
        if present.is_empty() {
            filled.push(placeholder.record_at(position));
            synthesized += 1;
        } else {
            filled.extend(present.iter().cloned());
        }
    }

    debug!(
        "gap-filled [{}, {}]: {} placeholder records",
        start_pos, end_pos, synthesized
    );

    Ok(IntervalCollection::from(filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::collections::BTreeSet;

    use crate::aggregate::PerBaseStatistics;

    #[fixture]
    fn sparse() -> IntervalCollection {
        IntervalCollection::from(vec![
            ScoredInterval::per_base("chr1", 3, 5.0),
            ScoredInterval::per_base("chr1", 3, 7.0),
            ScoredInterval::per_base("chr1", 6, 1.0),
            ScoredInterval::per_base("chr1", 40, 1.0),
        ])
    }

    #[rstest]
    #[case(0, 9)]
    #[case(3, 3)]
    #[case(4, 5)]
    #[case(0, 50)]
    fn test_every_position_is_represented(
        sparse: IntervalCollection,
        #[case] start: u32,
        #[case] end: u32,
    ) {
        let filled = fill_gaps(&sparse, start, end, &PlaceholderFields::default()).unwrap();

        let positions: BTreeSet<u32> = filled.iter().map(|r| r.start).collect();
        assert_eq!(positions, (start..=end).collect::<BTreeSet<u32>>());

        // original records inside the window survive unchanged
        for record in sparse.range(start, end) {
            assert!(filled.iter().any(|r| r == record));
        }
    }

    #[rstest]
    fn test_multi_record_positions_are_preserved(sparse: IntervalCollection) {
        let filled = fill_gaps(&sparse, 2, 4, &PlaceholderFields::default()).unwrap();
        assert_eq!(filled.len(), 4);
        let at_three: Vec<f64> = filled.at(3).iter().map(|r| r.score).collect();
        assert_eq!(at_three, vec![5.0, 7.0]);
    }

    #[rstest]
    fn test_multi_base_record_covers_its_span() {
        let source = IntervalCollection::from(vec![ScoredInterval {
            seqid: "chr1".to_string(),
            start: 3,
            end: 6,
            name: "x".to_string(),
            score: 9.0,
            strand: Strand::Plus,
        }]);

        let filled = fill_gaps(&source, 2, 5, &PlaceholderFields::default()).unwrap();
        let by_position = filled.scores_by_position();

        assert_eq!(by_position[&2], vec![0.0]);
        assert_eq!(by_position[&3], vec![9.0]);
        assert_eq!(by_position[&4], vec![9.0]);
        assert_eq!(by_position[&5], vec![9.0]);
    }

    #[rstest]
    fn test_record_starting_before_window_is_kept() {
        let source = IntervalCollection::from(vec![ScoredInterval {
            seqid: "chr1".to_string(),
            start: 1,
            end: 5,
            name: "x".to_string(),
            score: 4.0,
            strand: Strand::Minus,
        }]);

        let filled = fill_gaps(&source, 3, 6, &PlaceholderFields::default()).unwrap();
        let scores: Vec<(u32, f64)> = filled.iter().map(|r| (r.start, r.score)).collect();

        assert_eq!(scores, vec![(3, 4.0), (4, 4.0), (5, 0.0), (6, 0.0)]);
    }

    #[rstest]
    fn test_placeholder_defaults(sparse: IntervalCollection) {
        let filled = fill_gaps(&sparse, 4, 4, &PlaceholderFields::default()).unwrap();
        let placeholder = &filled.intervals[0];
        assert_eq!(placeholder.score, 0.0);
        assert_eq!(placeholder.strand, Strand::Unknown);
        assert_eq!(placeholder.seqid, PLACEHOLDER_SEQID);
        assert_eq!(placeholder.name, PLACEHOLDER_NAME);
        assert!(placeholder.is_per_base());
    }

    #[rstest]
    fn test_placeholder_overrides(sparse: IntervalCollection) {
        let overrides = PlaceholderFields {
            seqid: Some("NC_045512".to_string()),
            strand: Some(Strand::Plus),
            ..Default::default()
        };
        let filled = fill_gaps(&sparse, 4, 4, &overrides).unwrap();
        assert_eq!(filled.intervals[0].seqid, "NC_045512");
        assert_eq!(filled.intervals[0].strand, Strand::Plus);
        assert_eq!(filled.intervals[0].name, PLACEHOLDER_NAME);
        assert_eq!(filled.intervals[0].score, 0.0);
    }

    #[rstest]
    fn test_inverted_window_is_rejected(sparse: IntervalCollection) {
        assert_eq!(
            fill_gaps(&sparse, 9, 2, &PlaceholderFields::default()).unwrap_err(),
            SpliceLensStatsError::InvalidRange { start: 9, end: 2 }
        );
    }

    #[rstest]
    fn test_empty_source_yields_only_placeholders() {
        let filled = fill_gaps(
            &IntervalCollection::default(),
            95,
            105,
            &PlaceholderFields::default(),
        )
        .unwrap();
        assert_eq!(filled.len(), 11);
        assert!(filled.iter().all(|r| r.score == 0.0));
    }
}
