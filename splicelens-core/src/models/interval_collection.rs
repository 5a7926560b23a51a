use std::fmt::{self, Display};
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::errors::TrackParseError;
use crate::models::{ScoredInterval, Strand};
use crate::utils::{get_dynamic_reader, is_comment_line, split_tab_fields};

///
/// IntervalCollection struct, an ordered and queryable set of scored
/// intervals, such as a bedGraph/BED6 track of per-base read support.
///
/// Records are kept sorted by `(start, end)`; every constructor sorts.
///
#[derive(Clone, Debug, Default)]
pub struct IntervalCollection {
    pub intervals: Vec<ScoredInterval>,
    pub path: Option<PathBuf>,
}

impl TryFrom<&Path> for IntervalCollection {
    type Error = TrackParseError;

    ///
    /// Create a new [IntervalCollection] from a BED-like scored track.
    ///
    /// Columns are `seqid start end [name score strand]`. Any malformed
    /// line fails the whole file; no partial collection is returned.
    ///
    /// # Arguments:
    /// - value: path to the track on disk (optionally gzipped).
    fn try_from(value: &Path) -> Result<Self, TrackParseError> {
        let reader = get_dynamic_reader(value)?;
        let mut intervals: Vec<ScoredInterval> = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;

            if line.trim().is_empty() || is_comment_line(&line) {
                continue;
            }

            intervals.push(parse_scored_line(&line, line_number)?);
        }

        let mut collection = IntervalCollection {
            intervals,
            path: Some(value.to_owned()),
        };
        collection.sort();

        Ok(collection)
    }
}

impl TryFrom<&str> for IntervalCollection {
    type Error = TrackParseError;

    fn try_from(value: &str) -> Result<Self, TrackParseError> {
        IntervalCollection::try_from(Path::new(value))
    }
}

impl From<Vec<ScoredInterval>> for IntervalCollection {
    fn from(intervals: Vec<ScoredInterval>) -> Self {
        let mut collection = IntervalCollection {
            intervals,
            path: None,
        };
        collection.sort();
        collection
    }
}

impl FromIterator<ScoredInterval> for IntervalCollection {
    fn from_iter<T: IntoIterator<Item = ScoredInterval>>(iter: T) -> Self {
        IntervalCollection::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a IntervalCollection {
    type Item = &'a ScoredInterval;
    type IntoIter = std::slice::Iter<'a, ScoredInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

fn parse_scored_line(line: &str, line_number: usize) -> Result<ScoredInterval, TrackParseError> {
    let parts = split_tab_fields(line);

    if parts.len() < 3 {
        return Err(TrackParseError::FieldCount {
            line: line_number,
            expected: 3,
            found: parts.len(),
        });
    }

    let parse_coordinate = |field: &'static str, value: &str| {
        value
            .parse::<u32>()
            .map_err(|_| TrackParseError::InvalidValue {
                line: line_number,
                field,
                value: value.to_string(),
            })
    };

    let start = parse_coordinate("start", parts[1])?;
    let end = parse_coordinate("end", parts[2])?;

    if start >= end {
        return Err(TrackParseError::InvalidInterval {
            line: line_number,
            start,
            end,
        });
    }

    let name = parts.get(3).copied().unwrap_or(".").to_string();
    let score = match parts.get(4) {
        Some(value) => value
            .parse::<f64>()
            .ok()
            .filter(|score| score.is_finite())
            .ok_or_else(|| TrackParseError::InvalidValue {
                line: line_number,
                field: "score",
                value: value.to_string(),
            })?,
        None => 0.0,
    };
    let strand = parts
        .get(5)
        .and_then(|s| s.chars().next())
        .map(Strand::from_char)
        .unwrap_or_default();

    Ok(ScoredInterval {
        seqid: parts[0].to_string(),
        start,
        end,
        name,
        score,
        strand,
    })
}

impl IntervalCollection {
    ///
    /// Sort by position. Sorting is happening inside the object,
    /// where original order will be overwritten
    ///
    pub fn sort(&mut self) {
        self.intervals
            .sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.end.cmp(&b.end)));
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredInterval> {
        self.intervals.iter()
    }

    ///
    /// Records whose start lies in the inclusive window `[lo, hi]`.
    ///
    pub fn range(&self, lo: u32, hi: u32) -> &[ScoredInterval] {
        if lo > hi {
            return &[];
        }
        let from = self.intervals.partition_point(|r| r.start < lo);
        let to = self.intervals.partition_point(|r| r.start <= hi);
        &self.intervals[from..to]
    }

    ///
    /// Per-base records for every base of `[lo, hi]` covered by a record.
    ///
    /// Unlike [IntervalCollection::range] this uses coverage, not start
    /// position: a multi-base record starting before `lo` still contributes
    /// the bases it covers inside the window. Records are clipped to the
    /// window before exploding.
    ///
    pub fn window(&self, lo: u32, hi: u32) -> IntervalCollection {
        let mut intervals = Vec::new();

        if lo <= hi {
            let to = self.intervals.partition_point(|r| r.start <= hi);
            for record in self.intervals[..to].iter().filter(|r| r.end > lo) {
                let clipped = ScoredInterval {
                    start: record.start.max(lo),
                    end: record.end.min(hi.saturating_add(1)),
                    ..record.clone()
                };
                intervals.extend(clipped.explode());
            }
        }

        let mut collection = IntervalCollection {
            intervals,
            path: self.path.clone(),
        };
        collection.sort();
        collection
    }

    ///
    /// Records starting exactly at `position`.
    ///
    pub fn at(&self, position: u32) -> &[ScoredInterval] {
        self.range(position, position)
    }

    ///
    /// Expand every record into per-base records.
    ///
    pub fn explode(&self) -> IntervalCollection {
        self.intervals
            .iter()
            .flat_map(|interval| interval.explode())
            .collect()
    }

    ///
    /// Smallest start and largest end over all records.
    ///
    pub fn bounds(&self) -> Option<(u32, u32)> {
        let start = self.intervals.first()?.start;
        let end = self.intervals.iter().map(|r| r.end).max()?;
        Some((start, end))
    }
}

impl Display for IntervalCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntervalCollection with {} intervals.", self.len())
    }
}
