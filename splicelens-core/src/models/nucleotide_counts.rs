use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::TrackParseError;
use crate::models::{IntervalCollection, ScoredInterval, Strand};
use crate::utils::{get_dynamic_reader, split_tab_fields};

/// Number of columns of a count table: `seqid position A C G T N`.
pub const COUNT_TABLE_FIELDS: usize = 7;

/// Nucleotide categories in their fixed stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
    N,
}

impl Nucleotide {
    pub const ORDER: [Nucleotide; 5] = [
        Nucleotide::A,
        Nucleotide::C,
        Nucleotide::G,
        Nucleotide::T,
        Nucleotide::N,
    ];

    pub fn as_char(&self) -> char {
        match self {
            Nucleotide::A => 'A',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
            Nucleotide::T => 'T',
            Nucleotide::N => 'N',
        }
    }
}

/// Per-base read counts for each nucleotide at a single position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NucleotideCounts {
    pub seqid: String,
    pub position: u32,
    pub a: u32,
    pub c: u32,
    pub g: u32,
    pub t: u32,
    pub n: u32,
}

impl NucleotideCounts {
    pub fn get(&self, nucleotide: Nucleotide) -> u32 {
        match nucleotide {
            Nucleotide::A => self.a,
            Nucleotide::C => self.c,
            Nucleotide::G => self.g,
            Nucleotide::T => self.t,
            Nucleotide::N => self.n,
        }
    }

    pub fn total(&self) -> u64 {
        Nucleotide::ORDER
            .iter()
            .map(|&nt| self.get(nt) as u64)
            .sum()
    }

    /// Add the counts of another record at the same position, saturating at `u32::MAX`.
    pub fn accumulate(&mut self, other: &NucleotideCounts) {
        self.a = self.a.saturating_add(other.a);
        self.c = self.c.saturating_add(other.c);
        self.g = self.g.saturating_add(other.g);
        self.t = self.t.saturating_add(other.t);
        self.n = self.n.saturating_add(other.n);
    }
}

///
/// A per-base nucleotide count table as read from a 7-column TSV.
///
#[derive(Debug, Clone, Default)]
pub struct CountTrack {
    pub records: Vec<NucleotideCounts>,
    pub header: Vec<String>,
    pub path: Option<PathBuf>,
}

impl TryFrom<&Path> for CountTrack {
    type Error = TrackParseError;

    ///
    /// Read a count table. The first non-empty line is the mandatory header;
    /// every following row must have exactly seven fields with integer
    /// position and counts, otherwise the whole file is rejected.
    ///
    fn try_from(value: &Path) -> Result<Self, TrackParseError> {
        let reader = get_dynamic_reader(value)?;

        let mut header: Option<Vec<String>> = None;
        let mut records: Vec<NucleotideCounts> = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;

            if line.trim().is_empty() {
                continue;
            }

            let fields = split_tab_fields(&line);
            if fields.len() != COUNT_TABLE_FIELDS {
                return Err(TrackParseError::FieldCount {
                    line: line_number,
                    expected: COUNT_TABLE_FIELDS,
                    found: fields.len(),
                });
            }

            match header {
                None => {
                    if fields[1].parse::<u32>().is_ok() {
                        return Err(TrackParseError::MissingHeader(
                            value.display().to_string(),
                        ));
                    }
                    header = Some(fields.iter().map(|s| s.to_string()).collect());
                }
                Some(_) => records.push(parse_count_row(&fields, line_number)?),
            }
        }

        let header =
            header.ok_or_else(|| TrackParseError::MissingHeader(value.display().to_string()))?;

        let mut track = CountTrack {
            records,
            header,
            path: Some(value.to_owned()),
        };
        track.sort();

        Ok(track)
    }
}

impl TryFrom<&str> for CountTrack {
    type Error = TrackParseError;

    fn try_from(value: &str) -> Result<Self, TrackParseError> {
        CountTrack::try_from(Path::new(value))
    }
}

impl From<Vec<NucleotideCounts>> for CountTrack {
    fn from(records: Vec<NucleotideCounts>) -> Self {
        let mut track = CountTrack {
            records,
            header: ["seqid", "position", "A", "C", "G", "T", "N"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            path: None,
        };
        track.sort();
        track
    }
}

fn parse_count_row(
    fields: &[&str],
    line_number: usize,
) -> Result<NucleotideCounts, TrackParseError> {
    const NAMES: [&str; 6] = ["position", "A", "C", "G", "T", "N"];

    let mut values = [0u32; 6];
    for (slot, (field, name)) in values.iter_mut().zip(fields[1..].iter().zip(NAMES)) {
        *slot = field
            .trim()
            .parse::<u32>()
            .map_err(|_| TrackParseError::InvalidValue {
                line: line_number,
                field: name,
                value: field.to_string(),
            })?;
    }

    Ok(NucleotideCounts {
        seqid: fields[0].to_string(),
        position: values[0],
        a: values[1],
        c: values[2],
        g: values[3],
        t: values[4],
        n: values[5],
    })
}

impl CountTrack {
    pub fn sort(&mut self) {
        self.records.sort_by_key(|r| r.position);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    ///
    /// Rows whose position lies in the inclusive window `[lo, hi]`.
    ///
    pub fn range(&self, lo: u32, hi: u32) -> &[NucleotideCounts] {
        if lo > hi {
            return &[];
        }
        let from = self.records.partition_point(|r| r.position < lo);
        let to = self.records.partition_point(|r| r.position <= hi);
        &self.records[from..to]
    }

    ///
    /// Sum the counts of rows sharing a position.
    ///
    pub fn merged_by_position(&self) -> Vec<NucleotideCounts> {
        merge_counts_by_position(&self.records)
    }

    ///
    /// Convert every row into a per-base scored record whose score is the
    /// read depth at that row.
    ///
    pub fn to_scored_intervals(&self) -> IntervalCollection {
        self.records
            .iter()
            .map(|r| ScoredInterval {
                seqid: r.seqid.clone(),
                start: r.position,
                end: r.position + 1,
                name: r.seqid.clone(),
                score: r.total() as f64,
                strand: Strand::Unknown,
            })
            .collect()
    }
}

/// Sum counts of records sharing a position, ascending by position.
pub fn merge_counts_by_position(records: &[NucleotideCounts]) -> Vec<NucleotideCounts> {
    let mut merged: BTreeMap<u32, NucleotideCounts> = BTreeMap::new();
    for record in records {
        merged
            .entry(record.position)
            .and_modify(|acc| acc.accumulate(record))
            .or_insert_with(|| record.clone());
    }
    merged.into_values().collect()
}
