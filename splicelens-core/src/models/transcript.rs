//! Transcript/exon model and the splice sites derived from it.
//!
//! Exons are read from a GTF file and grouped per `transcript_id`; introns are
//! the gaps between consecutive exons, and their boundaries are the donor and
//! acceptor sites consumed by the zoom strip.

use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;
use std::path::Path;

use log::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::TrackParseError;
use crate::models::Strand;
use crate::utils::{get_dynamic_reader, split_tab_fields};

/// Which intron boundary a site coordinate marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SiteCategory {
    Donor,
    Acceptor,
}

impl SiteCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SiteCategory::Donor => "donor",
            SiteCategory::Acceptor => "acceptor",
        }
    }
}

/// An exon in 0-based half-open coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Exon {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transcript {
    pub id: String,
    pub seqid: String,
    pub strand: Strand,
    /// Sorted by start.
    pub exons: Vec<Exon>,
}

impl Transcript {
    pub fn new(id: &str, seqid: &str, strand: Strand, mut exons: Vec<Exon>) -> Transcript {
        exons.sort();
        Transcript {
            id: id.to_string(),
            seqid: seqid.to_string(),
            strand,
            exons,
        }
    }

    ///
    /// Introns as half-open `[start, end)` gaps between consecutive exons.
    /// Touching or overlapping exons produce no intron.
    ///
    pub fn introns(&self) -> Vec<(u32, u32)> {
        self.exons
            .windows(2)
            .filter(|pair| pair[1].start > pair[0].end)
            .map(|pair| (pair[0].end, pair[1].start))
            .collect()
    }

    ///
    /// Donor and acceptor coordinates of every intron. On the minus strand
    /// the 5' end of the intron is its rightmost base.
    ///
    pub fn splice_sites(&self) -> Vec<(SiteCategory, u32)> {
        let mut sites = Vec::new();
        for (start, end) in self.introns() {
            let (donor, acceptor) = match self.strand {
                Strand::Minus => (end - 1, start),
                _ => (start, end - 1),
            };
            sites.push((SiteCategory::Donor, donor));
            sites.push((SiteCategory::Acceptor, acceptor));
        }
        sites
    }

    pub fn start(&self) -> u32 {
        self.exons.first().map(|e| e.start).unwrap_or(0)
    }

    pub fn end(&self) -> u32 {
        self.exons.iter().map(|e| e.end).max().unwrap_or(0)
    }
}

///
/// Immutable transcript model: transcripts plus the total genome length used
/// as the overview coordinate space.
///
#[derive(Debug, Clone, Default)]
pub struct TranscriptModel {
    pub transcripts: Vec<Transcript>,
    genome_length: Option<u32>,
}

impl From<Vec<Transcript>> for TranscriptModel {
    fn from(mut transcripts: Vec<Transcript>) -> Self {
        transcripts.sort_by(|a, b| a.start().cmp(&b.start()).then_with(|| a.id.cmp(&b.id)));
        TranscriptModel {
            transcripts,
            genome_length: None,
        }
    }
}

impl TryFrom<&Path> for TranscriptModel {
    type Error = TrackParseError;

    ///
    /// Create a new [TranscriptModel] from a GTF file.
    ///
    /// Only `exon` features are used. Lines with fewer than nine fields are
    /// skipped with a warning; an exon without `transcript_id` or with
    /// unparsable coordinates fails the whole file.
    ///
    fn try_from(value: &Path) -> Result<Self, TrackParseError> {
        let reader = get_dynamic_reader(value)?;

        // transcript_id -> (seqid, strand, exons)
        let mut grouped: BTreeMap<String, (String, Strand, Vec<Exon>)> = BTreeMap::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;

            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let fields = split_tab_fields(&line);
            if fields.len() < 9 {
                warn!(
                    "Skipping GTF line {}: {} fields, expected 9",
                    line_number,
                    fields.len()
                );
                continue;
            }

            if !fields[2].eq_ignore_ascii_case("exon") {
                continue;
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

            // GTF is 1-based inclusive; convert to 0-based half-open
            let start = parse_coordinate("start", fields[3])?.saturating_sub(1);
            let end = parse_coordinate("end", fields[4])?;
            if start >= end {
                return Err(TrackParseError::InvalidInterval {
                    line: line_number,
                    start,
                    end,
                });
            }

            let transcript_id = gtf_attribute(fields[8], "transcript_id").ok_or_else(|| {
                TrackParseError::Annotation(format!(
                    "exon on line {} has no transcript_id",
                    line_number
                ))
            })?;
            let strand = Strand::from_char(fields[6].chars().next().unwrap_or('.'));

            grouped
                .entry(transcript_id)
                .or_insert_with(|| (fields[0].to_string(), strand, Vec::new()))
                .2
                .push(Exon { start, end });
        }

        let transcripts = grouped
            .into_iter()
            .map(|(id, (seqid, strand, exons))| Transcript::new(&id, &seqid, strand, exons))
            .collect::<Vec<_>>();

        Ok(TranscriptModel::from(transcripts))
    }
}

impl TryFrom<&str> for TranscriptModel {
    type Error = TrackParseError;

    fn try_from(value: &str) -> Result<Self, TrackParseError> {
        TranscriptModel::try_from(Path::new(value))
    }
}

/// Value of `key "value";` in a GTF attribute column.
fn gtf_attribute(attrs: &str, key: &str) -> Option<String> {
    attrs.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once(' ')?;
        (k == key).then(|| v.trim().trim_matches('"').to_string())
    })
}

impl TranscriptModel {
    /// Override the genome length (e.g. with the reference sequence length).
    pub fn with_genome_length(mut self, length: u32) -> Self {
        self.genome_length = Some(length);
        self
    }

    ///
    /// Overview coordinate space: explicit override, else the largest exon end.
    ///
    pub fn genome_length(&self) -> u32 {
        self.genome_length
            .unwrap_or_else(|| self.transcripts.iter().map(|t| t.end()).max().unwrap_or(0))
    }

    pub fn sites(&self, category: SiteCategory) -> BTreeSet<u32> {
        self.transcripts
            .iter()
            .flat_map(|t| t.splice_sites())
            .filter(|(c, _)| *c == category)
            .map(|(_, position)| position)
            .collect()
    }

    pub fn donor_sites(&self) -> BTreeSet<u32> {
        self.sites(SiteCategory::Donor)
    }

    pub fn acceptor_sites(&self) -> BTreeSet<u32> {
        self.sites(SiteCategory::Acceptor)
    }

    pub fn is_empty(&self) -> bool {
        self.transcripts.is_empty()
    }
}
