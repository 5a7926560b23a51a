use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Strand of a genomic feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strand {
    Plus,
    Minus,
    #[default]
    Unknown,
}

impl Strand {
    pub fn from_char(c: char) -> Strand {
        match c {
            '+' => Strand::Plus,
            '-' => Strand::Minus,
            _ => Strand::Unknown,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Unknown => '.',
        }
    }
}

///
/// A half-open genomic interval `[start, end)` carrying a numeric score.
///
/// A record with `end == start + 1` is the per-base ("exploded") form.
///
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoredInterval {
    pub seqid: String,
    pub start: u32,
    pub end: u32,
    pub name: String,
    pub score: f64,
    pub strand: Strand,
}

impl ScoredInterval {
    /// Convenience constructor for a single-base record.
    pub fn per_base(seqid: &str, position: u32, score: f64) -> ScoredInterval {
        ScoredInterval {
            seqid: seqid.to_string(),
            start: position,
            end: position + 1,
            name: ".".to_string(),
            score,
            strand: Strand::Unknown,
        }
    }

    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_per_base(&self) -> bool {
        self.width() == 1
    }

    ///
    /// Expand into one record per covered base. Score and metadata are
    /// copied onto every resulting base.
    ///
    pub fn explode(&self) -> impl Iterator<Item = ScoredInterval> + '_ {
        (self.start..self.end).map(move |position| ScoredInterval {
            seqid: self.seqid.clone(),
            start: position,
            end: position + 1,
            name: self.name.clone(),
            score: self.score,
            strand: self.strand,
        })
    }

    ///
    /// Get file string of the interval (BED6 column order)
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.seqid,
            self.start,
            self.end,
            self.name,
            self.score,
            self.strand.as_char()
        )
    }
}

impl Display for ScoredInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_explode_preserves_metadata() {
        let interval = ScoredInterval {
            seqid: "NC_045512".to_string(),
            start: 10,
            end: 13,
            name: "peak".to_string(),
            score: 2.5,
            strand: Strand::Minus,
        };

        let exploded: Vec<ScoredInterval> = interval.explode().collect();

        assert_eq!(exploded.len(), 3);
        for (offset, record) in exploded.iter().enumerate() {
            assert_eq!(record.start, 10 + offset as u32);
            assert!(record.is_per_base());
            assert_eq!(record.score, 2.5);
            assert_eq!(record.name, "peak");
            assert_eq!(record.strand, Strand::Minus);
        }
    }

    #[rstest]
    #[case('+', Strand::Plus)]
    #[case('-', Strand::Minus)]
    #[case('.', Strand::Unknown)]
    #[case('?', Strand::Unknown)]
    fn test_strand_from_char(#[case] c: char, #[case] expected: Strand) {
        assert_eq!(Strand::from_char(c), expected);
    }

    #[rstest]
    fn test_as_string() {
        let record = ScoredInterval::per_base("chr1", 5, 3.0);
        assert_eq!(record.as_string(), "chr1\t5\t6\t.\t3\t.");
    }
}
