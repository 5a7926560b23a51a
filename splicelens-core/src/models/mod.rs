pub mod interval_collection;
pub mod nucleotide_counts;
pub mod scored_interval;
pub mod transcript;

// re-export for cleaner imports
pub use self::interval_collection::IntervalCollection;
pub use self::nucleotide_counts::{CountTrack, Nucleotide, NucleotideCounts};
pub use self::scored_interval::{ScoredInterval, Strand};
pub use self::transcript::{Exon, SiteCategory, Transcript, TranscriptModel};
