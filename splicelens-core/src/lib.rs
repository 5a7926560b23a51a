//! Core data model for splicelens.
//!
//! - [models::IntervalCollection]: ordered, queryable per-base scored tracks
//! - [models::CountTrack]: 7-column nucleotide count tables
//! - [models::TranscriptModel]: exon structure and the donor/acceptor sites derived from it

pub mod errors;
pub mod models;
pub mod utils;
