use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SpliceLensStatsError {
    #[error("Invalid window: start {start} is after end {end}")]
    InvalidRange { start: u32, end: u32 },
}
