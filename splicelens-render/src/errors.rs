use thiserror::Error;

use splicelens_stats::errors::SpliceLensStatsError;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Transcript model has zero genome length, nothing to lay out")]
    EmptyGenome,

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Stats(#[from] SpliceLensStatsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
