use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackParseError {
    #[error("Line {line}: expected {expected} tab-separated fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: can't parse {field} from '{value}'")]
    InvalidValue {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Line {line}: interval start {start} is not before end {end}")]
    InvalidInterval { line: usize, start: u32, end: u32 },

    #[error("Count table has no header row: {0}")]
    MissingHeader(String),

    #[error("Error parsing annotation: {0}")]
    Annotation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
