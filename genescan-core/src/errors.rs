use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("Can't read annotation file: {0}")]
    FileReadError(String),

    #[error("Malformed annotation row at line {line}: {reason}: \"{row}\"")]
    MalformedRow {
        line: usize,
        row: String,
        reason: String,
    },

    #[error("Expected 4 fields (name, min, max, chromosome), found {0}")]
    MissingFields(usize),

    #[error("Invalid {field} coordinate '{value}'")]
    InvalidCoordinate { field: &'static str, value: String },

    #[error("Gene name '{0}' does not carry a numeric id after its prefix")]
    InvalidGeneId(String),

    #[error("Invalid gene bounds: min {min} is greater than max {max}")]
    InvalidBounds { min: u32, max: u32 },

    #[error("Annotation file contains no gene records: {0}")]
    EmptyAnnotation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnnotationError>;
