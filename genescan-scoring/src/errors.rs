use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("p-value {value} for gene {gene_id} is not a finite positive number")]
    NonPositivePValue { gene_id: u64, value: f64 },

    #[error("Invalid p-value '{0}'")]
    InvalidPValue(String),

    #[error("Malformed association row at line {line}: {reason}: \"{row}\"")]
    MalformedRow {
        line: usize,
        row: String,
        reason: String,
    },

    #[error("Can't read association file {path}: {reason}")]
    FileReadError { path: PathBuf, reason: String },

    #[error("Association files {first} and {second} would both write {output}")]
    OutputCollision {
        first: PathBuf,
        second: PathBuf,
        output: PathBuf,
    },

    #[error("Error reading file pattern: {0}")]
    GlobError(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Chromosome code table is empty")]
    EmptyChromosomeCodes,
    #[error("Output file names must not be empty")]
    EmptyFileName,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ScoringError>;
