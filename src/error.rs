// error.rs - Library error type

use std::path::PathBuf;

/// Errors raised by the signature pipeline.
///
/// Per-group failures (`LengthMismatch`) are caught by the dispatcher and
/// turned into error-log entries; everything else aborts the run.
#[derive(thiserror::Error, Debug)]
pub enum KmerError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid FASTA in '{path}': {message}")]
    Fasta { path: PathBuf, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reference and variant windows must have the same length ({reference} vs {variant})")]
    LengthMismatch { reference: usize, variant: usize },

    #[error("Invalid comparison vector '{value}': {reason}")]
    InvalidVector { value: String, reason: String },

    #[error("Group '{group}' has rows of different lengths ({expected} vs {found})")]
    RaggedGroup {
        group: String,
        expected: usize,
        found: usize,
    },

    #[error("Window size must be a positive integer, got {0}")]
    InvalidWindowSize(usize),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl KmerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        KmerError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, KmerError>;
