//! Error types for CGM export loading

use thiserror::Error;

/// Errors that can occur while loading a CGM export file
///
/// A `LoadError` always concerns a single file. The batch runner reports it
/// against that file and moves on to the next one.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export is empty: expected a metadata line followed by a header row")]
    MissingHeader,

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Invalid timestamp on line {line}: {value:?} (expected DD-MM-YYYY HH:MM)")]
    InvalidTimestamp { line: u64, value: String },

    #[error("Invalid glucose value on line {line} in column {column:?}: {value:?}")]
    InvalidGlucose {
        line: u64,
        column: &'static str,
        value: String,
    },
}

/// Result type for export loading
pub type Result<T> = std::result::Result<T, LoadError>;
