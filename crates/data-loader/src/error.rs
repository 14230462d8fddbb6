//! Error types for the data-loader crate.
//!
//! Every failure here is fatal for a run: the analysis cannot proceed on a
//! half-loaded dataset, so callers propagate these with `?`.

use thiserror::Error;

/// Errors that can occur while loading and validating the MovieLens CSV files
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A record in a data file couldn't be parsed
    ///
    /// `line` is 1-based and counts the header row, so it matches what an
    /// editor shows for the offending record.
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
