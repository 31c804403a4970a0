//! Error types for the data-loader crate.
//!
//! Only the ingestion layer can fail. Once a `DataIndex` exists, every
//! lookup degrades to an empty value instead of returning an error.

use thiserror::Error;

/// Errors that can occur while reading catalog and rating data
///
/// The `#[derive(Error)]` macro from thiserror implements `Display`
/// from the `#[error(...)]` attributes.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in data file couldn't be parsed
    ///
    /// Stores where the error occurred so the caller can point at the line
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// Snapshot document was not valid JSON for the expected shape
    #[error("Invalid snapshot: {0}")]
    SnapshotError(#[from] serde_json::Error),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
