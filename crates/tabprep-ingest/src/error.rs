//! Error types for CSV ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a CSV file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Failed to open or read the file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file has no content to build a header from.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// The first row held no usable column names.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },

    /// Polars failed to parse the file body.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Header rows disagree with the parsed frame width.
    #[error("{path}: header has {labels} labels but frame has {columns} columns")]
    HeaderMismatch {
        path: PathBuf,
        labels: usize,
        columns: usize,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
