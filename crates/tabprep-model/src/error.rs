//! Error types shared across the tabprep crates.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by label cleaning and mapping persistence.
#[derive(Debug, Error)]
pub enum TabprepError {
    /// Failed to create directories for or write the mapping file.
    #[error("failed to write name mapping to {path}: {source}")]
    MappingWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the mapping to JSON.
    #[error("name mapping serialization failed: {0}")]
    MappingSerialize(#[from] serde_json::Error),

    /// A label sequence did not line up with the frame it describes.
    #[error("label count {labels} does not match column count {columns}")]
    LabelCountMismatch { labels: usize, columns: usize },
}

/// Result type for tabprep model operations.
pub type Result<T> = std::result::Result<T, TabprepError>;
