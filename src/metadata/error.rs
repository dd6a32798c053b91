//! Metadata provider error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Errors raised while fetching or shaping raw schema metadata.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// Failed to read a metadata dump from disk.
    #[error("failed to read metadata file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Raw metadata did not match the expected JSON shape.
    #[error("malformed metadata: {0}")]
    Json(#[from] serde_json::Error),

    /// The underlying query client failed.
    #[error("metadata query failed: {0}")]
    Query(String),

    /// The catalog reported a constraint type this crate does not model.
    #[error("unknown constraint `{value}` on {table}.{column}")]
    UnknownConstraint {
        table: String,
        column: String,
        value: String,
    },

    /// A provider returned a column already marked virtual.
    #[error("provider returned virtual column {table}.{column}")]
    VirtualInput { table: String, column: String },

    /// The fetch did not complete in time.
    #[error("metadata fetch timed out after {0} seconds")]
    Timeout(u64),
}
