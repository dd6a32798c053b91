//! Analysis error types.

use thiserror::Error;

use crate::metadata::MetadataError;

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Fatal conditions that abort an analysis run.
///
/// No variant is recoverable in place: the run returns before the merge
/// step, so callers never observe a partially augmented schema.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A column declares FOREIGN KEY without naming what it references.
    #[error("missing referenced column/table for foreign key {table}.{column}")]
    MalformedForeignKey { table: String, column: String },

    /// A table classified as a junction does not have exactly two FK columns.
    #[error("expected exactly two foreign-key columns on junction table {table}, found {found}")]
    InvalidJunctionShape { table: String, found: usize },

    /// The input already contains virtual columns from an earlier run.
    #[error("table {table} already carries virtual column {column}; analyse raw metadata only")]
    AlreadyAugmented { table: String, column: String },

    /// The provider failed.
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

impl AnalysisError {
    pub(crate) fn malformed(table: &str, column: &str) -> Self {
        Self::MalformedForeignKey {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    /// The table the error points at, if any.
    pub fn table(&self) -> Option<&str> {
        match self {
            Self::MalformedForeignKey { table, .. }
            | Self::InvalidJunctionShape { table, .. }
            | Self::AlreadyAugmented { table, .. } => Some(table),
            Self::Metadata(_) => None,
        }
    }
}
