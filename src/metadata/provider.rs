//! MetadataProvider trait definition.
//!
//! The MetadataProvider trait abstracts over the different ways raw schema
//! metadata reaches the analyser: a dialect-specific catalog query, a JSON
//! dump on disk, or tables built in memory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::error::{MetadataError, MetadataResult};
use super::raw::parse_tables;
use super::types::Table;

/// Source of raw schema metadata.
///
/// Implementations return every table of `schema` with its real columns in
/// ordinal order, or `None` when the schema has no tables. Every returned
/// column must have `is_virtual == false`.
///
/// # Example
///
/// ```ignore
/// use relmap::metadata::{MetadataProvider, StaticMetadataProvider};
///
/// async fn example(provider: &impl MetadataProvider) -> MetadataResult<()> {
///     let tables = provider.fetch("public").await?.unwrap_or_default();
///     println!("{} tables", tables.len());
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch the raw table list of a schema.
    async fn fetch(&self, schema: &str) -> MetadataResult<Option<Vec<Table>>>;
}

#[async_trait]
impl<P: MetadataProvider + ?Sized> MetadataProvider for Arc<P> {
    async fn fetch(&self, schema: &str) -> MetadataResult<Option<Vec<Table>>> {
        (**self).fetch(schema).await
    }
}

#[async_trait]
impl<P: MetadataProvider + ?Sized> MetadataProvider for Box<P> {
    async fn fetch(&self, schema: &str) -> MetadataResult<Option<Vec<Table>>> {
        (**self).fetch(schema).await
    }
}

/// Extension trait for MetadataProvider with additional convenience methods.
#[async_trait]
pub trait MetadataProviderExt: MetadataProvider {
    /// Fetch with a deadline; the core itself never times out.
    async fn fetch_with_timeout(
        &self,
        schema: &str,
        timeout: Duration,
    ) -> MetadataResult<Option<Vec<Table>>> {
        tokio::time::timeout(timeout, self.fetch(schema))
            .await
            .map_err(|_| MetadataError::Timeout(timeout.as_secs()))?
    }
}

// Blanket implementation for all MetadataProvider implementations
impl<T: MetadataProvider> MetadataProviderExt for T {}

/// Wraps a provider so every fetch fails with [`MetadataError::Timeout`]
/// once `timeout` elapses.
#[derive(Debug, Clone)]
pub struct TimeoutProvider<P> {
    inner: P,
    timeout: Duration,
}

impl<P: MetadataProvider> TimeoutProvider<P> {
    pub fn new(inner: P, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<P: MetadataProvider> MetadataProvider for TimeoutProvider<P> {
    async fn fetch(&self, schema: &str) -> MetadataResult<Option<Vec<Table>>> {
        self.inner.fetch_with_timeout(schema, self.timeout).await
    }
}

/// Reject tables that already carry virtual columns.
fn ensure_real_columns(tables: &[Table]) -> MetadataResult<()> {
    for table in tables {
        if let Some(column) = table.virtual_columns().next() {
            return Err(MetadataError::VirtualInput {
                table: table.name.clone(),
                column: column.name.clone(),
            });
        }
    }
    Ok(())
}

// ============================================================================
// In-memory provider
// ============================================================================

/// Provider backed by in-memory table lists, one per schema.
///
/// Every fetch hands out a fresh clone, so repeated analyses never share
/// column lists.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadataProvider {
    schemas: HashMap<String, Vec<Table>>,
}

impl StaticMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_schema(mut self, schema: impl Into<String>, tables: Vec<Table>) -> Self {
        self.insert(schema, tables);
        self
    }

    pub fn insert(&mut self, schema: impl Into<String>, tables: Vec<Table>) {
        self.schemas.insert(schema.into(), tables);
    }
}

#[async_trait]
impl MetadataProvider for StaticMetadataProvider {
    async fn fetch(&self, schema: &str) -> MetadataResult<Option<Vec<Table>>> {
        let Some(tables) = self.schemas.get(schema) else {
            return Ok(None);
        };
        ensure_real_columns(tables)?;
        Ok(Some(tables.clone()))
    }
}

// ============================================================================
// JSON dump provider
// ============================================================================

/// Provider reading a JSON dump of the catalog query output.
///
/// The file holds either a bare table array (used for any schema name) or
/// an object keyed by schema name. `null` means "no tables".
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MetadataProvider for JsonFileProvider {
    async fn fetch(&self, schema: &str) -> MetadataResult<Option<Vec<Table>>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| MetadataError::Io {
                path: self.path.clone(),
                source,
            })?;

        let value: serde_json::Value = serde_json::from_str(&content)?;
        let value = match value {
            serde_json::Value::Object(mut by_schema) => {
                debug!(path = %self.path.display(), schema, "reading schema-keyed dump");
                by_schema.remove(schema).unwrap_or(serde_json::Value::Null)
            }
            other => other,
        };

        parse_tables(value)
    }
}
