//! PostgreSQL metadata provider.
//!
//! Runs a single `information_schema` query that returns one row per table
//! with its columns aggregated as JSON, then shapes those rows into
//! [`Table`]s. The query never interpolates the schema name; it is bound as
//! `$1`.
//!
//! Connection handling is left to a [`QueryClient`] implementation so the
//! crate stays driver-agnostic.

use async_trait::async_trait;
use tracing::debug;

use super::error::MetadataResult;
use super::provider::MetadataProvider;
use super::raw::RawTable;
use super::types::Table;

/// Catalog query returning `(table_name, table_type, structure)` rows.
pub const INTROSPECTION_QUERY: &str = r#"
WITH foreign_keys AS (
  SELECT
    kcu.table_schema,
    kcu.table_name,
    kcu.column_name,
    kcuref.table_name  referenced_table,
    kcuref.column_name referenced_column
  FROM information_schema.key_column_usage kcu
  JOIN information_schema.referential_constraints rc
    ON rc.constraint_name = kcu.constraint_name AND rc.constraint_schema = kcu.constraint_schema
  JOIN information_schema.key_column_usage kcuref
    ON kcuref.constraint_name = rc.unique_constraint_name
   AND kcuref.constraint_schema = kcu.constraint_schema
   AND kcuref.ordinal_position = kcu.position_in_unique_constraint
  WHERE kcu.table_schema = $1
),
referential_constraints AS (
  SELECT
    kcu.table_schema,
    kcu.table_name,
    kcu.column_name,
    array_agg(DISTINCT tc.constraint_type) referential_constraints
  FROM information_schema.key_column_usage kcu
  JOIN information_schema.table_constraints tc
    ON kcu.constraint_name = tc.constraint_name AND kcu.table_schema = tc.table_schema
  WHERE kcu.table_schema = $1
    AND tc.constraint_type IN ('FOREIGN KEY', 'PRIMARY KEY')
  GROUP BY kcu.table_schema, kcu.table_name, kcu.column_name
)
SELECT
  t.table_name,
  t.table_type,
  json_agg(
    json_build_object(
      'column_name',             c.column_name,
      'is_virtual',              FALSE,
      'type',                    c.udt_name,
      'default',                 c.column_default,
      'is_nullable',             c.is_nullable,
      'is_updatable',            c.is_updatable,
      'referential_constraints', referential_constraints.referential_constraints,
      'referenced_table_name',   foreign_keys.referenced_table,
      'referenced_column_name',  foreign_keys.referenced_column
    ) ORDER BY c.ordinal_position
  ) AS structure
FROM information_schema.tables t
JOIN information_schema.columns c
  ON t.table_name = c.table_name AND t.table_schema = c.table_schema
LEFT JOIN foreign_keys
  ON foreign_keys.table_name = t.table_name AND foreign_keys.column_name = c.column_name
LEFT JOIN referential_constraints
  ON t.table_name = referential_constraints.table_name
 AND c.column_name = referential_constraints.column_name
WHERE t.table_schema = $1
GROUP BY t.table_name, t.table_type
ORDER BY t.table_name;
"#;

/// Transport seam for running the catalog query.
///
/// Implementations execute `sql` with positional text parameters and return
/// each result row as a JSON object keyed by column name.
#[async_trait]
pub trait QueryClient: Send + Sync {
    async fn query_rows(&self, sql: &str, params: &[&str]) -> MetadataResult<Vec<serde_json::Value>>;
}

/// MetadataProvider for PostgreSQL schemas.
///
/// # Example
///
/// ```ignore
/// let provider = PostgresMetadataProvider::new(my_client);
/// let mut analyser = SchemaAnalyser::new("public", provider);
/// let schema = analyser.run().await?;
/// ```
pub struct PostgresMetadataProvider<C> {
    client: C,
}

impl<C: QueryClient> PostgresMetadataProvider<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// The catalog query this provider sends.
    pub fn query(&self) -> &'static str {
        INTROSPECTION_QUERY
    }
}

#[async_trait]
impl<C: QueryClient> MetadataProvider for PostgresMetadataProvider<C> {
    async fn fetch(&self, schema: &str) -> MetadataResult<Option<Vec<Table>>> {
        let rows = self.client.query_rows(INTROSPECTION_QUERY, &[schema]).await?;
        debug!(schema, rows = rows.len(), "postgres catalog query returned");

        if rows.is_empty() {
            return Ok(None);
        }

        let mut tables = Vec::with_capacity(rows.len());
        for row in rows {
            let raw: RawTable = serde_json::from_value(row)?;
            tables.push(raw.into_table()?);
        }
        Ok(Some(tables))
    }
}
