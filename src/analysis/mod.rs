//! Relation inference.
//!
//! Turns the raw table list of a schema into an [`AugmentedSchema`] where
//! every relation is a virtual column on both of its endpoints.
//!
//! # Pipeline
//!
//! ```text
//! provider.fetch(schema)          one await, nothing after suspends
//!        │
//!        ▼
//! for each table (provider order)
//!   ├─ is_junction_table?  ──yes──► handle_many_to_many_relation ─┐
//!   └─ handle_foreign_keys (always) ─────────────────────────────┤
//!                                                                ▼
//!                                                  RelationAccumulator
//!                                                                │
//!                                                  merge_into(tables)
//!                                                                ▼
//!                                                     AugmentedSchema
//! ```
//!
//! The accumulator lives for one run only. Because every table is
//! processed before anything is merged, the result does not depend on the
//! order in which the provider lists tables.

mod accumulator;
mod error;
mod junction;
mod schema;
pub mod synthesis;

pub use accumulator::RelationAccumulator;
pub use error::{AnalysisError, AnalysisResult};
pub use junction::is_junction_table;
pub use schema::{AugmentedSchema, ResolvedJunction};
pub use synthesis::{handle_foreign_keys, handle_many_to_many_relation};

use tracing::{debug, info};

use crate::metadata::{MetadataProvider, Table};

/// Drives fetch → synthesize → merge for one schema.
///
/// # Example
///
/// ```ignore
/// use relmap::analysis::SchemaAnalyser;
/// use relmap::metadata::JsonFileProvider;
///
/// let mut analyser = SchemaAnalyser::new("public", JsonFileProvider::new("dump.json"));
/// let schema = analyser.run().await?;
/// for column in schema.virtual_columns("customers") {
///     println!("{}", column.name);
/// }
/// ```
pub struct SchemaAnalyser<P> {
    schema: String,
    provider: P,
    last: Option<AugmentedSchema>,
}

impl<P: MetadataProvider> SchemaAnalyser<P> {
    pub fn new(schema: impl Into<String>, provider: P) -> Self {
        Self {
            schema: schema.into(),
            provider,
            last: None,
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetch the schema and compute its augmented table list.
    ///
    /// Every call fetches fresh metadata and builds a fresh accumulator. On
    /// error the previously stored result is left as it was.
    pub async fn run(&mut self) -> AnalysisResult<&AugmentedSchema> {
        let tables = self.provider.fetch(&self.schema).await?;
        let augmented = analyse_tables(&self.schema, tables.unwrap_or_default())?;
        Ok(&*self.last.insert(augmented))
    }

    /// The result of the last successful [`run`](Self::run).
    pub fn last_result(&self) -> Option<&AugmentedSchema> {
        self.last.as_ref()
    }
}

/// Synchronous core: classify, synthesize and merge an already fetched
/// table list.
///
/// Rejects input that already carries virtual columns, since analysing an
/// augmented list again would attach every relation twice.
pub fn analyse_tables(schema: &str, tables: Vec<Table>) -> AnalysisResult<AugmentedSchema> {
    if tables.is_empty() {
        debug!(schema, "schema has no tables");
        return Ok(AugmentedSchema::empty(schema));
    }

    for table in &tables {
        if let Some(column) = table.virtual_columns().next() {
            return Err(AnalysisError::AlreadyAugmented {
                table: table.name.clone(),
                column: column.name.clone(),
            });
        }
    }

    let mut acc = RelationAccumulator::new();
    let mut junction_tables = Vec::new();

    for table in &tables {
        let junction = is_junction_table(table);
        debug!(table = %table.name, junction, "classified table");

        if junction {
            handle_many_to_many_relation(table, &mut acc)?;
            junction_tables.push(table.name.clone());
        }
        handle_foreign_keys(table, &mut acc)?;
    }

    let pending = acc.len();
    let tables = acc.merge_into(tables);

    info!(
        schema,
        tables = tables.len(),
        junctions = junction_tables.len(),
        virtual_columns = pending,
        "schema analysed"
    );

    Ok(AugmentedSchema::new(schema.to_string(), tables, junction_tables))
}
