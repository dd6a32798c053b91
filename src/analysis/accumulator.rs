//! Pending virtual columns, keyed by destination table.

use std::collections::HashMap;

use tracing::warn;

use crate::metadata::{Column, Table};

/// Virtual columns waiting to be attached, keyed by destination table name.
///
/// Built across every table of one run, then consumed by
/// [`merge_into`](Self::merge_into). Merging takes `self` by value, so an
/// accumulator can never be applied twice.
#[derive(Debug, Default)]
pub struct RelationAccumulator {
    pending: HashMap<String, Vec<Column>>,
}

impl RelationAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `column` for attachment to `table`, after anything queued before.
    pub fn push(&mut self, table: impl Into<String>, column: Column) {
        self.pending.entry(table.into()).or_default().push(column);
    }

    /// Columns queued for `table`, in push order.
    pub fn pending_for(&self, table: &str) -> &[Column] {
        self.pending.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of queued columns.
    pub fn len(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Append every queued column to its table, preserving push order.
    ///
    /// Existing columns are never reordered or removed; tables with nothing
    /// queued come back unchanged. Entries naming a table that is not in
    /// `tables` are dropped.
    pub fn merge_into(mut self, mut tables: Vec<Table>) -> Vec<Table> {
        for table in &mut tables {
            if let Some(columns) = self.pending.remove(&table.name) {
                table.columns.extend(columns);
            }
        }

        for (table, columns) in &self.pending {
            warn!(
                table = %table,
                dropped = columns.len(),
                "relation targets a table outside the schema"
            );
        }

        tables
    }
}
