//! The augmented table list produced by an analysis run.

use std::fmt;

use serde::Serialize;

use crate::metadata::{Column, Table};

/// Tables of one schema with their virtual columns attached.
///
/// Each table's columns are its real columns in provider order, followed by
/// the virtual columns in synthesis order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AugmentedSchema {
    schema: String,
    tables: Vec<Table>,
    junction_tables: Vec<String>,
}

/// A junction link resolved back to the tables and columns it names.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedJunction<'a> {
    pub table: &'a Table,
    pub corresponding: &'a Column,
    pub opposing: &'a Column,
}

impl AugmentedSchema {
    pub(crate) fn new(schema: String, tables: Vec<Table>, junction_tables: Vec<String>) -> Self {
        Self {
            schema,
            tables,
            junction_tables,
        }
    }

    /// An analysis of a schema with no tables.
    pub fn empty(schema: impl Into<String>) -> Self {
        Self::new(schema.into(), Vec::new(), Vec::new())
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn into_tables(self) -> Vec<Table> {
        self.tables
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Names of the tables classified as junctions, in provider order.
    pub fn junction_tables(&self) -> &[String] {
        &self.junction_tables
    }

    /// Virtual columns of `table`, or an empty iterator if it does not exist.
    pub fn virtual_columns<'a>(&'a self, table: &str) -> impl Iterator<Item = &'a Column> + 'a {
        self.table(table)
            .into_iter()
            .flat_map(|t| t.virtual_columns())
    }

    pub fn virtual_column_count(&self) -> usize {
        self.tables
            .iter()
            .map(|t| t.virtual_columns().count())
            .sum()
    }

    /// Resolve a many-to-many column's junction link to the junction table
    /// and its two FK columns.
    pub fn resolve_junction(&self, column: &Column) -> Option<ResolvedJunction<'_>> {
        let link = column.junction.as_ref()?;
        let table = self.table(&link.junction_table)?;
        Some(ResolvedJunction {
            table,
            corresponding: table.get_column(&link.corresponding_column)?,
            opposing: table.get_column(&link.opposing_column)?,
        })
    }
}

/// Plain-text summary, one line per column.
impl fmt::Display for AugmentedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "schema {} ({} tables, {} virtual columns)",
            self.schema,
            self.tables.len(),
            self.virtual_column_count()
        )?;

        for table in &self.tables {
            match &table.kind {
                Some(kind) => writeln!(f, "{} [{}]", table.name, kind)?,
                None => writeln!(f, "{}", table.name)?,
            }
            for column in &table.columns {
                write!(f, "  {}", column.name)?;
                if let Some((ref_table, ref_column)) = column.references() {
                    write!(f, " -> {}.{}", ref_table, ref_column)?;
                }
                match (&column.cardinality, &column.junction) {
                    (Some(cardinality), Some(link)) => {
                        write!(f, " ({} via {})", cardinality, link.junction_table)?
                    }
                    (Some(cardinality), None) => write!(f, " ({})", cardinality)?,
                    _ => {}
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}
