//! Raw catalog row shapes.
//!
//! These types mirror the JSON produced by the introspection query: one
//! object per table, with its columns aggregated into a `structure` array in
//! ordinal order. Providers deserialize into these and convert into
//! [`Table`] through [`RawTable::into_table`].

use serde::Deserialize;

use super::error::{MetadataError, MetadataResult};
use super::types::{Column, Constraint, ConstraintSet, DefaultValue, Table, TableKind};

/// One table row as returned by the catalog query.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTable {
    pub table_name: String,
    #[serde(default)]
    pub table_type: Option<String>,
    #[serde(default)]
    pub structure: Vec<RawColumn>,
}

/// One column entry inside a table's `structure` array.
#[derive(Debug, Clone, Deserialize)]
pub struct RawColumn {
    pub column_name: String,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default, rename = "type", alias = "column_type")]
    pub data_type: Option<String>,
    #[serde(default)]
    pub default: Option<DefaultValue>,
    #[serde(default)]
    pub is_nullable: Option<Flag>,
    #[serde(default)]
    pub is_updatable: Option<Flag>,
    /// `null` when the column has no PK/FK constraint.
    #[serde(default)]
    pub referential_constraints: Option<Vec<String>>,
    #[serde(default)]
    pub referenced_table_name: Option<String>,
    #[serde(default)]
    pub referenced_column_name: Option<String>,
}

/// `information_schema` yes/no flag, also accepted as a JSON boolean.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => matches!(s.trim().to_uppercase().as_str(), "YES" | "TRUE" | "Y"),
        }
    }
}

impl RawTable {
    /// Convert into a [`Table`] of real columns, preserving column order.
    pub fn into_table(self) -> MetadataResult<Table> {
        let kind = self.table_type.map(TableKind::from);

        let mut columns = Vec::with_capacity(self.structure.len());
        for raw in self.structure {
            columns.push(raw.into_column(&self.table_name)?);
        }

        Ok(Table {
            name: self.table_name,
            kind,
            columns,
        })
    }
}

impl RawColumn {
    fn into_column(self, table: &str) -> MetadataResult<Column> {
        if self.is_virtual {
            return Err(MetadataError::VirtualInput {
                table: table.to_string(),
                column: self.column_name,
            });
        }

        let constraints = match self.referential_constraints {
            None => None,
            Some(values) => {
                let mut set = ConstraintSet::new();
                for value in values {
                    let constraint = Constraint::parse(&value).ok_or_else(|| {
                        MetadataError::UnknownConstraint {
                            table: table.to_string(),
                            column: self.column_name.clone(),
                            value: value.clone(),
                        }
                    })?;
                    set.insert(constraint);
                }
                Some(set)
            }
        };

        Ok(Column {
            name: self.column_name,
            is_virtual: false,
            data_type: self.data_type,
            default_value: self.default,
            nullable: self.is_nullable.as_ref().map(Flag::as_bool),
            updatable: self.is_updatable.as_ref().map(Flag::as_bool),
            constraints,
            referenced_table_name: self.referenced_table_name,
            referenced_column_name: self.referenced_column_name,
            cardinality: None,
            junction: None,
        })
    }
}

/// Parse a JSON table array (or `null`) into tables.
///
/// `null` maps to `None`, the provider contract's "schema has no tables".
pub fn parse_tables(value: serde_json::Value) -> MetadataResult<Option<Vec<Table>>> {
    let raw: Option<Vec<RawTable>> = serde_json::from_value(value)?;
    raw.map(|tables| tables.into_iter().map(RawTable::into_table).collect())
        .transpose()
}
