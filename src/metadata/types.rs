//! Schema metadata types.
//!
//! These are the Rust-native shapes every [`MetadataProvider`] hands to the
//! analyser, and the shapes the analyser hands back with virtual columns
//! appended.
//!
//! [`MetadataProvider`]: super::MetadataProvider

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Constraints
// ============================================================================

/// A referential constraint attached to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Constraint {
    #[serde(rename = "PRIMARY KEY")]
    PrimaryKey,
    #[serde(rename = "FOREIGN KEY")]
    ForeignKey,
}

impl Constraint {
    /// Parse the constraint type string used by `information_schema`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PRIMARY KEY" | "PRIMARY_KEY" => Some(Self::PrimaryKey),
            "FOREIGN KEY" | "FOREIGN_KEY" => Some(Self::ForeignKey),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryKey => "PRIMARY KEY",
            Self::ForeignKey => "FOREIGN KEY",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of referential constraints on a column.
///
/// A column with no constraint at all carries `None` instead of an empty
/// set; the junction detector treats the two differently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintSet(BTreeSet<Constraint>);

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, constraint: Constraint) -> bool {
        self.0.insert(constraint)
    }

    pub fn contains(&self, constraint: Constraint) -> bool {
        self.0.contains(&constraint)
    }

    pub fn is_foreign_key(&self) -> bool {
        self.contains(Constraint::ForeignKey)
    }

    pub fn is_primary_key(&self) -> bool {
        self.contains(Constraint::PrimaryKey)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Constraint> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Constraint> for ConstraintSet {
    fn from_iter<I: IntoIterator<Item = Constraint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Supporting Enums
// ============================================================================

/// Type of database table, as reported by the provider.
///
/// Only the exact `information_schema.tables.table_type` spellings map to
/// the named variants. Anything else is kept verbatim in `Other`, so the
/// kind always serializes back to the string the provider sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TableKind {
    Table,
    View,
    ForeignTable,
    LocalTemporary,
    Other(String),
}

impl TableKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Table => "BASE TABLE",
            Self::View => "VIEW",
            Self::ForeignTable => "FOREIGN",
            Self::LocalTemporary => "LOCAL TEMPORARY",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for TableKind {
    fn from(s: &str) -> Self {
        match s {
            "BASE TABLE" => Self::Table,
            "VIEW" => Self::View,
            "FOREIGN" => Self::ForeignTable,
            "LOCAL TEMPORARY" => Self::LocalTemporary,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl From<String> for TableKind {
    fn from(s: String) -> Self {
        match Self::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            kind => kind,
        }
    }
}

impl From<TableKind> for String {
    fn from(kind: TableKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column default as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Cardinality of the relation a virtual column navigates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Back-reference from the referenced table to every referencing row.
    OneToMany,
    /// Forward edge mirroring a real foreign key.
    ManyToOne,
    /// Shortcut through a junction table to the other endpoint.
    ManyToMany,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneToMany => write!(f, "1:N"),
            Self::ManyToOne => write!(f, "N:1"),
            Self::ManyToMany => write!(f, "N:N"),
        }
    }
}

// ============================================================================
// Column
// ============================================================================

/// Junction metadata carried by many-to-many virtual columns.
///
/// Holds names rather than references; resolve them through
/// [`AugmentedSchema::resolve_junction`](crate::analysis::AugmentedSchema::resolve_junction).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JunctionLink {
    /// Name of the junction table.
    pub junction_table: String,
    /// FK column on the junction table pointing back at the owning table.
    pub corresponding_column: String,
    /// FK column on the junction table pointing at the other endpoint.
    pub opposing_column: String,
}

/// A real or virtual column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updatable: Option<bool>,
    /// `None` means the column has no referential constraint at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<ConstraintSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_table_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_column_name: Option<String>,
    /// Set on virtual columns only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<Cardinality>,
    /// Set on many-to-many virtual columns only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub junction: Option<JunctionLink>,
}

impl Column {
    /// Create a real column with no type, default, or constraints.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_virtual: false,
            data_type: None,
            default_value: None,
            nullable: None,
            updatable: None,
            constraints: None,
            referenced_table_name: None,
            referenced_column_name: None,
            cardinality: None,
            junction: None,
        }
    }

    /// Create a virtual column pointing at `(referenced_table, referenced_column)`.
    pub fn relation(
        name: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            is_virtual: true,
            referenced_table_name: Some(referenced_table.into()),
            referenced_column_name: Some(referenced_column.into()),
            cardinality: Some(cardinality),
            ..Self::new(name)
        }
    }

    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    /// Add a single constraint, creating the set if needed.
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints
            .get_or_insert_with(ConstraintSet::new)
            .insert(constraint);
        self
    }

    pub fn primary_key(self) -> Self {
        self.constraint(Constraint::PrimaryKey)
    }

    /// Mark as a foreign key referencing `table.column`.
    pub fn foreign_key(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.referenced_table_name = Some(table.into());
        self.referenced_column_name = Some(column.into());
        self.constraint(Constraint::ForeignKey)
    }

    pub fn with_junction(mut self, link: JunctionLink) -> Self {
        self.junction = Some(link);
        self
    }

    /// Whether the column carries any constraint set (even an empty one).
    pub fn has_constraints(&self) -> bool {
        self.constraints.is_some()
    }

    pub fn is_foreign_key(&self) -> bool {
        self.constraints
            .as_ref()
            .is_some_and(ConstraintSet::is_foreign_key)
    }

    pub fn is_primary_key(&self) -> bool {
        self.constraints
            .as_ref()
            .is_some_and(ConstraintSet::is_primary_key)
    }

    /// The `(table, column)` this column references, if both are non-empty.
    pub fn references(&self) -> Option<(&str, &str)> {
        let table = self.referenced_table_name.as_deref().filter(|s| !s.is_empty())?;
        let column = self.referenced_column_name.as_deref().filter(|s| !s.is_empty())?;
        Some((table, column))
    }
}

// ============================================================================
// Table
// ============================================================================

/// A table with its ordered columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    /// `None` when the provider did not report a table type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TableKind>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: Some(TableKind::Table),
            columns: Vec::new(),
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// First column with the given name, real columns first.
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn real_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.is_virtual)
    }

    pub fn virtual_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_virtual)
    }

    pub fn foreign_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_foreign_key())
    }
}
