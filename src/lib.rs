//! # relmap
//!
//! Relation inference over relational schema metadata.
//!
//! ## Architecture
//!
//! relmap turns the raw table list of a database schema into an augmented
//! table list where every relation is a navigable *virtual column* on both
//! of its endpoints:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  MetadataProvider                        │
//! │   (Postgres query, JSON dump, in-memory tables)          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [fetch, single await]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Raw tables (real columns)                │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [junction detection + synthesis]
//! ┌─────────────────────────────────────────────────────────┐
//! │           RelationAccumulator (table → pending)          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [merge]
//! ┌─────────────────────────────────────────────────────────┐
//! │     AugmentedSchema  (real columns + virtual columns)    │
//! │                 └──► RelationGraph (petgraph view)       │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod analysis;
pub mod config;
pub mod graph;
pub mod metadata;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::analysis::{
        is_junction_table, AnalysisError, AnalysisResult, AugmentedSchema, RelationAccumulator,
        SchemaAnalyser,
    };
    pub use crate::graph::{RelationEdge, RelationGraph};
    pub use crate::metadata::{
        Column, Constraint, ConstraintSet, DefaultValue, JunctionLink, MetadataError,
        MetadataProvider, MetadataResult, Table, TableKind,
    };
}

pub use analysis::{AugmentedSchema, SchemaAnalyser};
pub use metadata::{Column, MetadataProvider, Table};
