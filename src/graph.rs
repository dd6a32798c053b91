//! Relation graph view over an augmented schema.
//!
//! One node per table, one directed edge per virtual column: source is the
//! table owning the column, target is the table it references. Tables are
//! the only owned data; edges hold names, so junction links never form
//! ownership cycles.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::analysis::AugmentedSchema;
use crate::metadata::Cardinality;

/// Edge payload: the virtual column this edge was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationEdge {
    /// Name of the virtual column on the source table.
    pub column: String,
    /// Column on the target table the relation points at.
    pub target_column: String,
    pub cardinality: Cardinality,
    /// Junction table, for many-to-many shortcuts.
    pub junction: Option<String>,
}

/// Directed graph of navigable relations between tables.
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    graph: DiGraph<String, RelationEdge>,
    /// Index: table name → NodeIndex
    table_index: HashMap<String, NodeIndex>,
}

impl RelationGraph {
    /// Build the graph from an analysis result.
    ///
    /// Virtual columns pointing at a table absent from the schema are
    /// skipped.
    pub fn from_schema(schema: &AugmentedSchema) -> Self {
        let mut graph = Self::default();

        for table in schema.tables() {
            let idx = graph.graph.add_node(table.name.clone());
            graph.table_index.insert(table.name.clone(), idx);
        }

        for table in schema.tables() {
            let source = graph.table_index[&table.name];
            for column in table.virtual_columns() {
                let (Some((ref_table, ref_column)), Some(cardinality)) =
                    (column.references(), column.cardinality)
                else {
                    continue;
                };
                let Some(&target) = graph.table_index.get(ref_table) else {
                    continue;
                };

                graph.graph.add_edge(
                    source,
                    target,
                    RelationEdge {
                        column: column.name.clone(),
                        target_column: ref_column.to_string(),
                        cardinality,
                        junction: column.junction.as_ref().map(|j| j.junction_table.clone()),
                    },
                );
            }
        }

        graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_table(&self, table: &str) -> bool {
        self.table_index.contains_key(table)
    }

    /// Outgoing relations of `table` as `(target table, edge)` pairs, in
    /// insertion order.
    pub fn edges_from(&self, table: &str) -> Vec<(&str, &RelationEdge)> {
        let Some(&idx) = self.table_index.get(table) else {
            return Vec::new();
        };

        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.id(), self.graph[e.target()].as_str(), e.weight()))
            .collect();
        // petgraph walks adjacency lists newest-first
        edges.sort_by_key(|(id, _, _)| *id);
        edges.into_iter().map(|(_, t, w)| (t, w)).collect()
    }

    /// Distinct tables reachable from `table` in one hop, sorted by name.
    pub fn neighbors(&self, table: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self.edges_from(table).into_iter().map(|(t, _)| t).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
