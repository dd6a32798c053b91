//! Virtual column synthesis.
//!
//! Two passes feed the [`RelationAccumulator`]:
//!
//! - [`handle_foreign_keys`] mirrors every FK edge as a forward virtual
//!   column on the referencing table and a back-reference on the referenced
//!   table. It runs on every table, junction tables included.
//! - [`handle_many_to_many_relation`] gives each endpoint of a junction
//!   table a shortcut column naming the other endpoint.
//!
//! Nothing is attached here; the accumulator is merged once every table has
//! been processed.

use tracing::trace;

use crate::metadata::{Cardinality, Column, JunctionLink, Table};

use super::accumulator::RelationAccumulator;
use super::error::{AnalysisError, AnalysisResult};

/// The `(table, column)` an FK column references, or a fatal error.
fn references<'a>(table: &Table, column: &'a Column) -> AnalysisResult<(&'a str, &'a str)> {
    column
        .references()
        .ok_or_else(|| AnalysisError::malformed(&table.name, &column.name))
}

/// Synthesize forward and back-reference columns for every FK on `table`.
///
/// For `orders.customer_id -> customers.id` this queues:
/// - on `orders`: `customers` pointing at `(customers, id)`
/// - on `customers`: `orders` pointing at `(orders, customer_id)`
pub fn handle_foreign_keys(table: &Table, acc: &mut RelationAccumulator) -> AnalysisResult<()> {
    for column in table.foreign_key_columns() {
        let (ref_table, ref_column) = references(table, column)?;
        trace!(
            table = %table.name,
            column = %column.name,
            references = %format!("{}.{}", ref_table, ref_column),
            "foreign key relation"
        );

        let forward = Column::relation(ref_table, ref_table, ref_column, Cardinality::ManyToOne);
        acc.push(table.name.clone(), forward);

        let back = Column::relation(
            table.name.clone(),
            table.name.clone(),
            column.name.clone(),
            Cardinality::OneToMany,
        );
        acc.push(ref_table, back);
    }

    Ok(())
}

/// Synthesize the endpoint-to-endpoint shortcut columns of a junction table.
///
/// With FK columns `fk_a` and `fk_b` in table order, the table referenced by
/// `fk_a` receives a column naming `fk_b`'s table, and vice versa. Each
/// carries a [`JunctionLink`] whose corresponding column points back at the
/// receiving endpoint and whose opposing column points at the other one.
pub fn handle_many_to_many_relation(
    table: &Table,
    acc: &mut RelationAccumulator,
) -> AnalysisResult<()> {
    let fks: Vec<&Column> = table.foreign_key_columns().collect();
    let [fk_a, fk_b] = fks.as_slice() else {
        return Err(AnalysisError::InvalidJunctionShape {
            table: table.name.clone(),
            found: fks.len(),
        });
    };

    let (a_table, a_column) = references(table, fk_a)?;
    let (b_table, b_column) = references(table, fk_b)?;

    let col_for_b = Column::relation(b_table, b_table, b_column, Cardinality::ManyToMany)
        .with_junction(JunctionLink {
            junction_table: table.name.clone(),
            corresponding_column: fk_a.name.clone(),
            opposing_column: fk_b.name.clone(),
        });

    let col_for_a = Column::relation(a_table, a_table, a_column, Cardinality::ManyToMany)
        .with_junction(JunctionLink {
            junction_table: table.name.clone(),
            corresponding_column: fk_b.name.clone(),
            opposing_column: fk_a.name.clone(),
        });

    trace!(junction = %table.name, a = a_table, b = b_table, "many-to-many relation");

    acc.push(a_table, col_for_b);
    acc.push(b_table, col_for_a);

    Ok(())
}
