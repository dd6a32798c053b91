//! Junction table detection.

use crate::metadata::Table;

/// Classify a table as a many-to-many junction.
///
/// Counts columns with no constraint set at all as "other" and columns
/// whose set includes FOREIGN KEY as "fk". A column constrained only as
/// PRIMARY KEY (or with an empty set) counts as neither. The table is a
/// junction iff it has exactly two FK columns and no unconstrained ones.
pub fn is_junction_table(table: &Table) -> bool {
    let mut fk_count = 0usize;
    let mut other_count = 0usize;

    for column in &table.columns {
        match &column.constraints {
            None => other_count += 1,
            Some(set) if set.is_foreign_key() => fk_count += 1,
            Some(_) => {}
        }
    }

    fk_count == 2 && other_count == 0
}
