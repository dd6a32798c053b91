#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use relmap::analysis::{analyse_tables, AugmentedSchema};
    use relmap::metadata::{Column, Table};

    fn tables() -> Vec<Table> {
        vec![
            Table::new("users")
                .column(Column::new("id").primary_key())
                .column(Column::new("manager_id").foreign_key("users", "id")),
            Table::new("groups").column(Column::new("id").primary_key()),
            Table::new("memberships")
                .column(Column::new("user_id").foreign_key("users", "id"))
                .column(Column::new("group_id").foreign_key("groups", "id")),
            Table::new("audit_log")
                .column(Column::new("id").primary_key())
                .column(Column::new("actor_id").foreign_key("users", "id"))
                .column(Column::new("message")),
        ]
    }

    /// Per table: real columns in order, virtual columns as a sorted multiset.
    fn fingerprint(schema: &AugmentedSchema) -> BTreeMap<String, (Vec<Column>, Vec<String>)> {
        schema
            .tables()
            .iter()
            .map(|table| {
                let real: Vec<Column> = table.real_columns().cloned().collect();
                let mut virtuals: Vec<String> = table
                    .virtual_columns()
                    .map(|c| serde_json::to_string(c).unwrap())
                    .collect();
                virtuals.sort();
                (table.name.clone(), (real, virtuals))
            })
            .collect()
    }

    /// Heap's algorithm, collecting every ordering of `items`.
    fn permutations(mut items: Vec<Table>) -> Vec<Vec<Table>> {
        let n = items.len();
        let mut out = vec![items.clone()];
        let mut c = vec![0usize; n];
        let mut i = 0;
        while i < n {
            if c[i] < i {
                if i % 2 == 0 {
                    items.swap(0, i);
                } else {
                    items.swap(c[i], i);
                }
                out.push(items.clone());
                c[i] += 1;
                i = 0;
            } else {
                c[i] = 0;
                i += 1;
            }
        }
        out
    }

    #[test]
    fn test_permutation_count() {
        assert_eq!(permutations(tables()).len(), 24);
    }

    #[test]
    fn test_result_independent_of_table_order() {
        let expected = fingerprint(&analyse_tables("public", tables()).unwrap());

        for ordering in permutations(tables()) {
            let names: Vec<_> = ordering.iter().map(|t| t.name.clone()).collect();
            let schema = analyse_tables("public", ordering).unwrap();
            assert_eq!(fingerprint(&schema), expected, "ordering {:?}", names);
            assert_eq!(schema.junction_tables(), ["memberships".to_string()]);
        }
    }

    #[test]
    fn test_self_reference_yields_both_directions() {
        let schema = analyse_tables("public", tables()).unwrap();
        let names: Vec<_> = schema
            .virtual_columns("users")
            .filter(|c| c.references().map(|(t, _)| t) == Some("users"))
            .map(|c| c.references().unwrap().1.to_string())
            .collect();

        // forward via users.id, back-reference via users.manager_id
        assert_eq!(names, vec!["id", "manager_id"]);
    }
}
