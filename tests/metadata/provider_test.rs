#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use relmap::analysis::SchemaAnalyser;
    use relmap::metadata::{
        Cardinality, Constraint, JsonFileProvider, MetadataError, MetadataProvider, TableKind,
    };
    use serde_json::json;

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Write `value` to a fresh file under the temp dir.
    fn dump(value: serde_json::Value) -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "relmap-provider-{}-{}.json",
            std::process::id(),
            n
        ));
        std::fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();
        path
    }

    fn catalog() -> serde_json::Value {
        json!([
            {
                "table_name": "customers",
                "table_type": "BASE TABLE",
                "structure": [
                    {
                        "column_name": "id",
                        "type": "integer",
                        "default": "nextval('customers_id_seq'::regclass)",
                        "is_nullable": "NO",
                        "is_updatable": "YES",
                        "referential_constraints": ["PRIMARY KEY"],
                        "referenced_table_name": null,
                        "referenced_column_name": null
                    },
                    {
                        "column_name": "email",
                        "type": "text",
                        "is_nullable": "YES",
                        "referential_constraints": null
                    }
                ]
            },
            {
                "table_name": "orders",
                "table_type": "BASE TABLE",
                "structure": [
                    {
                        "column_name": "id",
                        "type": "integer",
                        "referential_constraints": ["PRIMARY KEY"]
                    },
                    {
                        "column_name": "customer_id",
                        "type": "integer",
                        "default": 0,
                        "referential_constraints": ["FOREIGN KEY"],
                        "referenced_table_name": "customers",
                        "referenced_column_name": "id"
                    }
                ]
            },
            {
                "table_name": "order_totals",
                "table_type": "VIEW",
                "structure": []
            }
        ])
    }

    #[tokio::test]
    async fn test_json_array_dump() {
        let path = dump(catalog());
        let tables = JsonFileProvider::new(&path)
            .fetch("anything")
            .await
            .unwrap()
            .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(tables.len(), 3);
        let customers = &tables[0];
        assert_eq!(customers.kind, Some(TableKind::Table));
        assert_eq!(customers.columns[0].nullable, Some(false));
        assert!(customers.columns[0].is_primary_key());
        assert!(customers.columns[1].constraints.is_none());

        let customer_id = &tables[1].columns[1];
        assert!(customer_id
            .constraints
            .as_ref()
            .unwrap()
            .contains(Constraint::ForeignKey));
        assert_eq!(customer_id.references(), Some(("customers", "id")));
        assert_eq!(tables[2].kind, Some(TableKind::View));
    }

    #[tokio::test]
    async fn test_json_schema_keyed_dump() {
        let path = dump(json!({ "sales": catalog(), "archive": null }));
        let provider = JsonFileProvider::new(&path);

        let sales = provider.fetch("sales").await.unwrap().unwrap();
        assert_eq!(sales.len(), 3);
        assert!(provider.fetch("archive").await.unwrap().is_none());
        assert!(provider.fetch("missing").await.unwrap().is_none());
        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_json_null_dump() {
        let path = dump(serde_json::Value::Null);
        let tables = JsonFileProvider::new(&path).fetch("public").await.unwrap();
        std::fs::remove_file(&path).ok();
        assert!(tables.is_none());
    }

    #[tokio::test]
    async fn test_unknown_constraint_rejected() {
        let path = dump(json!([{
            "table_name": "t",
            "structure": [{ "column_name": "c", "referential_constraints": ["UNIQUE"] }]
        }]));
        let err = JsonFileProvider::new(&path).fetch("public").await.unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, MetadataError::UnknownConstraint { ref value, .. } if value == "UNIQUE"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let provider = JsonFileProvider::new("/definitely/not/here/dump.json");
        let err = provider.fetch("public").await.unwrap_err();
        assert!(matches!(err, MetadataError::Io { .. }));
    }

    #[tokio::test]
    async fn test_analyse_json_dump() {
        let path = dump(catalog());
        let mut analyser = SchemaAnalyser::new("public", JsonFileProvider::new(&path));
        let schema = analyser.run().await.unwrap();
        std::fs::remove_file(&path).ok();

        let back: Vec<_> = schema.virtual_columns("customers").collect();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].references(), Some(("orders", "customer_id")));
        assert_eq!(back[0].cardinality, Some(Cardinality::OneToMany));
        assert_eq!(schema.virtual_columns("order_totals").count(), 0);
        assert!(schema.junction_tables().is_empty());
    }
}
