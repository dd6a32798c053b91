#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use relmap::analysis::{analyse_tables, AnalysisError, SchemaAnalyser};
    use relmap::metadata::{Cardinality, Column, StaticMetadataProvider, Table};

    fn shop() -> Vec<Table> {
        vec![
            Table::new("Customers")
                .column(Column::new("id").data_type("int4").primary_key())
                .column(Column::new("name").data_type("text")),
            Table::new("Orders")
                .column(Column::new("id").data_type("int4").primary_key())
                .column(Column::new("customer_id").data_type("int4").foreign_key("Customers", "id"))
                .column(Column::new("placed_at").data_type("timestamptz")),
        ]
    }

    fn blog() -> Vec<Table> {
        vec![
            Table::new("Posts")
                .column(Column::new("id").primary_key())
                .column(Column::new("title")),
            Table::new("Tags")
                .column(Column::new("id").primary_key())
                .column(Column::new("label")),
            Table::new("PostsTags")
                .column(Column::new("post_id").foreign_key("Posts", "id"))
                .column(Column::new("tag_id").foreign_key("Tags", "id")),
        ]
    }

    #[test]
    fn test_direct_foreign_key_relation() {
        let schema = analyse_tables("public", shop()).unwrap();

        let orders: Vec<_> = schema.virtual_columns("Orders").collect();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].name, "Customers");
        assert_eq!(orders[0].references(), Some(("Customers", "id")));
        assert_eq!(orders[0].cardinality, Some(Cardinality::ManyToOne));

        let customers: Vec<_> = schema.virtual_columns("Customers").collect();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].name, "Orders");
        assert_eq!(customers[0].references(), Some(("Orders", "customer_id")));
        assert_eq!(customers[0].cardinality, Some(Cardinality::OneToMany));
    }

    #[test]
    fn test_many_to_many_relation() {
        let schema = analyse_tables("blog", blog()).unwrap();
        assert_eq!(schema.junction_tables(), ["PostsTags".to_string()]);

        let posts: Vec<_> = schema.virtual_columns("Posts").collect();
        let names: Vec<_> = posts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Tags", "PostsTags"]);

        let shortcut = posts[0];
        let link = shortcut.junction.as_ref().unwrap();
        assert_eq!(link.junction_table, "PostsTags");
        assert_eq!(link.corresponding_column, "post_id");
        assert_eq!(link.opposing_column, "tag_id");
        assert_eq!(shortcut.references(), Some(("Tags", "id")));

        let resolved = schema.resolve_junction(shortcut).unwrap();
        assert_eq!(resolved.table.name, "PostsTags");
        assert_eq!(resolved.corresponding.name, "post_id");
        assert_eq!(resolved.opposing.name, "tag_id");
        assert_eq!(resolved.opposing.references(), Some(("Tags", "id")));

        let back = posts[1];
        assert!(back.junction.is_none());
        assert_eq!(back.references(), Some(("PostsTags", "post_id")));

        let tags: Vec<_> = schema.virtual_columns("Tags").collect();
        let names: Vec<_> = tags.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Posts", "PostsTags"]);
        let link = tags[0].junction.as_ref().unwrap();
        assert_eq!(link.corresponding_column, "tag_id");
        assert_eq!(link.opposing_column, "post_id");

        let junction: Vec<_> = schema.virtual_columns("PostsTags").collect();
        let names: Vec<_> = junction.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Posts", "Tags"]);
    }

    #[test]
    fn test_append_only() {
        let before = shop();
        let schema = analyse_tables("public", before.clone()).unwrap();

        for original in &before {
            let after = schema.table(&original.name).unwrap();
            assert_eq!(&after.columns[..original.columns.len()], &original.columns[..]);
            assert!(after.columns[original.columns.len()..]
                .iter()
                .all(|c| c.is_virtual));
        }
    }

    #[test]
    fn test_virtual_column_never_replaces_real_column() {
        // `Customers` is both a real column name and the forward relation name.
        let tables = vec![
            Table::new("Customers").column(Column::new("id").primary_key()),
            Table::new("Orders")
                .column(Column::new("Customers").foreign_key("Customers", "id")),
        ];

        let schema = analyse_tables("public", tables).unwrap();
        let orders = schema.table("Orders").unwrap();
        assert_eq!(orders.columns.len(), 2);
        assert!(!orders.columns[0].is_virtual);
        assert!(orders.columns[1].is_virtual);
        assert!(!orders.get_column("Customers").unwrap().is_virtual);
    }

    #[test]
    fn test_pk_only_column_keeps_junction() {
        let mut tables = blog();
        tables[2] = tables[2].clone().column(Column::new("id").primary_key());

        let schema = analyse_tables("blog", tables).unwrap();
        assert_eq!(schema.junction_tables(), ["PostsTags".to_string()]);
        assert!(schema
            .virtual_columns("Posts")
            .any(|c| c.cardinality == Some(Cardinality::ManyToMany)));
    }

    #[test]
    fn test_payload_column_disqualifies_junction() {
        let mut tables = blog();
        tables[2] = tables[2].clone().column(Column::new("added_at"));

        let schema = analyse_tables("blog", tables).unwrap();
        assert!(schema.junction_tables().is_empty());
        assert!(schema.virtual_columns("Posts").all(|c| c.junction.is_none()));
        assert_eq!(schema.virtual_column_count(), 4);
    }

    #[tokio::test]
    async fn test_missing_reference_aborts_run() {
        let mut tables = shop();
        tables[1].columns[1].referenced_table_name = Some(String::new());
        let provider = StaticMetadataProvider::new().with_schema("public", tables);

        let mut analyser = SchemaAnalyser::new("public", provider);
        let err = analyser.run().await.unwrap_err();

        assert!(matches!(err, AnalysisError::MalformedForeignKey { .. }));
        assert_eq!(err.table(), Some("Orders"));
        assert!(err.to_string().contains("Orders.customer_id"));
        assert!(analyser.last_result().is_none());
    }

    #[tokio::test]
    async fn test_empty_schema_is_not_an_error() {
        let provider = StaticMetadataProvider::new().with_schema("empty", Vec::new());
        let mut analyser = SchemaAnalyser::new("empty", provider);
        assert!(analyser.run().await.unwrap().is_empty());

        let mut absent = SchemaAnalyser::new("absent", StaticMetadataProvider::new());
        assert!(absent.run().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fresh_run_isolation() {
        let provider = StaticMetadataProvider::new().with_schema("blog", blog());
        let mut analyser = SchemaAnalyser::new("blog", provider);

        let first = analyser.run().await.unwrap().clone();
        let second = analyser.run().await.unwrap().clone();

        assert_eq!(first, second);
        assert_eq!(second.virtual_column_count(), 6);
        assert_eq!(second.table("Posts").unwrap().columns.len(), 4);
    }

    #[test]
    fn test_reanalysing_augmented_tables_is_rejected() {
        let once = analyse_tables("blog", blog()).unwrap();
        let err = analyse_tables("blog", once.into_tables()).unwrap_err();
        assert!(matches!(err, AnalysisError::AlreadyAugmented { .. }));
    }

    #[test]
    fn test_summary_rendering() {
        let schema = analyse_tables("blog", blog()).unwrap();
        let summary = schema.to_string();

        assert_snapshot!(summary.trim_end(), @r"
        schema blog (3 tables, 6 virtual columns)
        Posts [BASE TABLE]
          id
          title
          Tags -> Tags.id (N:N via PostsTags)
          PostsTags -> PostsTags.post_id (1:N)
        Tags [BASE TABLE]
          id
          label
          Posts -> Posts.id (N:N via PostsTags)
          PostsTags -> PostsTags.tag_id (1:N)
        PostsTags [BASE TABLE]
          post_id -> Posts.id
          tag_id -> Tags.id
          Posts -> Posts.id (N:1)
          Tags -> Tags.id (N:1)
        ");
    }

    #[test]
    fn test_summary_without_table_kind() {
        let mut notes = Table::new("notes").column(Column::new("id").primary_key());
        notes.kind = None;

        let schema = analyse_tables("misc", vec![notes]).unwrap();
        let summary = schema.to_string();

        assert_snapshot!(summary.trim_end(), @r"
        schema misc (1 tables, 0 virtual columns)
        notes
          id
        ");
    }
}
