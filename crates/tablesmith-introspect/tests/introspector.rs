use std::collections::{BTreeMap, HashSet};

use anyhow::Result;
use async_trait::async_trait;
use tablesmith_core::{CatalogColumn, Error, ForeignKeyConstraint, PrimaryKeyConstraint};
use tablesmith_introspect::{CatalogSource, Introspector};

#[derive(Default)]
struct FakeTable {
    oid: u32,
    columns: Vec<CatalogColumn>,
    primary_key: Option<PrimaryKeyConstraint>,
    foreign_keys: Vec<ForeignKeyConstraint>,
}

#[derive(Default)]
struct FakeCatalog {
    tables: BTreeMap<String, FakeTable>,
    fail_listing: bool,
    fail_columns: HashSet<u32>,
    fail_foreign_keys: HashSet<u32>,
}

impl FakeCatalog {
    fn find(&self, oid: u32) -> Option<&FakeTable> {
        self.tables.values().find(|table| table.oid == oid)
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    fn engine(&self) -> &'static str {
        "fake"
    }

    async fn table_names(&self) -> tablesmith_core::Result<Vec<String>> {
        if self.fail_listing {
            return Err(Error::Db("permission denied for pg_class".to_string()));
        }
        Ok(self.tables.keys().cloned().collect())
    }

    async fn table_identity(&self, name: &str) -> tablesmith_core::Result<Option<(u32, String)>> {
        Ok(self
            .tables
            .get(name)
            .map(|table| (table.oid, name.to_string())))
    }

    async fn columns(&self, oid: u32) -> tablesmith_core::Result<Vec<CatalogColumn>> {
        if self.fail_columns.contains(&oid) {
            return Err(Error::Db("column query failed".to_string()));
        }
        Ok(self.find(oid).map(|t| t.columns.clone()).unwrap_or_default())
    }

    async fn primary_key(&self, oid: u32) -> tablesmith_core::Result<Option<PrimaryKeyConstraint>> {
        Ok(self.find(oid).and_then(|t| t.primary_key.clone()))
    }

    async fn foreign_keys(&self, oid: u32) -> tablesmith_core::Result<Vec<ForeignKeyConstraint>> {
        if self.fail_foreign_keys.contains(&oid) {
            return Err(Error::Db("constraint query failed".to_string()));
        }
        Ok(self
            .find(oid)
            .map(|t| t.foreign_keys.clone())
            .unwrap_or_default())
    }
}

fn shop_catalog() -> FakeCatalog {
    let mut catalog = FakeCatalog::default();
    catalog.tables.insert(
        "users".to_string(),
        FakeTable {
            oid: 100,
            columns: vec![
                CatalogColumn::new("id", "bigint", false),
                CatalogColumn::new("email", "text", false),
            ],
            primary_key: Some(PrimaryKeyConstraint {
                name: "users_pkey".to_string(),
                definition: Some("PRIMARY KEY (id)".to_string()),
            }),
            foreign_keys: Vec::new(),
        },
    );
    catalog.tables.insert(
        "audit_log".to_string(),
        FakeTable {
            oid: 200,
            columns: vec![
                CatalogColumn::new("user_id", "bigint", true),
                CatalogColumn::new("message", "text", true),
            ],
            primary_key: None,
            foreign_keys: vec![ForeignKeyConstraint {
                name: "audit_log_user_id_fkey".to_string(),
                definition: "FOREIGN KEY (user_id) REFERENCES users(id)".to_string(),
            }],
        },
    );
    catalog
}

#[tokio::test]
async fn lists_tables_in_catalog_order() {
    let introspector = Introspector::new(shop_catalog());
    assert_eq!(introspector.list_tables().await, vec!["audit_log", "users"]);
    assert_eq!(introspector.catalog().engine(), "fake");
}

#[tokio::test]
async fn failed_listing_yields_no_tables() {
    let mut catalog = shop_catalog();
    catalog.fail_listing = true;
    let introspector = Introspector::new(catalog);
    assert!(introspector.list_tables().await.is_empty());
}

#[tokio::test]
async fn describes_table_with_primary_key() -> Result<()> {
    let introspector = Introspector::new(shop_catalog());
    let users = introspector.describe_table("users").await?;

    assert_eq!(users.oid, 100);
    let names: Vec<&str> = users.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "email"]);
    assert_eq!(
        users.primary_key.as_ref().and_then(|pk| pk.definition.as_deref()),
        Some("PRIMARY KEY (id)")
    );
    assert!(users.foreign_keys.is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_primary_key_does_not_stop_description() -> Result<()> {
    let introspector = Introspector::new(shop_catalog());

    let mut audit = introspector.resolve_table("audit_log").await?;
    let err = introspector
        .load_primary_key(&mut audit)
        .await
        .expect_err("no primary key");
    assert!(err.is_missing_primary_key());

    let audit = introspector.describe_table("audit_log").await?;
    assert!(audit.primary_key.is_none());
    assert_eq!(audit.foreign_keys.len(), 1);
    Ok(())
}

#[tokio::test]
async fn unknown_table_is_not_found() {
    let introspector = Introspector::new(shop_catalog());
    let err = introspector
        .describe_table("ghosts")
        .await
        .expect_err("unknown table");
    assert!(matches!(err, Error::NotFound(name) if name == "ghosts"));
}

#[tokio::test]
async fn query_failures_abort_the_table() {
    let mut catalog = shop_catalog();
    catalog.fail_columns.insert(100);
    catalog.fail_foreign_keys.insert(200);
    let introspector = Introspector::new(catalog);

    let err = introspector
        .describe_table("users")
        .await
        .expect_err("column failure");
    assert!(matches!(err, Error::Db(_)));

    let err = introspector
        .describe_table("audit_log")
        .await
        .expect_err("foreign key failure");
    assert!(matches!(err, Error::Db(_)));
}
