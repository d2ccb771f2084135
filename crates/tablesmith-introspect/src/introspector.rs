use tablesmith_core::{Error, Result, TableDescription};

use crate::catalog::CatalogSource;

/// Drives the catalog queries that describe one table at a time.
#[derive(Debug)]
pub struct Introspector<C> {
    catalog: C,
}

impl<C: CatalogSource> Introspector<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Names of the tables to describe.
    ///
    /// A failing listing query is logged and yields an empty list, exactly
    /// like a catalog without tables.
    pub async fn list_tables(&self) -> Vec<String> {
        match self.catalog.table_names().await {
            Ok(names) => names,
            Err(err) => {
                tracing::warn!(event = "table_listing_failed", error = %err);
                Vec::new()
            }
        }
    }

    /// Look up the object identifier of a visible table.
    pub async fn resolve_table(&self, name: &str) -> Result<TableDescription> {
        match self.catalog.table_identity(name).await? {
            Some((oid, name)) => Ok(TableDescription::new(oid, name)),
            None => Err(Error::NotFound(name.to_string())),
        }
    }

    pub async fn load_columns(&self, table: &mut TableDescription) -> Result<()> {
        table.columns = self.catalog.columns(table.oid).await?;
        Ok(())
    }

    /// Attach the first primary, unique or exclusion constraint.
    ///
    /// Fails with [`Error::NoPrimaryKey`] when the table has none; callers
    /// treat that as an informational absence.
    pub async fn load_primary_key(&self, table: &mut TableDescription) -> Result<()> {
        match self.catalog.primary_key(table.oid).await? {
            Some(pk) => {
                table.primary_key = Some(pk);
                Ok(())
            }
            None => Err(Error::NoPrimaryKey(table.name.clone())),
        }
    }

    pub async fn load_foreign_keys(&self, table: &mut TableDescription) -> Result<()> {
        table.foreign_keys = self.catalog.foreign_keys(table.oid).await?;
        Ok(())
    }

    /// Resolve a table and load its columns and raw constraints.
    ///
    /// Any query failure aborts the description; a missing primary key does
    /// not.
    pub async fn describe_table(&self, name: &str) -> Result<TableDescription> {
        let mut table = self.resolve_table(name).await?;
        self.load_columns(&mut table).await?;

        let primary_key = match self.load_primary_key(&mut table).await {
            Ok(()) => table
                .primary_key
                .as_ref()
                .map(|pk| {
                    format!(
                        "{}::{}",
                        pk.name,
                        pk.definition.as_deref().unwrap_or_default()
                    )
                })
                .unwrap_or_default(),
            Err(err) if err.is_missing_primary_key() => "NoPrimaryKey".to_string(),
            Err(err) => return Err(err),
        };

        self.load_foreign_keys(&mut table).await?;
        let foreign_keys = if table.foreign_keys.is_empty() {
            "NoForeignKeys".to_string()
        } else {
            table.foreign_keys.len().to_string()
        };

        tracing::info!(
            event = "table_described",
            oid = table.oid,
            table = %table.name,
            columns = table.columns.len(),
            primary_key = %primary_key,
            foreign_keys = %foreign_keys
        );

        Ok(table)
    }
}
