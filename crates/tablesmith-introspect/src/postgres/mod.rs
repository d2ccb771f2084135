use async_trait::async_trait;
use sqlx::PgPool;

use tablesmith_core::{CatalogColumn, ForeignKeyConstraint, PrimaryKeyConstraint, Result};

use crate::catalog::CatalogSource;

mod queries;

/// Catalog source backed by the Postgres system catalogs.
#[derive(Debug, Clone)]
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    /// Create a new catalog source using a pre-configured pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogSource for PostgresCatalog {
    fn engine(&self) -> &'static str {
        "postgres"
    }

    async fn table_names(&self) -> Result<Vec<String>> {
        queries::list_tables(&self.pool).await
    }

    async fn table_identity(&self, name: &str) -> Result<Option<(u32, String)>> {
        queries::get_table_identity(&self.pool, name).await
    }

    async fn columns(&self, oid: u32) -> Result<Vec<CatalogColumn>> {
        let rows = queries::list_columns(&self.pool, oid).await?;
        Ok(rows
            .into_iter()
            .map(|row| CatalogColumn::new(row.name, row.data_type, row.is_nullable))
            .collect())
    }

    async fn primary_key(&self, oid: u32) -> Result<Option<PrimaryKeyConstraint>> {
        let row = queries::get_primary_key(&self.pool, oid).await?;
        Ok(row.map(|row| PrimaryKeyConstraint {
            name: row.index_name,
            definition: row.definition,
        }))
    }

    async fn foreign_keys(&self, oid: u32) -> Result<Vec<ForeignKeyConstraint>> {
        let rows = queries::list_foreign_keys(&self.pool, oid).await?;
        Ok(rows
            .into_iter()
            .map(|row| ForeignKeyConstraint {
                name: row.name,
                definition: row.definition,
            })
            .collect())
    }
}
