use async_trait::async_trait;

use tablesmith_core::{CatalogColumn, ForeignKeyConstraint, PrimaryKeyConstraint, Result};

/// Read-only access to a database catalog.
///
/// Implementations run one fixed query per method and hand back structured
/// rows; they never interpret constraint text.
#[async_trait]
pub trait CatalogSource {
    /// Returns the engine identifier (e.g. `postgres`).
    fn engine(&self) -> &'static str;

    /// Names of the visible user tables, ordered by name.
    async fn table_names(&self) -> Result<Vec<String>>;

    /// Object identifier and name of the visible table called `name`.
    async fn table_identity(&self, name: &str) -> Result<Option<(u32, String)>>;

    /// Columns of the table in attribute-number order.
    async fn columns(&self, oid: u32) -> Result<Vec<CatalogColumn>>;

    /// First primary, unique or exclusion constraint of the table.
    async fn primary_key(&self, oid: u32) -> Result<Option<PrimaryKeyConstraint>>;

    /// Foreign key constraints of the table, ordered by name.
    async fn foreign_keys(&self, oid: u32) -> Result<Vec<ForeignKeyConstraint>>;
}
