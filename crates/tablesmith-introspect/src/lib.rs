//! Catalog introspection for tablesmith.

pub mod catalog;
pub mod introspector;
pub mod postgres;

pub use catalog::CatalogSource;
pub use introspector::Introspector;
pub use postgres::PostgresCatalog;
