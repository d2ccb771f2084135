//! Core contracts and helpers for tablesmith.
//!
//! This crate defines the table model shared by the introspector and the
//! renderers, together with the pure pieces of the pipeline: type mapping,
//! identifier casing and constraint-definition parsing.

pub mod constraints;
pub mod error;
pub mod naming;
pub mod redaction;
pub mod schema;
pub mod types;

pub use constraints::{ConstraintParser, ParseError, PostgresConstraintParser, resolve_table};
pub use error::{Error, Result};
pub use naming::{snake_to_upper_camel, to_lower_camel};
pub use redaction::{RedactedConnection, redact_connection_string};
pub use schema::{
    CatalogColumn, Column, ForeignKey, ForeignKeyConstraint, PrimaryKeyConstraint, Table,
    TableDescription,
};
pub use types::{UNKNOWN_TYPE_TAG, display_format, target_type};
