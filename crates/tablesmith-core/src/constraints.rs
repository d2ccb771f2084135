use regex::Regex;
use thiserror::Error;

use crate::schema::{Column, ForeignKey, Table, TableDescription};

/// Failure to recover a column name from a constraint definition.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The definition does not follow the expected grammar.
    #[error("unrecognized foreign key definition: {0}")]
    NoMatch(String),
    /// The matching pattern itself failed to compile.
    #[error("invalid constraint pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Recovers key columns from catalog constraint definition text.
///
/// Key membership is only available as rendered constraint text, so every
/// dialect supplies its own textual grammar behind this trait.
pub trait ConstraintParser {
    /// Column named by a single-column primary key definition.
    fn primary_key_column(&self, definition: &str) -> Option<String>;

    /// Local column named by a single-column foreign key definition.
    fn foreign_key_column(&self, definition: &str) -> Result<String, ParseError>;
}

/// Parser for `pg_get_constraintdef` output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresConstraintParser;

impl ConstraintParser for PostgresConstraintParser {
    fn primary_key_column(&self, definition: &str) -> Option<String> {
        // `PRIMARY KEY (id)` becomes `PRIMARY KEY 'id'`; a column list such as
        // `'a, b'` cannot match the single-token pattern.
        let quoted = definition.replace(['(', ')'], "'");
        let re = Regex::new(r"PRIMARY KEY '([a-zA-Z0-9_-]+)'").ok()?;
        let caps = re.captures(&quoted)?;
        caps.get(1).map(|column| column.as_str().to_string())
    }

    fn foreign_key_column(&self, definition: &str) -> Result<String, ParseError> {
        let re = Regex::new(r"FOREIGN KEY \(([a-zA-Z0-9_-]+)\)")?;
        re.captures(definition)
            .and_then(|caps| caps.get(1))
            .map(|column| column.as_str().to_string())
            .ok_or_else(|| ParseError::NoMatch(definition.to_string()))
    }
}

/// Build the final table, flagging primary and foreign key columns.
///
/// Parse failures never abort resolution: an unmatched primary key leaves no
/// column flagged, and each unmatched foreign key is logged and left
/// unresolved.
pub fn resolve_table(description: TableDescription, parser: &dyn ConstraintParser) -> Table {
    let primary_column = description
        .primary_key
        .as_ref()
        .and_then(|pk| pk.definition.as_deref())
        .and_then(|definition| parser.primary_key_column(definition));

    let foreign_keys: Vec<ForeignKey> = description
        .foreign_keys
        .into_iter()
        .map(|fk| {
            let column = match parser.foreign_key_column(&fk.definition) {
                Ok(column) => Some(column),
                Err(err) => {
                    tracing::warn!(
                        event = "foreign_key_unresolved",
                        table = %description.name,
                        constraint = %fk.name,
                        error = %err
                    );
                    None
                }
            };
            ForeignKey {
                name: fk.name,
                definition: fk.definition,
                column,
            }
        })
        .collect();

    // Only the first column carrying the parsed name is flagged.
    let mut primary_taken = false;
    let columns = description
        .columns
        .into_iter()
        .map(|col| {
            let is_primary = !primary_taken && primary_column.as_deref() == Some(col.name.as_str());
            primary_taken |= is_primary;
            let is_foreign = foreign_keys
                .iter()
                .any(|fk| fk.column.as_deref() == Some(col.name.as_str()));
            Column {
                name: col.name,
                data_type: col.data_type,
                is_nullable: col.is_nullable,
                is_primary,
                is_foreign,
            }
        })
        .collect();

    Table {
        oid: description.oid,
        name: description.name,
        columns,
        primary_key: description.primary_key,
        foreign_keys,
    }
}
