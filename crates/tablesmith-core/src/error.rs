use thiserror::Error;

/// Core error type shared across tablesmith crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Database error or catalog access failure.
    #[error("database error: {0}")]
    Db(String),
    /// No visible relation matched the requested name.
    #[error("table not found: {0}")]
    NotFound(String),
    /// The table carries no primary, unique or exclusion constraint.
    #[error("no primary key on table {0}")]
    NoPrimaryKey(String),
}

impl Error {
    /// Whether the error only reports an absent primary key.
    pub fn is_missing_primary_key(&self) -> bool {
        matches!(self, Error::NoPrimaryKey(_))
    }
}

/// Convenience alias for results returned by tablesmith crates.
pub type Result<T> = std::result::Result<T, Error>;
