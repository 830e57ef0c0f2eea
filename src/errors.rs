// errors.rs
use thiserror::Error;

/// Errors raised by the storage layer.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Open DB failed: {0}")]
    Open(String),

    #[error("Failed to apply schema: {0}")]
    Schema(String),

    #[error("Invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Record has {found} values but table expects {expected} columns")]
    Arity { expected: usize, found: usize },

    #[error("Database Error: {0}")]
    Query(#[from] rusqlite::Error),
}
