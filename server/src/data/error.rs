//! Unified error type for data layer
//!
//! Backend-specific errors are folded into [`DataError`] so the domain layer
//! never depends on a particular store.

use thiserror::Error;

/// Unified error type for data layer operations
#[derive(Error, Debug)]
pub enum DataError {
    /// SQLite database error (transactional backend)
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    /// Migration failed
    #[error("Migration {version} ({name}) failed on {backend}: {error}")]
    MigrationFailed {
        backend: &'static str,
        version: i32,
        name: String,
        error: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Conflict error (duplicate entry, parent removed concurrently)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Stored value that no longer maps to a domain type
    #[error("Invalid stored value for {column}: {value}")]
    InvalidData { column: &'static str, value: String },
}

/// Convert from the SQLite backend error type
impl From<crate::data::sqlite::SqliteError> for DataError {
    fn from(e: crate::data::sqlite::SqliteError) -> Self {
        use crate::data::sqlite::SqliteError;

        match e {
            SqliteError::Database(e) => Self::Sqlite(e),
            SqliteError::MigrationFailed {
                version,
                name,
                error,
            } => Self::MigrationFailed {
                backend: "sqlite",
                version,
                name,
                error,
            },
            SqliteError::Io(e) => Self::Io(e),
            SqliteError::Conflict(msg) => Self::Conflict(msg),
            SqliteError::InvalidData { column, value } => Self::InvalidData { column, value },
        }
    }
}
