//! SQLite error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration {version} ({name}) failed: {error}")]
    MigrationFailed {
        version: i32,
        name: String,
        error: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A stored value could not be mapped back to its domain type
    #[error("Invalid stored value for {column}: {value}")]
    InvalidData { column: &'static str, value: String },
}

impl SqliteError {
    /// Map constraint violations on write to `Conflict`, everything else passes through.
    ///
    /// Unique violations come from duplicate organization names or user emails.
    /// Foreign key violations mean a parent vanished between validation and write.
    pub fn from_write(e: sqlx::Error, conflict_message: impl Into<String>) -> Self {
        let is_constraint = e.as_database_error().is_some_and(|db| {
            db.is_unique_violation() || db.is_foreign_key_violation()
        });
        if is_constraint {
            Self::Conflict(conflict_message.into())
        } else {
            Self::Database(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_failed_error_display() {
        let err = SqliteError::MigrationFailed {
            version: 2,
            name: "index_requirements_cluster".to_string(),
            error: "syntax error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Migration 2 (index_requirements_cluster) failed: syntax error"
        );
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let sqlite_err: SqliteError = io_err.into();
        assert!(sqlite_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_invalid_data_display() {
        let err = SqliteError::InvalidData {
            column: "projects.status",
            value: "deleted".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid stored value for projects.status: deleted"
        );
    }

    #[test]
    fn test_from_write_passes_through_non_constraint_errors() {
        let err = SqliteError::from_write(sqlx::Error::RowNotFound, "duplicate");
        assert!(matches!(err, SqliteError::Database(sqlx::Error::RowNotFound)));
    }
}
