//! SQLite database service
//!
//! The single transactional store for organizations, users, clients, projects,
//! personas, requirements and conversation turns. File databases run with:
//! - WAL mode for concurrent reads during writes
//! - In-memory temp storage for fast queries
//! - Periodic WAL checkpointing
//!
//! `sqlite::memory:` databases use a single long-lived connection so every
//! query sees the same private database.

pub mod error;
mod migrations;
pub mod repositories;
mod repository_impl;
pub mod schema;

pub use error::SqliteError;
pub use sqlx::SqlitePool;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use sqlx::ConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::log::LevelFilter;

use crate::core::config::DatabaseLocation;
use crate::core::constants::{
    SQLITE_BUSY_TIMEOUT_SECS, SQLITE_CACHE_SIZE, SQLITE_CHECKPOINT_INTERVAL_SECS,
    SQLITE_DB_FILENAME, SQLITE_MAX_CONNECTIONS, SQLITE_WAL_AUTOCHECKPOINT,
};
use crate::core::storage::{AppStorage, DataSubdir};

/// SQLite database service
///
/// Handles database initialization, connection pooling, and background tasks.
/// Should be created once at startup and shared across all modules.
pub struct SqliteService {
    pool: SqlitePool,
    in_memory: bool,
}

impl SqliteService {
    /// Initialize the database service
    ///
    /// Creates the database file if it doesn't exist, configures connection
    /// options with optimized pragmas, and runs any pending migrations.
    pub async fn init(
        location: &DatabaseLocation,
        storage: &AppStorage,
    ) -> Result<Self, SqliteError> {
        match location {
            DatabaseLocation::DataDir => {
                let db_path = storage.subdir(DataSubdir::Sqlite).join(SQLITE_DB_FILENAME);
                Self::open_file(&db_path).await
            }
            DatabaseLocation::File(path) => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    tokio::fs::create_dir_all(parent).await?;
                }
                Self::open_file(path).await
            }
            DatabaseLocation::Memory => Self::in_memory().await,
        }
    }

    async fn open_file(db_path: &Path) -> Result<Self, SqliteError> {
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(SQLITE_BUSY_TIMEOUT_SECS))
            .pragma("cache_size", SQLITE_CACHE_SIZE)
            .pragma("temp_store", "MEMORY")
            .pragma("wal_autocheckpoint", SQLITE_WAL_AUTOCHECKPOINT)
            .log_statements(LevelFilter::Trace);

        let pool = SqlitePoolOptions::new()
            .max_connections(SQLITE_MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        migrations::run_migrations(&pool).await?;

        tracing::debug!(path = %db_path.display(), "SqliteService initialized");
        Ok(Self {
            pool,
            in_memory: false,
        })
    }

    /// Open a private in-memory database with the full schema applied
    pub async fn in_memory() -> Result<Self, SqliteError> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true)
            .log_statements(LevelFilter::Trace);

        // Each connection to :memory: is its own database, so pin exactly one
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        migrations::run_migrations(&pool).await?;

        tracing::debug!("SqliteService initialized in memory");
        Ok(Self {
            pool,
            in_memory: true,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn is_in_memory(&self) -> bool {
        self.in_memory
    }

    pub async fn checkpoint(&self) -> Result<(), SqliteError> {
        if self.in_memory {
            return Ok(());
        }
        sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
            .execute(&self.pool)
            .await?;
        tracing::debug!("WAL checkpoint completed");
        Ok(())
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("SQLite pool closed");
    }

    pub fn start_checkpoint_task(
        self: &Arc<Self>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let db = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(SQLITE_CHECKPOINT_INTERVAL_SECS));
            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::debug!("WAL checkpoint task shutting down");
                            break;
                        }
                    }
                    _ = interval.tick() => {
                        if let Err(e) = db.checkpoint().await {
                            tracing::warn!("WAL checkpoint failed: {}", e);
                        }
                    }
                }
            }
        })
    }
}

/// Single-connection in-memory pool with the schema applied, for repository tests
#[cfg(test)]
pub(crate) async fn setup_test_pool() -> SqlitePool {
    SqliteService::in_memory()
        .await
        .expect("in-memory database")
        .pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_has_schema() {
        let service = SqliteService::in_memory().await.unwrap();
        assert!(service.is_in_memory());

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'projects'",
        )
        .fetch_one(service.pool())
        .await
        .unwrap();
        assert_eq!(count, 1);

        service.checkpoint().await.unwrap();
        service.close().await;
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let pool = setup_test_pool().await;
        let result = sqlx::query(
            "INSERT INTO projects (name, status, organization_id, created_at) VALUES ('p', 'active', 999, 0)",
        )
        .execute(&pool)
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_init_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let storage = AppStorage::init_for_test(dir.path().to_path_buf());
        let path = dir.path().join("nested").join("test.db");

        let service = SqliteService::init(&DatabaseLocation::File(path.clone()), &storage)
            .await
            .unwrap();
        assert!(!service.is_in_memory());
        assert!(path.exists());
        service.checkpoint().await.unwrap();
        service.close().await;
    }
}
