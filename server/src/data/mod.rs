//! Data storage layer
//!
//! - `sqlite` - Transactional database for organizations, projects and their children
//! - `types` - Row, filter and change-set types shared with the domain layer
//! - `traits` - Repository trait the domain layer is written against
//! - `error` - Unified error type for the data layer

pub mod error;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export backend-specific services
pub use sqlite::SqliteService;

// Re-export unified error type
pub use error::DataError;

// Re-export repository trait
pub use traits::TransactionalRepository;

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::config::DatabaseLocation;
use crate::core::storage::AppStorage;

/// Transactional database service enum
///
/// Wraps the underlying backend-specific service and provides a unified
/// interface for all transactional operations. Services are stored as Arc
/// so repositories can be handed out cheaply.
pub enum TransactionalService {
    /// SQLite backend (embedded)
    Sqlite(Arc<SqliteService>),
}

impl TransactionalService {
    /// Initialize the transactional service for the configured location
    pub async fn init(
        location: &DatabaseLocation,
        storage: &AppStorage,
    ) -> Result<Self, DataError> {
        let service = SqliteService::init(location, storage).await?;
        Ok(Self::Sqlite(Arc::new(service)))
    }

    /// Private in-memory store with the schema applied
    pub async fn in_memory() -> Result<Self, DataError> {
        let service = SqliteService::in_memory().await?;
        Ok(Self::Sqlite(Arc::new(service)))
    }

    /// Get the SQLite pool (for direct access when needed)
    pub fn pool(&self) -> &sqlx::SqlitePool {
        match self {
            Self::Sqlite(s) => s.pool(),
        }
    }

    /// Run a WAL checkpoint
    pub async fn checkpoint(&self) -> Result<(), DataError> {
        match self {
            Self::Sqlite(s) => s.checkpoint().await.map_err(Into::into),
        }
    }

    /// Close the database connection gracefully
    pub async fn close(&self) {
        match self {
            Self::Sqlite(s) => s.close().await,
        }
    }

    /// Start the background checkpoint task
    pub fn start_checkpoint_task(&self, shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
        match self {
            Self::Sqlite(s) => s.start_checkpoint_task(shutdown_rx),
        }
    }

    /// Get the repository trait object for data operations
    pub fn repository(&self) -> Box<dyn TransactionalRepository + Send + Sync> {
        match self {
            Self::Sqlite(s) => Box::new(Arc::clone(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_repository_round_trip() {
        let service = TransactionalService::in_memory().await.unwrap();
        let repo = service.repository();

        let org = repo.create_organization("Acme").await.unwrap();
        let fetched = repo.get_organization(org.id).await.unwrap();
        assert_eq!(fetched, Some(org));

        service.checkpoint().await.unwrap();
        service.close().await;
    }

    #[tokio::test]
    async fn test_conflict_surfaces_as_data_error() {
        let service = TransactionalService::in_memory().await.unwrap();
        let repo = service.repository();

        repo.create_user("a@b.test", None).await.unwrap();
        let err = repo.create_user("a@b.test", None).await.unwrap_err();
        assert!(matches!(err, DataError::Conflict(_)));
    }
}
