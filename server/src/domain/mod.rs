//! Domain logic for project and requirements tracking
//!
//! - `validate` - Referential checks run before every write
//! - `rollup` - Persona and requirement counts per project
//! - `projects` - Project services and the filtered listing query
//! - `organizations`, `users`, `clients`, `personas`, `requirements`,
//!   `conversations` - Entity services
//! - `intake` - Requirement extraction and text embedding placeholders
//! - `workflow` - Background workflow worker

pub mod clients;
pub mod conversations;
pub mod error;
pub mod intake;
pub mod organizations;
pub mod personas;
pub mod projects;
pub mod requirements;
pub mod rollup;
pub mod users;
pub mod validate;
pub mod workflow;

pub use error::{DomainError, DomainResult};
pub use rollup::{ProjectDetail, RequirementCounts};
pub use workflow::{WorkflowClient, WorkflowWorker};

/// Fresh in-memory repository for service tests
#[cfg(test)]
pub(crate) async fn test_repo() -> Box<dyn crate::data::TransactionalRepository + Send + Sync> {
    crate::data::TransactionalService::in_memory()
        .await
        .unwrap()
        .repository()
}
