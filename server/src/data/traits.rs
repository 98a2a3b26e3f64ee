//! Repository trait for the transactional store
//!
//! The domain layer talks to storage only through [`TransactionalRepository`],
//! obtained from [`crate::data::TransactionalService::repository`].

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::types::{
    ClientRow, ConversationTurnRow, NewConversationTurn, NewPersona, NewProject, NewRequirement,
    OrganizationRow, PersonaChanges, PersonaRow, ProjectChanges, ProjectFilter, ProjectRow,
    ProjectSummaryRow, RequirementChanges, RequirementRow, RequirementType, UserRow,
};

/// Repository trait for organizations, users, clients, projects and their children
///
/// Deletes report `false` when nothing matched. Every delete that touches
/// children runs as a single transaction.
#[async_trait]
pub trait TransactionalRepository: Send + Sync {
    // ==================== Organization Operations ====================

    async fn create_organization(&self, name: &str) -> Result<OrganizationRow, DataError>;

    async fn get_organization(&self, id: i64) -> Result<Option<OrganizationRow>, DataError>;

    async fn list_organizations(&self) -> Result<Vec<OrganizationRow>, DataError>;

    /// Delete an organization with its projects, clients and users
    async fn delete_organization(&self, id: i64) -> Result<bool, DataError>;

    // ==================== User Operations ====================

    async fn create_user(
        &self,
        email: &str,
        organization_id: Option<i64>,
    ) -> Result<UserRow, DataError>;

    async fn get_user(&self, id: i64) -> Result<Option<UserRow>, DataError>;

    async fn list_users(&self, organization_id: Option<i64>) -> Result<Vec<UserRow>, DataError>;

    /// Delete a user, nulling persona links
    async fn delete_user(&self, id: i64) -> Result<bool, DataError>;

    // ==================== Client Operations ====================

    async fn create_client(&self, name: &str, organization_id: i64)
    -> Result<ClientRow, DataError>;

    async fn get_client(&self, id: i64) -> Result<Option<ClientRow>, DataError>;

    async fn list_clients(&self, organization_id: i64) -> Result<Vec<ClientRow>, DataError>;

    // ==================== Project Operations ====================

    async fn create_project(&self, project: &NewProject) -> Result<ProjectRow, DataError>;

    async fn get_project(&self, id: i64) -> Result<Option<ProjectRow>, DataError>;

    /// Filtered listing with persona and requirement counts
    async fn list_project_summaries(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Vec<ProjectSummaryRow>, DataError>;

    /// Requirement counts per type, omitting types with none
    async fn requirement_type_counts(
        &self,
        project_id: i64,
    ) -> Result<Vec<(RequirementType, u64)>, DataError>;

    async fn update_project(
        &self,
        id: i64,
        changes: &ProjectChanges,
    ) -> Result<Option<ProjectRow>, DataError>;

    async fn delete_project(&self, id: i64) -> Result<bool, DataError>;

    // ==================== Persona Operations ====================

    async fn create_persona(&self, persona: &NewPersona) -> Result<PersonaRow, DataError>;

    async fn get_persona(&self, id: &str) -> Result<Option<PersonaRow>, DataError>;

    async fn list_personas(&self, project_id: i64) -> Result<Vec<PersonaRow>, DataError>;

    async fn update_persona(
        &self,
        id: &str,
        changes: &PersonaChanges,
    ) -> Result<Option<PersonaRow>, DataError>;

    async fn delete_persona(&self, id: &str) -> Result<bool, DataError>;

    // ==================== Requirement Operations ====================

    async fn create_requirement(
        &self,
        requirement: &NewRequirement,
    ) -> Result<RequirementRow, DataError>;

    /// Insert all or nothing
    async fn create_requirements(
        &self,
        requirements: &[NewRequirement],
    ) -> Result<Vec<RequirementRow>, DataError>;

    async fn get_requirement(&self, id: &str) -> Result<Option<RequirementRow>, DataError>;

    async fn list_requirements(
        &self,
        project_id: i64,
        persona_id: Option<&str>,
    ) -> Result<Vec<RequirementRow>, DataError>;

    async fn update_requirement(
        &self,
        id: &str,
        changes: &RequirementChanges,
    ) -> Result<Option<RequirementRow>, DataError>;

    async fn delete_requirement(&self, id: &str) -> Result<bool, DataError>;

    // ==================== Conversation Operations ====================

    async fn create_conversation_turn(
        &self,
        turn: &NewConversationTurn,
    ) -> Result<ConversationTurnRow, DataError>;

    async fn list_conversation_turns(
        &self,
        project_id: i64,
        persona_id: Option<&str>,
    ) -> Result<Vec<ConversationTurnRow>, DataError>;
}
