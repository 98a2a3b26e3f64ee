//! TransactionalRepository trait implementation for SQLite
//!
//! This module implements the TransactionalRepository trait for Arc<SqliteService>,
//! delegating to the free functions in `repositories`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::traits::TransactionalRepository;
use crate::data::types::{
    ClientRow, ConversationTurnRow, NewConversationTurn, NewPersona, NewProject, NewRequirement,
    OrganizationRow, PersonaChanges, PersonaRow, ProjectChanges, ProjectFilter, ProjectRow,
    ProjectSummaryRow, RequirementChanges, RequirementRow, RequirementType, UserRow,
};

use super::SqliteService;
use super::repositories::{
    client, conversation, organization, persona, project, requirement, user,
};

#[async_trait]
impl TransactionalRepository for Arc<SqliteService> {
    // ==================== Organization Operations ====================

    async fn create_organization(&self, name: &str) -> Result<OrganizationRow, DataError> {
        organization::create_organization(self.pool(), name)
            .await
            .map_err(Into::into)
    }

    async fn get_organization(&self, id: i64) -> Result<Option<OrganizationRow>, DataError> {
        organization::get_organization(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn list_organizations(&self) -> Result<Vec<OrganizationRow>, DataError> {
        organization::list_organizations(self.pool())
            .await
            .map_err(Into::into)
    }

    async fn delete_organization(&self, id: i64) -> Result<bool, DataError> {
        organization::delete_organization(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    // ==================== User Operations ====================

    async fn create_user(
        &self,
        email: &str,
        organization_id: Option<i64>,
    ) -> Result<UserRow, DataError> {
        user::create_user(self.pool(), email, organization_id)
            .await
            .map_err(Into::into)
    }

    async fn get_user(&self, id: i64) -> Result<Option<UserRow>, DataError> {
        user::get_user(self.pool(), id).await.map_err(Into::into)
    }

    async fn list_users(&self, organization_id: Option<i64>) -> Result<Vec<UserRow>, DataError> {
        user::list_users(self.pool(), organization_id)
            .await
            .map_err(Into::into)
    }

    async fn delete_user(&self, id: i64) -> Result<bool, DataError> {
        user::delete_user(self.pool(), id).await.map_err(Into::into)
    }

    // ==================== Client Operations ====================

    async fn create_client(
        &self,
        name: &str,
        organization_id: i64,
    ) -> Result<ClientRow, DataError> {
        client::create_client(self.pool(), name, organization_id)
            .await
            .map_err(Into::into)
    }

    async fn get_client(&self, id: i64) -> Result<Option<ClientRow>, DataError> {
        client::get_client(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn list_clients(&self, organization_id: i64) -> Result<Vec<ClientRow>, DataError> {
        client::list_for_org(self.pool(), organization_id)
            .await
            .map_err(Into::into)
    }

    // ==================== Project Operations ====================

    async fn create_project(&self, new: &NewProject) -> Result<ProjectRow, DataError> {
        project::create_project(self.pool(), new)
            .await
            .map_err(Into::into)
    }

    async fn get_project(&self, id: i64) -> Result<Option<ProjectRow>, DataError> {
        project::get_project(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn list_project_summaries(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Vec<ProjectSummaryRow>, DataError> {
        project::list_summaries(self.pool(), filter)
            .await
            .map_err(Into::into)
    }

    async fn requirement_type_counts(
        &self,
        project_id: i64,
    ) -> Result<Vec<(RequirementType, u64)>, DataError> {
        project::requirement_type_counts(self.pool(), project_id)
            .await
            .map_err(Into::into)
    }

    async fn update_project(
        &self,
        id: i64,
        changes: &ProjectChanges,
    ) -> Result<Option<ProjectRow>, DataError> {
        project::update_project(self.pool(), id, changes)
            .await
            .map_err(Into::into)
    }

    async fn delete_project(&self, id: i64) -> Result<bool, DataError> {
        project::delete_project(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    // ==================== Persona Operations ====================

    async fn create_persona(&self, new: &NewPersona) -> Result<PersonaRow, DataError> {
        persona::create_persona(self.pool(), new)
            .await
            .map_err(Into::into)
    }

    async fn get_persona(&self, id: &str) -> Result<Option<PersonaRow>, DataError> {
        persona::get_persona(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn list_personas(&self, project_id: i64) -> Result<Vec<PersonaRow>, DataError> {
        persona::list_for_project(self.pool(), project_id)
            .await
            .map_err(Into::into)
    }

    async fn update_persona(
        &self,
        id: &str,
        changes: &PersonaChanges,
    ) -> Result<Option<PersonaRow>, DataError> {
        persona::update_persona(self.pool(), id, changes)
            .await
            .map_err(Into::into)
    }

    async fn delete_persona(&self, id: &str) -> Result<bool, DataError> {
        persona::delete_persona(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    // ==================== Requirement Operations ====================

    async fn create_requirement(&self, new: &NewRequirement) -> Result<RequirementRow, DataError> {
        requirement::create_requirement(self.pool(), new)
            .await
            .map_err(Into::into)
    }

    async fn create_requirements(
        &self,
        requirements: &[NewRequirement],
    ) -> Result<Vec<RequirementRow>, DataError> {
        requirement::create_requirements(self.pool(), requirements)
            .await
            .map_err(Into::into)
    }

    async fn get_requirement(&self, id: &str) -> Result<Option<RequirementRow>, DataError> {
        requirement::get_requirement(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn list_requirements(
        &self,
        project_id: i64,
        persona_id: Option<&str>,
    ) -> Result<Vec<RequirementRow>, DataError> {
        requirement::list_for_project(self.pool(), project_id, persona_id)
            .await
            .map_err(Into::into)
    }

    async fn update_requirement(
        &self,
        id: &str,
        changes: &RequirementChanges,
    ) -> Result<Option<RequirementRow>, DataError> {
        requirement::update_requirement(self.pool(), id, changes)
            .await
            .map_err(Into::into)
    }

    async fn delete_requirement(&self, id: &str) -> Result<bool, DataError> {
        requirement::delete_requirement(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    // ==================== Conversation Operations ====================

    async fn create_conversation_turn(
        &self,
        turn: &NewConversationTurn,
    ) -> Result<ConversationTurnRow, DataError> {
        conversation::create_turn(self.pool(), turn)
            .await
            .map_err(Into::into)
    }

    async fn list_conversation_turns(
        &self,
        project_id: i64,
        persona_id: Option<&str>,
    ) -> Result<Vec<ConversationTurnRow>, DataError> {
        conversation::list_for_project(self.pool(), project_id, persona_id)
            .await
            .map_err(Into::into)
    }
}
