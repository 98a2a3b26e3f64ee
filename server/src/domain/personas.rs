//! Persona services

use crate::data::TransactionalRepository;
use crate::data::types::{NewPersona, PersonaChanges, PersonaRow};

use super::error::{DomainError, DomainResult};
use super::projects::EMPTY_PATCH_MESSAGE;
use super::validate::{require_persona, require_project, require_user};

/// Create a persona on an existing project, optionally linked to a user
pub async fn create_persona(
    repo: &dyn TransactionalRepository,
    new: NewPersona,
) -> DomainResult<PersonaRow> {
    require_project(repo, new.project_id).await?;
    if let Some(user_id) = new.user_id {
        require_user(repo, user_id).await?;
    }
    Ok(repo.create_persona(&new).await?)
}

pub async fn get_persona(repo: &dyn TransactionalRepository, id: &str) -> DomainResult<PersonaRow> {
    require_persona(repo, id).await
}

/// Personas of a project in creation order
pub async fn list_personas(
    repo: &dyn TransactionalRepository,
    project_id: i64,
) -> DomainResult<Vec<PersonaRow>> {
    require_project(repo, project_id).await?;
    Ok(repo.list_personas(project_id).await?)
}

pub async fn update_persona(
    repo: &dyn TransactionalRepository,
    id: &str,
    changes: PersonaChanges,
) -> DomainResult<PersonaRow> {
    if changes.is_empty() {
        return Err(DomainError::validation(EMPTY_PATCH_MESSAGE));
    }
    repo.update_persona(id, &changes)
        .await?
        .ok_or_else(|| DomainError::not_found("Persona", id))
}

/// Delete a persona with its requirements and conversation turns
pub async fn delete_persona(repo: &dyn TransactionalRepository, id: &str) -> DomainResult<()> {
    if !repo.delete_persona(id).await? {
        return Err(DomainError::not_found("Persona", id));
    }
    Ok(())
}
