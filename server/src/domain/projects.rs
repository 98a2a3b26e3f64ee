//! Project services and the project query engine

use crate::data::TransactionalRepository;
use crate::data::types::{NewProject, ProjectChanges, ProjectFilter, ProjectSummaryRow};

use super::error::{DomainError, DomainResult};
use super::rollup::{ProjectDetail, detail_for};
use super::validate::{require_client_in_org, require_organization, require_project, require_user};

pub const EMPTY_PATCH_MESSAGE: &str = "At least one field must be provided";

/// Create a project after checking its organization and client
pub async fn create_project(
    repo: &dyn TransactionalRepository,
    new: NewProject,
) -> DomainResult<ProjectDetail> {
    require_organization(repo, new.organization_id).await?;
    if let Some(client_id) = new.client_id {
        require_client_in_org(repo, client_id, new.organization_id).await?;
    }

    let project = repo.create_project(&new).await?;
    tracing::debug!(
        project_id = project.id,
        organization_id = project.organization_id,
        "Project created"
    );
    detail_for(repo, project).await
}

/// List an organization's projects with persona and requirement counts
///
/// The organization must exist. A client filter must name a client of that
/// organization. A user filter must name an existing user and keeps projects
/// where any persona is assigned to that user.
pub async fn list_projects(
    repo: &dyn TransactionalRepository,
    filter: ProjectFilter,
) -> DomainResult<Vec<ProjectSummaryRow>> {
    require_organization(repo, filter.organization_id).await?;
    if let Some(client_id) = filter.client_id {
        require_client_in_org(repo, client_id, filter.organization_id).await?;
    }
    if let Some(user_id) = filter.user_id {
        require_user(repo, user_id).await?;
    }

    Ok(repo.list_project_summaries(&filter).await?)
}

/// Apply a partial update and return the refreshed detail view
pub async fn update_project(
    repo: &dyn TransactionalRepository,
    id: i64,
    changes: ProjectChanges,
) -> DomainResult<ProjectDetail> {
    if changes.is_empty() {
        return Err(DomainError::validation(EMPTY_PATCH_MESSAGE));
    }
    require_project(repo, id).await?;

    let project = repo
        .update_project(id, &changes)
        .await?
        .ok_or_else(|| DomainError::not_found("Project", id))?;
    detail_for(repo, project).await
}

/// Delete a project with all personas, requirements and conversation turns
pub async fn delete_project(repo: &dyn TransactionalRepository, id: i64) -> DomainResult<()> {
    if !repo.delete_project(id).await? {
        return Err(DomainError::not_found("Project", id));
    }
    Ok(())
}
