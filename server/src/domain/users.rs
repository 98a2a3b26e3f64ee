//! User services

use crate::data::TransactionalRepository;
use crate::data::types::UserRow;

use super::error::{DomainError, DomainResult};
use super::validate::{require_organization, require_user};

/// Create a user, checking the organization when one is given
pub async fn create_user(
    repo: &dyn TransactionalRepository,
    email: &str,
    organization_id: Option<i64>,
) -> DomainResult<UserRow> {
    if let Some(org_id) = organization_id {
        require_organization(repo, org_id).await?;
    }
    Ok(repo.create_user(email, organization_id).await?)
}

pub async fn get_user(repo: &dyn TransactionalRepository, id: i64) -> DomainResult<UserRow> {
    require_user(repo, id).await
}

pub async fn list_users(
    repo: &dyn TransactionalRepository,
    organization_id: Option<i64>,
) -> DomainResult<Vec<UserRow>> {
    if let Some(org_id) = organization_id {
        require_organization(repo, org_id).await?;
    }
    Ok(repo.list_users(organization_id).await?)
}

/// Delete a user. Personas linked to the user are kept and unlinked.
pub async fn delete_user(repo: &dyn TransactionalRepository, id: i64) -> DomainResult<()> {
    if !repo.delete_user(id).await? {
        return Err(DomainError::not_found("User", id));
    }
    Ok(())
}
