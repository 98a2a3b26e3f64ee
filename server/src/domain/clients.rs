//! Client services
//!
//! Clients cannot be deleted on their own; they go away with their organization.

use crate::data::TransactionalRepository;
use crate::data::types::ClientRow;

use super::error::DomainResult;
use super::validate::{require_client, require_organization};

pub async fn create_client(
    repo: &dyn TransactionalRepository,
    name: &str,
    organization_id: i64,
) -> DomainResult<ClientRow> {
    require_organization(repo, organization_id).await?;
    Ok(repo.create_client(name, organization_id).await?)
}

pub async fn get_client(repo: &dyn TransactionalRepository, id: i64) -> DomainResult<ClientRow> {
    require_client(repo, id).await
}

pub async fn list_clients(
    repo: &dyn TransactionalRepository,
    organization_id: i64,
) -> DomainResult<Vec<ClientRow>> {
    require_organization(repo, organization_id).await?;
    Ok(repo.list_clients(organization_id).await?)
}
