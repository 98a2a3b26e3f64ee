//! Organization services

use crate::data::TransactionalRepository;
use crate::data::types::OrganizationRow;

use super::error::{DomainError, DomainResult};
use super::validate::require_organization;

pub async fn create_organization(
    repo: &dyn TransactionalRepository,
    name: &str,
) -> DomainResult<OrganizationRow> {
    Ok(repo.create_organization(name).await?)
}

pub async fn get_organization(
    repo: &dyn TransactionalRepository,
    id: i64,
) -> DomainResult<OrganizationRow> {
    require_organization(repo, id).await
}

pub async fn list_organizations(
    repo: &dyn TransactionalRepository,
) -> DomainResult<Vec<OrganizationRow>> {
    Ok(repo.list_organizations().await?)
}

/// Delete an organization with its projects, clients and users
pub async fn delete_organization(repo: &dyn TransactionalRepository, id: i64) -> DomainResult<()> {
    if !repo.delete_organization(id).await? {
        return Err(DomainError::not_found("Organization", id));
    }
    tracing::info!(organization_id = id, "Organization deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_repo;

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let repo = test_repo().await;
        create_organization(repo.as_ref(), "Acme").await.unwrap();

        let err = create_organization(repo.as_ref(), "Acme")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        let repo = test_repo().await;
        let repo = repo.as_ref();
        let org = create_organization(repo, "Acme").await.unwrap();

        assert_eq!(get_organization(repo, org.id).await.unwrap(), org);
        assert_eq!(list_organizations(repo).await.unwrap().len(), 1);

        delete_organization(repo, org.id).await.unwrap();
        assert!(matches!(
            get_organization(repo, org.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            delete_organization(repo, org.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
