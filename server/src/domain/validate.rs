//! Referential validation
//!
//! Every check runs before the write it guards. A missing id fails with
//! `NotFound`; a resolvable id attached to the wrong parent fails with
//! `InvalidAssociation`.

use crate::data::TransactionalRepository;
use crate::data::types::{ClientRow, OrganizationRow, PersonaRow, ProjectRow, UserRow};

use super::error::{DomainError, DomainResult};

pub async fn require_organization(
    repo: &dyn TransactionalRepository,
    id: i64,
) -> DomainResult<OrganizationRow> {
    repo.get_organization(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Organization", id))
}

pub async fn require_user(repo: &dyn TransactionalRepository, id: i64) -> DomainResult<UserRow> {
    repo.get_user(id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", id))
}

pub async fn require_client(
    repo: &dyn TransactionalRepository,
    id: i64,
) -> DomainResult<ClientRow> {
    repo.get_client(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Client", id))
}

/// Client must exist and belong to `organization_id`
pub async fn require_client_in_org(
    repo: &dyn TransactionalRepository,
    client_id: i64,
    organization_id: i64,
) -> DomainResult<ClientRow> {
    let client = require_client(repo, client_id).await?;
    if client.organization_id != organization_id {
        return Err(DomainError::invalid_association(
            "Client does not belong to the specified organization",
        ));
    }
    Ok(client)
}

pub async fn require_project(
    repo: &dyn TransactionalRepository,
    id: i64,
) -> DomainResult<ProjectRow> {
    repo.get_project(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Project", id))
}

pub async fn require_persona(
    repo: &dyn TransactionalRepository,
    id: &str,
) -> DomainResult<PersonaRow> {
    repo.get_persona(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Persona", id))
}

/// Project and persona must exist, and the persona must belong to the project
pub async fn require_persona_in_project(
    repo: &dyn TransactionalRepository,
    persona_id: &str,
    project_id: i64,
) -> DomainResult<PersonaRow> {
    require_project(repo, project_id).await?;
    let persona = require_persona(repo, persona_id).await?;
    if persona.project_id != project_id {
        return Err(DomainError::invalid_association(
            "Persona does not belong to the provided project",
        ));
    }
    Ok(persona)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::{NewPersona, NewProject, PersonaRole, ProjectStatus};
    use crate::domain::test_repo;

    async fn project_in(repo: &dyn TransactionalRepository, org: i64, name: &str) -> ProjectRow {
        repo.create_project(&NewProject {
            name: name.into(),
            description: None,
            organization_id: org,
            client_id: None,
            status: ProjectStatus::Active,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_missing_entities_are_not_found() {
        let repo = test_repo().await;
        let repo = repo.as_ref();

        assert!(matches!(
            require_organization(repo, 1).await,
            Err(DomainError::NotFound {
                entity: "Organization",
                ..
            })
        ));
        assert!(matches!(
            require_user(repo, 1).await,
            Err(DomainError::NotFound { entity: "User", .. })
        ));
        assert!(matches!(
            require_project(repo, 1).await,
            Err(DomainError::NotFound {
                entity: "Project",
                ..
            })
        ));
        assert!(matches!(
            require_persona(repo, "nope").await,
            Err(DomainError::NotFound {
                entity: "Persona",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_client_in_other_org_is_invalid_association() {
        let repo = test_repo().await;
        let repo = repo.as_ref();
        let acme = repo.create_organization("Acme").await.unwrap();
        let other = repo.create_organization("Other").await.unwrap();
        let client = repo.create_client("Big Co", acme.id).await.unwrap();

        assert!(
            require_client_in_org(repo, client.id, acme.id)
                .await
                .is_ok()
        );
        assert!(matches!(
            require_client_in_org(repo, client.id, other.id).await,
            Err(DomainError::InvalidAssociation(_))
        ));
        assert!(matches!(
            require_client_in_org(repo, 999, acme.id).await,
            Err(DomainError::NotFound {
                entity: "Client",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_persona_in_other_project_is_invalid_association() {
        let repo = test_repo().await;
        let repo = repo.as_ref();
        let org = repo.create_organization("Acme").await.unwrap();
        let q = project_in(repo, org.id, "Q").await;
        let r = project_in(repo, org.id, "R").await;
        let persona = repo
            .create_persona(&NewPersona {
                project_id: q.id,
                user_id: None,
                role: PersonaRole::Client,
                display_name: "Buyer".into(),
            })
            .await
            .unwrap();

        assert!(
            require_persona_in_project(repo, &persona.id, q.id)
                .await
                .is_ok()
        );
        assert!(matches!(
            require_persona_in_project(repo, &persona.id, r.id).await,
            Err(DomainError::InvalidAssociation(_))
        ));
    }
}
