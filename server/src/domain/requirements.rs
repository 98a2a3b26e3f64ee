//! Requirement services

use crate::data::TransactionalRepository;
use crate::data::types::{NewRequirement, RequirementChanges, RequirementRow};

use super::error::{DomainError, DomainResult};
use super::projects::EMPTY_PATCH_MESSAGE;
use super::validate::{require_persona_in_project, require_project};

fn check_confidence(confidence: Option<f64>) -> DomainResult<()> {
    match confidence {
        Some(c) if !(0.0..=1.0).contains(&c) => Err(DomainError::validation(
            "Confidence must be between 0.0 and 1.0",
        )),
        _ => Ok(()),
    }
}

/// Create a requirement for a persona of the same project
pub async fn create_requirement(
    repo: &dyn TransactionalRepository,
    new: NewRequirement,
) -> DomainResult<RequirementRow> {
    if new.text.trim().is_empty() {
        return Err(DomainError::validation("Requirement text must not be empty"));
    }
    check_confidence(new.confidence)?;
    require_persona_in_project(repo, &new.persona_id, new.project_id).await?;

    Ok(repo.create_requirement(&new).await?)
}

/// Requirements of a project, optionally for one of its personas, oldest first
pub async fn list_requirements(
    repo: &dyn TransactionalRepository,
    project_id: i64,
    persona_id: Option<&str>,
) -> DomainResult<Vec<RequirementRow>> {
    match persona_id {
        Some(persona_id) => {
            require_persona_in_project(repo, persona_id, project_id).await?;
        }
        None => {
            require_project(repo, project_id).await?;
        }
    }
    Ok(repo.list_requirements(project_id, persona_id).await?)
}

/// Change the type and/or confidence. `Some(None)` clears the confidence.
pub async fn update_requirement(
    repo: &dyn TransactionalRepository,
    id: &str,
    changes: RequirementChanges,
) -> DomainResult<RequirementRow> {
    if changes.is_empty() {
        return Err(DomainError::validation(EMPTY_PATCH_MESSAGE));
    }
    check_confidence(changes.confidence.flatten())?;

    repo.update_requirement(id, &changes)
        .await?
        .ok_or_else(|| DomainError::not_found("Requirement", id))
}

pub async fn delete_requirement(repo: &dyn TransactionalRepository, id: &str) -> DomainResult<()> {
    if !repo.delete_requirement(id).await? {
        return Err(DomainError::not_found("Requirement", id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::{NewPersona, NewProject, PersonaRole, ProjectStatus, RequirementType};
    use crate::domain::test_repo;

    /// Two projects in one org, one persona on each
    async fn setup(repo: &dyn TransactionalRepository) -> ((i64, String), (i64, String)) {
        let org = repo.create_organization("Acme").await.unwrap();
        let mut out = Vec::new();
        for name in ["Q", "R"] {
            let project = repo
                .create_project(&NewProject {
                    name: name.into(),
                    description: None,
                    organization_id: org.id,
                    client_id: None,
                    status: ProjectStatus::Active,
                })
                .await
                .unwrap();
            let persona = repo
                .create_persona(&NewPersona {
                    project_id: project.id,
                    user_id: None,
                    role: PersonaRole::Client,
                    display_name: "Buyer".into(),
                })
                .await
                .unwrap();
            out.push((project.id, persona.id));
        }
        let r = out.pop().unwrap();
        let q = out.pop().unwrap();
        (q, r)
    }

    fn requirement(project_id: i64, persona_id: &str) -> NewRequirement {
        NewRequirement {
            project_id,
            persona_id: persona_id.to_string(),
            text: "Single sign-on".into(),
            requirement_type: RequirementType::Feature,
            confidence: Some(0.8),
            cluster_id: None,
        }
    }

    #[tokio::test]
    async fn test_persona_from_other_project_is_rejected() {
        let repo = test_repo().await;
        let repo = repo.as_ref();
        let ((q, q_persona), (r, _)) = setup(repo).await;

        let err = create_requirement(repo, requirement(r, &q_persona))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidAssociation(_)));
        assert!(list_requirements(repo, r, None).await.unwrap().is_empty());

        assert!(
            create_requirement(repo, requirement(q, &q_persona))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_field_validation() {
        let repo = test_repo().await;
        let repo = repo.as_ref();
        let ((q, q_persona), _) = setup(repo).await;

        let mut blank = requirement(q, &q_persona);
        blank.text = "   ".into();
        assert!(matches!(
            create_requirement(repo, blank).await,
            Err(DomainError::Validation(_))
        ));

        let mut too_sure = requirement(q, &q_persona);
        too_sure.confidence = Some(1.5);
        assert!(matches!(
            create_requirement(repo, too_sure).await,
            Err(DomainError::Validation(_))
        ));

        let mut edge = requirement(q, &q_persona);
        edge.confidence = Some(0.0);
        assert!(create_requirement(repo, edge).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_with_foreign_persona_filter() {
        let repo = test_repo().await;
        let repo = repo.as_ref();
        let ((q, q_persona), (_, r_persona)) = setup(repo).await;
        create_requirement(repo, requirement(q, &q_persona))
            .await
            .unwrap();

        assert_eq!(
            list_requirements(repo, q, Some(&q_persona))
                .await
                .unwrap()
                .len(),
            1
        );
        assert!(matches!(
            list_requirements(repo, q, Some(&r_persona)).await,
            Err(DomainError::InvalidAssociation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_requirement() {
        let repo = test_repo().await;
        let repo = repo.as_ref();
        let ((q, q_persona), _) = setup(repo).await;
        let created = create_requirement(repo, requirement(q, &q_persona))
            .await
            .unwrap();

        let err = update_requirement(repo, &created.id, RequirementChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m == EMPTY_PATCH_MESSAGE));

        let bad = RequirementChanges {
            confidence: Some(Some(-0.1)),
            ..Default::default()
        };
        assert!(matches!(
            update_requirement(repo, &created.id, bad).await,
            Err(DomainError::Validation(_))
        ));

        let clear = RequirementChanges {
            confidence: Some(None),
            ..Default::default()
        };
        let cleared = update_requirement(repo, &created.id, clear).await.unwrap();
        assert_eq!(cleared.confidence, None);
        assert_eq!(cleared.requirement_type, RequirementType::Feature);
        assert_eq!(cleared.text, created.text);
    }

    #[tokio::test]
    async fn test_delete_requirement() {
        let repo = test_repo().await;
        let repo = repo.as_ref();
        let ((q, q_persona), _) = setup(repo).await;
        let created = create_requirement(repo, requirement(q, &q_persona))
            .await
            .unwrap();

        delete_requirement(repo, &created.id).await.unwrap();
        assert!(matches!(
            delete_requirement(repo, &created.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
