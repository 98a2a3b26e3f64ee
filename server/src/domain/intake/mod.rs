//! Requirement intake
//!
//! - `extract` - Splits free text into requirement candidates
//! - `embedding` - Fixed-shape placeholder vector for conversation text

mod embedding;
mod extract;

pub use embedding::{EMBEDDING_DIM, embed_text};
pub use extract::{ExtractedRequirement, extract_requirements};

use crate::data::TransactionalRepository;
use crate::data::types::{NewRequirement, RequirementRow};

use super::error::{DomainError, DomainResult};
use super::validate::require_persona_in_project;

/// Extract requirements from `text` and store them for the persona
///
/// All candidates are inserted in one transaction, in extraction order.
pub async fn extract_and_store(
    repo: &dyn TransactionalRepository,
    project_id: i64,
    persona_id: &str,
    text: &str,
) -> DomainResult<Vec<RequirementRow>> {
    require_persona_in_project(repo, persona_id, project_id).await?;

    let extracted = extract_requirements(text);
    if extracted.is_empty() {
        return Err(DomainError::ExtractionEmpty);
    }

    let new: Vec<NewRequirement> = extracted
        .into_iter()
        .map(|r| NewRequirement {
            project_id,
            persona_id: persona_id.to_string(),
            text: r.text,
            requirement_type: r.requirement_type,
            confidence: r.confidence,
            cluster_id: None,
        })
        .collect();

    let created = repo.create_requirements(&new).await?;
    tracing::debug!(
        project_id,
        persona_id,
        count = created.len(),
        "Requirements extracted"
    );
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::{NewPersona, NewProject, PersonaRole, ProjectStatus, RequirementType};
    use crate::domain::requirements::list_requirements;
    use crate::domain::test_repo;

    async fn setup(repo: &dyn TransactionalRepository) -> (i64, String) {
        let org = repo.create_organization("Acme").await.unwrap();
        let project = repo
            .create_project(&NewProject {
                name: "Portal".into(),
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
        (project.id, persona.id)
    }

    #[tokio::test]
    async fn test_extract_and_list() {
        let repo = test_repo().await;
        let repo = repo.as_ref();
        let (project_id, persona_id) = setup(repo).await;

        let created = extract_and_store(
            repo,
            project_id,
            &persona_id,
            "Enable offline access\nSupport automatic backups",
        )
        .await
        .unwrap();
        assert_eq!(created.len(), 2);

        let listed = list_requirements(repo, project_id, Some(&persona_id))
            .await
            .unwrap();
        let texts: Vec<_> = listed.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(
            texts,
            ["Enable offline access", "Support automatic backups"]
        );
        let feature = RequirementType::Feature;
        assert!(listed.iter().all(|r| r.requirement_type == feature));
        assert_eq!(listed, created);
    }

    #[tokio::test]
    async fn test_blank_text_is_extraction_empty() {
        let repo = test_repo().await;
        let repo = repo.as_ref();
        let (project_id, persona_id) = setup(repo).await;

        let err = extract_and_store(repo, project_id, &persona_id, "  \n ")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ExtractionEmpty));
        assert!(
            list_requirements(repo, project_id, None)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_unknown_persona() {
        let repo = test_repo().await;
        let repo = repo.as_ref();
        let (project_id, _) = setup(repo).await;

        let err = extract_and_store(repo, project_id, "missing", "Export")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound {
                entity: "Persona",
                ..
            }
        ));
    }
}
