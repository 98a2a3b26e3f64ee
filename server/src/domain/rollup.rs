//! Project rollups
//!
//! Counts are recomputed from the store on every read.

use std::collections::BTreeMap;

use crate::data::TransactionalRepository;
use crate::data::types::{PersonaRow, ProjectRow, RequirementType};

use super::error::DomainResult;
use super::validate::require_project;

/// Requirement totals for one project
///
/// `by_type` holds only types with at least one requirement, so `total`
/// always equals the sum of its values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementCounts {
    pub total: u64,
    pub by_type: BTreeMap<RequirementType, u64>,
}

impl RequirementCounts {
    pub fn from_type_counts(counts: impl IntoIterator<Item = (RequirementType, u64)>) -> Self {
        let by_type: BTreeMap<_, _> = counts.into_iter().filter(|(_, n)| *n > 0).collect();
        let total = by_type.values().sum();
        Self { total, by_type }
    }
}

/// A project with its personas (creation order) and requirement counts
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetail {
    pub project: ProjectRow,
    pub personas: Vec<PersonaRow>,
    pub requirement_counts: RequirementCounts,
}

/// Build the detail view for an existing project
pub async fn project_detail(
    repo: &dyn TransactionalRepository,
    project_id: i64,
) -> DomainResult<ProjectDetail> {
    let project = require_project(repo, project_id).await?;
    detail_for(repo, project).await
}

pub(crate) async fn detail_for(
    repo: &dyn TransactionalRepository,
    project: ProjectRow,
) -> DomainResult<ProjectDetail> {
    let personas = repo.list_personas(project.id).await?;
    let counts = repo.requirement_type_counts(project.id).await?;

    Ok(ProjectDetail {
        project,
        personas,
        requirement_counts: RequirementCounts::from_type_counts(counts),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::{NewPersona, NewProject, NewRequirement, PersonaRole, ProjectStatus};
    use crate::domain::error::DomainError;
    use crate::domain::test_repo;

    #[test]
    fn test_counts_skip_zero_and_sum() {
        let counts = RequirementCounts::from_type_counts([
            (RequirementType::Feature, 3),
            (RequirementType::Bug, 0),
            (RequirementType::Constraint, 2),
        ]);
        assert_eq!(counts.total, 5);
        assert_eq!(counts.by_type.len(), 2);
        assert!(!counts.by_type.contains_key(&RequirementType::Bug));
        assert_eq!(counts.total, counts.by_type.values().sum::<u64>());
    }

    #[test]
    fn test_empty_counts() {
        let counts = RequirementCounts::from_type_counts(Vec::<(RequirementType, u64)>::new());
        assert_eq!(counts, RequirementCounts::default());
        assert!(counts.by_type.is_empty());
    }

    #[tokio::test]
    async fn test_project_detail() {
        let repo = test_repo().await;
        let repo = repo.as_ref();
        let org = repo.create_organization("Acme").await.unwrap();
        let project = repo
            .create_project(&NewProject {
                name: "Portal".into(),
                description: None,
                organization_id: org.id,
                client_id: None,
                status: ProjectStatus::Planned,
            })
            .await
            .unwrap();

        let empty = project_detail(repo, project.id).await.unwrap();
        assert!(empty.personas.is_empty());
        assert_eq!(empty.requirement_counts.total, 0);
        assert!(empty.requirement_counts.by_type.is_empty());

        let persona = repo
            .create_persona(&NewPersona {
                project_id: project.id,
                user_id: None,
                role: PersonaRole::Lead,
                display_name: "Lead".into(),
            })
            .await
            .unwrap();
        for kind in [RequirementType::Bug, RequirementType::Bug, RequirementType::Feature] {
            repo.create_requirement(&NewRequirement {
                project_id: project.id,
                persona_id: persona.id.clone(),
                text: "Thing".into(),
                requirement_type: kind,
                confidence: None,
                cluster_id: None,
            })
            .await
            .unwrap();
        }

        let detail = project_detail(repo, project.id).await.unwrap();
        assert_eq!(detail.personas, vec![persona]);
        assert_eq!(detail.requirement_counts.total, 3);
        assert_eq!(detail.requirement_counts.by_type[&RequirementType::Bug], 2);
        assert_eq!(
            detail.requirement_counts.by_type[&RequirementType::Feature],
            1
        );
    }

    #[tokio::test]
    async fn test_missing_project_detail() {
        let repo = test_repo().await;
        let err = project_detail(repo.as_ref(), 5).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
