//! Project API types

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::api::types::{check_length, empty_patch_error, reject_null};
use crate::core::constants::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use crate::data::types::{
    PersonaRole, PersonaRow, ProjectChanges, ProjectRow, ProjectStatus, ProjectSummaryRow,
};
use crate::domain::{ProjectDetail, RequirementCounts};
use crate::utils::time::micros_to_datetime;

/// Project DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub organization_id: i64,
    pub client_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<ProjectRow> for ProjectDto {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            status: row.status,
            organization_id: row.organization_id,
            client_id: row.client_id,
            created_at: micros_to_datetime(row.created_at),
        }
    }
}

/// Listing entry with plain persona and requirement counts
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectSummaryDto {
    #[serde(flatten)]
    pub project: ProjectDto,
    pub persona_count: u64,
    pub requirement_count: u64,
}

impl From<ProjectSummaryRow> for ProjectSummaryDto {
    fn from(row: ProjectSummaryRow) -> Self {
        Self {
            project: row.project.into(),
            persona_count: row.persona_count,
            requirement_count: row.requirement_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PersonaSummaryDto {
    pub id: String,
    pub role: PersonaRole,
    pub display_name: String,
}

impl From<PersonaRow> for PersonaSummaryDto {
    fn from(row: PersonaRow) -> Self {
        Self {
            id: row.id,
            role: row.role,
            display_name: row.display_name,
        }
    }
}

/// Requirement rollup; `by_type` omits types with no requirements
#[derive(Debug, Serialize, ToSchema)]
pub struct RequirementCountsDto {
    pub total: u64,
    pub by_type: BTreeMap<String, u64>,
}

impl From<RequirementCounts> for RequirementCountsDto {
    fn from(counts: RequirementCounts) -> Self {
        Self {
            total: counts.total,
            by_type: counts
                .by_type
                .into_iter()
                .map(|(t, n)| (t.as_str().to_string(), n))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectDetailDto {
    #[serde(flatten)]
    pub project: ProjectDto,
    pub personas: Vec<PersonaSummaryDto>,
    pub requirement_counts: RequirementCountsDto,
}

impl From<ProjectDetail> for ProjectDetailDto {
    fn from(detail: ProjectDetail) -> Self {
        Self {
            project: detail.project.into(),
            personas: detail.personas.into_iter().map(Into::into).collect(),
            requirement_counts: detail.requirement_counts.into(),
        }
    }
}

/// Request body for creating a project
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    pub organization_id: i64,

    pub client_id: Option<i64>,

    /// Defaults to `active`
    #[serde(default)]
    pub status: ProjectStatus,
}

/// Partial project update
///
/// Absent fields are left alone. `description` may be `null` to clear it.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_project_patch"))]
pub struct UpdateProjectRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub description: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<ProjectStatus>)]
    pub status: Option<Option<ProjectStatus>>,
}

fn validate_project_patch(req: &UpdateProjectRequest) -> Result<(), ValidationError> {
    if req.name.is_none() && req.description.is_none() && req.status.is_none() {
        return Err(empty_patch_error());
    }
    reject_null(&req.name, "name")?;
    reject_null(&req.status, "status")?;
    check_length(req.name.clone().flatten().as_deref(), "Name", MAX_NAME_LEN)?;
    if let Some(Some(description)) = &req.description
        && description.chars().count() as u64 > MAX_DESCRIPTION_LEN
    {
        return Err(ValidationError::new("length").with_message(
            format!("Description must be at most {} characters", MAX_DESCRIPTION_LEN).into(),
        ));
    }
    Ok(())
}

impl From<UpdateProjectRequest> for ProjectChanges {
    fn from(req: UpdateProjectRequest) -> Self {
        Self {
            name: req.name.flatten(),
            description: req.description,
            status: req.status.flatten(),
        }
    }
}

/// Query params for listing projects
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct ListProjectsQuery {
    pub organization_id: i64,

    /// Only projects for this client (must belong to the organization)
    pub client_id: Option<i64>,

    /// Only projects where some persona is assigned to this user
    pub user_id: Option<i64>,
}
