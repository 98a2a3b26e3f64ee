//! Requirement API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::api::types::{empty_patch_error, reject_null, validate_not_blank};
use crate::data::types::{RequirementChanges, RequirementRow, RequirementType};
use crate::utils::time::micros_to_datetime;

#[derive(Debug, Serialize, ToSchema)]
pub struct RequirementDto {
    pub id: String,
    pub project_id: i64,
    pub persona_id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub requirement_type: RequirementType,
    pub confidence: Option<f64>,
    pub cluster_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RequirementRow> for RequirementDto {
    fn from(row: RequirementRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            persona_id: row.persona_id,
            text: row.text,
            requirement_type: row.requirement_type,
            confidence: row.confidence,
            cluster_id: row.cluster_id,
            created_at: micros_to_datetime(row.created_at),
            updated_at: micros_to_datetime(row.updated_at),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRequirementRequest {
    pub project_id: i64,

    pub persona_id: Uuid,

    #[validate(custom(function = "validate_not_blank"))]
    pub text: String,

    #[serde(rename = "type")]
    pub requirement_type: RequirementType,

    #[validate(range(min = 0.0, max = 1.0, message = "Confidence must be between 0.0 and 1.0"))]
    pub confidence: Option<f64>,

    pub cluster_id: Option<Uuid>,
}

/// Partial requirement update. `confidence: null` clears the confidence.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_requirement_patch"))]
pub struct UpdateRequirementRequest {
    #[serde(rename = "type", default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<RequirementType>)]
    pub requirement_type: Option<Option<RequirementType>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<f64>, nullable)]
    pub confidence: Option<Option<f64>>,
}

fn validate_requirement_patch(req: &UpdateRequirementRequest) -> Result<(), ValidationError> {
    if req.requirement_type.is_none() && req.confidence.is_none() {
        return Err(empty_patch_error());
    }
    reject_null(&req.requirement_type, "type")?;
    if let Some(Some(c)) = req.confidence
        && !(0.0..=1.0).contains(&c)
    {
        return Err(ValidationError::new("range")
            .with_message("Confidence must be between 0.0 and 1.0".into()));
    }
    Ok(())
}

impl From<UpdateRequirementRequest> for RequirementChanges {
    fn from(req: UpdateRequirementRequest) -> Self {
        Self {
            requirement_type: req.requirement_type.flatten(),
            confidence: req.confidence,
        }
    }
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct ListRequirementsQuery {
    pub project_id: i64,

    /// Only requirements from this persona (must belong to the project)
    pub persona_id: Option<Uuid>,
}
