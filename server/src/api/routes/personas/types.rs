//! Persona API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::api::types::{check_length, empty_patch_error, reject_null};
use crate::core::constants::MAX_NAME_LEN;
use crate::data::types::{PersonaChanges, PersonaRole, PersonaRow};
use crate::utils::time::micros_to_datetime;

#[derive(Debug, Serialize, ToSchema)]
pub struct PersonaDto {
    pub id: String,
    pub project_id: i64,
    pub user_id: Option<i64>,
    pub role: PersonaRole,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PersonaRow> for PersonaDto {
    fn from(row: PersonaRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            user_id: row.user_id,
            role: row.role,
            display_name: row.display_name,
            created_at: micros_to_datetime(row.created_at),
            updated_at: micros_to_datetime(row.updated_at),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePersonaRequest {
    pub project_id: i64,

    pub role: PersonaRole,

    #[validate(length(min = 1, max = 255, message = "Display name must be 1-255 characters"))]
    pub display_name: String,

    pub user_id: Option<i64>,
}

/// Partial persona update. Neither field may be `null`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_persona_patch"))]
pub struct UpdatePersonaRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<PersonaRole>)]
    pub role: Option<Option<PersonaRole>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub display_name: Option<Option<String>>,
}

fn validate_persona_patch(req: &UpdatePersonaRequest) -> Result<(), ValidationError> {
    if req.role.is_none() && req.display_name.is_none() {
        return Err(empty_patch_error());
    }
    reject_null(&req.role, "role")?;
    reject_null(&req.display_name, "display_name")?;
    check_length(
        req.display_name.clone().flatten().as_deref(),
        "Display name",
        MAX_NAME_LEN,
    )
}

impl From<UpdatePersonaRequest> for PersonaChanges {
    fn from(req: UpdatePersonaRequest) -> Self {
        Self {
            role: req.role.flatten(),
            display_name: req.display_name.flatten(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct ListPersonasQuery {
    pub project_id: i64,
}
