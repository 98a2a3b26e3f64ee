//! Organization API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::data::types::OrganizationRow;
use crate::utils::time::micros_to_datetime;

/// Organization DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct OrganizationDto {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<OrganizationRow> for OrganizationDto {
    fn from(row: OrganizationRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: micros_to_datetime(row.created_at),
        }
    }
}

/// Request body for creating an organization
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrgRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}
