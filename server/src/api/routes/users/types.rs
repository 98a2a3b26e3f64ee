//! User API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::data::types::UserRow;
use crate::utils::time::micros_to_datetime;

/// User DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub organization_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for UserDto {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            organization_id: row.organization_id,
            created_at: micros_to_datetime(row.created_at),
        }
    }
}

/// Request body for creating a user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    pub organization_id: Option<i64>,
}

/// Query params for listing users
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct ListUsersQuery {
    /// Only users of this organization
    pub organization_id: Option<i64>,
}
