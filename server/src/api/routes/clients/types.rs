//! Client API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::data::types::ClientRow;
use crate::utils::time::micros_to_datetime;

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientDto {
    pub id: i64,
    pub name: String,
    pub organization_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ClientRow> for ClientDto {
    fn from(row: ClientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            organization_id: row.organization_id,
            created_at: micros_to_datetime(row.created_at),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    pub organization_id: i64,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct ListClientsQuery {
    pub organization_id: i64,
}
