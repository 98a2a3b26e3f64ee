//! Conversation API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::types::validate_not_blank;
use crate::data::types::ConversationTurnRow;
use crate::utils::time::micros_to_datetime;

#[derive(Debug, Serialize, ToSchema)]
pub struct ConversationTurnDto {
    pub id: String,
    pub project_id: i64,
    pub persona_id: String,
    pub text: String,
    pub embedding: Vec<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<ConversationTurnRow> for ConversationTurnDto {
    fn from(row: ConversationTurnRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            persona_id: row.persona_id,
            text: row.text,
            embedding: row.embedding,
            created_at: micros_to_datetime(row.created_at),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTurnRequest {
    pub project_id: i64,

    pub persona_id: Uuid,

    #[validate(custom(function = "validate_not_blank"))]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct ListTurnsQuery {
    pub project_id: i64,

    pub persona_id: Option<Uuid>,
}
