//! Conversation API endpoints (append-only)

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::types::ApiError;
use crate::data::TransactionalService;
use crate::domain::conversations as service;

use types::{ConversationTurnDto, CreateTurnRequest, ListTurnsQuery};

#[derive(Clone)]
pub struct ConversationsApiState {
    pub database: Arc<TransactionalService>,
}

pub fn routes(database: Arc<TransactionalService>) -> Router<()> {
    let state = ConversationsApiState { database };

    Router::new()
        .route("/", get(list_turns).post(create_turn))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/conversations",
    tag = "conversations",
    params(ListTurnsQuery),
    responses(
        (status = 200, description = "Turns in creation order", body = Vec<ConversationTurnDto>),
        (status = 404, description = "Project or persona not found")
    )
)]
pub async fn list_turns(
    State(state): State<ConversationsApiState>,
    ValidatedQuery(query): ValidatedQuery<ListTurnsQuery>,
) -> Result<Json<Vec<ConversationTurnDto>>, ApiError> {
    let repo = state.database.repository();
    let persona_id = query.persona_id.map(|id| id.to_string());
    let turns = service::list_turns(repo.as_ref(), query.project_id, persona_id.as_deref()).await?;
    Ok(Json(turns.into_iter().map(ConversationTurnDto::from).collect()))
}

/// Record a conversation turn with its placeholder embedding
#[utoipa::path(
    post,
    path = "/api/v1/conversations",
    tag = "conversations",
    request_body = CreateTurnRequest,
    responses(
        (status = 201, description = "Turn recorded", body = ConversationTurnDto),
        (status = 400, description = "Blank text or persona belongs to another project"),
        (status = 404, description = "Project or persona not found")
    )
)]
pub async fn create_turn(
    State(state): State<ConversationsApiState>,
    ValidatedJson(body): ValidatedJson<CreateTurnRequest>,
) -> Result<(StatusCode, Json<ConversationTurnDto>), ApiError> {
    let repo = state.database.repository();
    let turn = service::create_turn(
        repo.as_ref(),
        body.project_id,
        &body.persona_id.to_string(),
        &body.text,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(turn.into())))
}
