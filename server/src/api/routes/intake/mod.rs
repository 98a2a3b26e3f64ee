//! Intake endpoint: free text in, requirements out

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::requirements::types::RequirementDto;
use crate::api::extractors::ValidatedJson;
use crate::api::types::{ApiError, validate_not_blank};
use crate::data::TransactionalService;
use crate::domain::intake;

#[derive(Clone)]
pub struct IntakeApiState {
    pub database: Arc<TransactionalService>,
}

pub fn routes(database: Arc<TransactionalService>) -> Router<()> {
    let state = IntakeApiState { database };

    Router::new()
        .route("/extract", post(extract))
        .with_state(state)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ExtractRequest {
    pub project_id: i64,

    pub persona_id: Uuid,

    #[validate(custom(function = "validate_not_blank"))]
    pub text: String,
}

/// Split text into requirements and store them for the persona
#[utoipa::path(
    post,
    path = "/api/v1/intake/extract",
    tag = "intake",
    request_body = ExtractRequest,
    responses(
        (status = 201, description = "Requirements created", body = Vec<RequirementDto>),
        (status = 400, description = "Blank text or persona belongs to another project"),
        (status = 404, description = "Project or persona not found"),
        (status = 422, description = "Nothing could be extracted")
    )
)]
pub async fn extract(
    State(state): State<IntakeApiState>,
    ValidatedJson(body): ValidatedJson<ExtractRequest>,
) -> Result<(StatusCode, Json<Vec<RequirementDto>>), ApiError> {
    let repo = state.database.repository();
    let rows = intake::extract_and_store(
        repo.as_ref(),
        body.project_id,
        &body.persona_id.to_string(),
        &body.text,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(rows.into_iter().map(RequirementDto::from).collect()),
    ))
}
