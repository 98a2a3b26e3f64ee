//! Requirement API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::extractors::{ApiPath, ValidatedJson, ValidatedQuery};
use crate::api::types::ApiError;
use crate::data::TransactionalService;
use crate::data::types::NewRequirement;
use crate::domain::requirements as service;

use types::{
    CreateRequirementRequest, ListRequirementsQuery, RequirementDto, UpdateRequirementRequest,
};

#[derive(Clone)]
pub struct RequirementsApiState {
    pub database: Arc<TransactionalService>,
}

pub fn routes(database: Arc<TransactionalService>) -> Router<()> {
    let state = RequirementsApiState { database };

    Router::new()
        .route("/", get(list_requirements).post(create_requirement))
        .route(
            "/{requirement_id}",
            patch(update_requirement).delete(delete_requirement),
        )
        .with_state(state)
}

/// Requirements of a project in creation order
#[utoipa::path(
    get,
    path = "/api/v1/requirements",
    tag = "requirements",
    params(ListRequirementsQuery),
    responses(
        (status = 200, description = "Requirements", body = Vec<RequirementDto>),
        (status = 400, description = "Persona belongs to another project"),
        (status = 404, description = "Project or persona not found")
    )
)]
pub async fn list_requirements(
    State(state): State<RequirementsApiState>,
    ValidatedQuery(query): ValidatedQuery<ListRequirementsQuery>,
) -> Result<Json<Vec<RequirementDto>>, ApiError> {
    let repo = state.database.repository();
    let persona_id = query.persona_id.map(|id| id.to_string());
    let rows =
        service::list_requirements(repo.as_ref(), query.project_id, persona_id.as_deref()).await?;
    Ok(Json(rows.into_iter().map(RequirementDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/requirements",
    tag = "requirements",
    request_body = CreateRequirementRequest,
    responses(
        (status = 201, description = "Requirement created", body = RequirementDto),
        (status = 400, description = "Invalid request or persona belongs to another project"),
        (status = 404, description = "Project or persona not found")
    )
)]
pub async fn create_requirement(
    State(state): State<RequirementsApiState>,
    ValidatedJson(body): ValidatedJson<CreateRequirementRequest>,
) -> Result<(StatusCode, Json<RequirementDto>), ApiError> {
    let repo = state.database.repository();
    let new = NewRequirement {
        project_id: body.project_id,
        persona_id: body.persona_id.to_string(),
        text: body.text,
        requirement_type: body.requirement_type,
        confidence: body.confidence,
        cluster_id: body.cluster_id.map(|id| id.to_string()),
    };
    let row = service::create_requirement(repo.as_ref(), new).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/requirements/{requirement_id}",
    tag = "requirements",
    params(("requirement_id" = Uuid, Path, description = "Requirement ID")),
    request_body = UpdateRequirementRequest,
    responses(
        (status = 200, description = "Requirement updated", body = RequirementDto),
        (status = 400, description = "No fields supplied or invalid value"),
        (status = 404, description = "Requirement not found")
    )
)]
pub async fn update_requirement(
    State(state): State<RequirementsApiState>,
    ApiPath(requirement_id): ApiPath<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateRequirementRequest>,
) -> Result<Json<RequirementDto>, ApiError> {
    let repo = state.database.repository();
    let row =
        service::update_requirement(repo.as_ref(), &requirement_id.to_string(), body.into())
            .await?;
    Ok(Json(row.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/requirements/{requirement_id}",
    tag = "requirements",
    params(("requirement_id" = Uuid, Path, description = "Requirement ID")),
    responses(
        (status = 204, description = "Requirement deleted"),
        (status = 404, description = "Requirement not found")
    )
)]
pub async fn delete_requirement(
    State(state): State<RequirementsApiState>,
    ApiPath(requirement_id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = state.database.repository();
    service::delete_requirement(repo.as_ref(), &requirement_id.to_string()).await?;
    Ok(StatusCode::NO_CONTENT)
}
