//! Organization API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{ApiPath, ValidatedJson};
use crate::api::types::ApiError;
use crate::data::TransactionalService;
use crate::domain::organizations as service;

use types::{CreateOrgRequest, OrganizationDto};

/// Shared state for Organizations API endpoints
#[derive(Clone)]
pub struct OrganizationsApiState {
    pub database: Arc<TransactionalService>,
}

/// Build Organizations API routes
pub fn routes(database: Arc<TransactionalService>) -> Router<()> {
    let state = OrganizationsApiState { database };

    Router::new()
        .route("/", get(list_organizations).post(create_org))
        .route("/{org_id}", get(get_org).delete(delete_org))
        .with_state(state)
}

/// List all organizations
#[utoipa::path(
    get,
    path = "/api/v1/organizations",
    tag = "organizations",
    responses(
        (status = 200, description = "Organizations in creation order", body = Vec<OrganizationDto>)
    )
)]
pub async fn list_organizations(
    State(state): State<OrganizationsApiState>,
) -> Result<Json<Vec<OrganizationDto>>, ApiError> {
    let repo = state.database.repository();
    let orgs = service::list_organizations(repo.as_ref()).await?;
    Ok(Json(orgs.into_iter().map(OrganizationDto::from).collect()))
}

/// Create an organization
#[utoipa::path(
    post,
    path = "/api/v1/organizations",
    tag = "organizations",
    request_body = CreateOrgRequest,
    responses(
        (status = 201, description = "Organization created", body = OrganizationDto),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_org(
    State(state): State<OrganizationsApiState>,
    ValidatedJson(body): ValidatedJson<CreateOrgRequest>,
) -> Result<(StatusCode, Json<OrganizationDto>), ApiError> {
    let repo = state.database.repository();
    let org = service::create_organization(repo.as_ref(), &body.name).await?;
    Ok((StatusCode::CREATED, Json(OrganizationDto::from(org))))
}

/// Get an organization by ID
#[utoipa::path(
    get,
    path = "/api/v1/organizations/{org_id}",
    tag = "organizations",
    params(("org_id" = i64, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Organization", body = OrganizationDto),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn get_org(
    State(state): State<OrganizationsApiState>,
    ApiPath(org_id): ApiPath<i64>,
) -> Result<Json<OrganizationDto>, ApiError> {
    let repo = state.database.repository();
    let org = service::get_organization(repo.as_ref(), org_id).await?;
    Ok(Json(OrganizationDto::from(org)))
}

/// Delete an organization and everything it owns
#[utoipa::path(
    delete,
    path = "/api/v1/organizations/{org_id}",
    tag = "organizations",
    params(("org_id" = i64, Path, description = "Organization ID")),
    responses(
        (status = 204, description = "Organization deleted"),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn delete_org(
    State(state): State<OrganizationsApiState>,
    ApiPath(org_id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = state.database.repository();
    service::delete_organization(repo.as_ref(), org_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
