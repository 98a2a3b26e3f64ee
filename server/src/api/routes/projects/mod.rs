//! Project API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{ApiPath, ValidatedJson, ValidatedQuery};
use crate::api::types::ApiError;
use crate::data::TransactionalService;
use crate::data::types::{NewProject, ProjectFilter};
use crate::domain::{projects as service, rollup};

use types::{
    CreateProjectRequest, ListProjectsQuery, ProjectDetailDto, ProjectSummaryDto,
    UpdateProjectRequest,
};

/// Shared state for Projects API endpoints
#[derive(Clone)]
pub struct ProjectsApiState {
    pub database: Arc<TransactionalService>,
}

/// Build Projects API routes
pub fn routes(database: Arc<TransactionalService>) -> Router<()> {
    let state = ProjectsApiState { database };

    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/{project_id}",
            get(get_project)
                .patch(update_project)
                .delete(delete_project),
        )
        .with_state(state)
}

/// List an organization's projects with rollup counts
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "projects",
    params(ListProjectsQuery),
    responses(
        (status = 200, description = "Projects in creation order", body = Vec<ProjectSummaryDto>),
        (status = 400, description = "Client belongs to another organization"),
        (status = 404, description = "Organization, client or user not found")
    )
)]
pub async fn list_projects(
    State(state): State<ProjectsApiState>,
    ValidatedQuery(query): ValidatedQuery<ListProjectsQuery>,
) -> Result<Json<Vec<ProjectSummaryDto>>, ApiError> {
    let repo = state.database.repository();
    let filter = ProjectFilter {
        organization_id: query.organization_id,
        client_id: query.client_id,
        user_id: query.user_id,
    };
    let rows = service::list_projects(repo.as_ref(), filter).await?;
    Ok(Json(rows.into_iter().map(ProjectSummaryDto::from).collect()))
}

/// Create a project
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    tag = "projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectDetailDto),
        (status = 400, description = "Invalid request or client belongs to another organization"),
        (status = 404, description = "Organization or client not found")
    )
)]
pub async fn create_project(
    State(state): State<ProjectsApiState>,
    ValidatedJson(body): ValidatedJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectDetailDto>), ApiError> {
    let repo = state.database.repository();
    let new = NewProject {
        name: body.name,
        description: body.description,
        organization_id: body.organization_id,
        client_id: body.client_id,
        status: body.status,
    };
    let detail = service::create_project(repo.as_ref(), new).await?;
    Ok((StatusCode::CREATED, Json(detail.into())))
}

/// Project detail with personas and requirement counts by type
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}",
    tag = "projects",
    params(("project_id" = i64, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project detail", body = ProjectDetailDto),
        (status = 404, description = "Project not found")
    )
)]
pub async fn get_project(
    State(state): State<ProjectsApiState>,
    ApiPath(project_id): ApiPath<i64>,
) -> Result<Json<ProjectDetailDto>, ApiError> {
    let repo = state.database.repository();
    let detail = rollup::project_detail(repo.as_ref(), project_id).await?;
    Ok(Json(detail.into()))
}

/// Update name, description or status
#[utoipa::path(
    patch,
    path = "/api/v1/projects/{project_id}",
    tag = "projects",
    params(("project_id" = i64, Path, description = "Project ID")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ProjectDetailDto),
        (status = 400, description = "No fields supplied or invalid value"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn update_project(
    State(state): State<ProjectsApiState>,
    ApiPath(project_id): ApiPath<i64>,
    ValidatedJson(body): ValidatedJson<UpdateProjectRequest>,
) -> Result<Json<ProjectDetailDto>, ApiError> {
    let repo = state.database.repository();
    let detail = service::update_project(repo.as_ref(), project_id, body.into()).await?;
    Ok(Json(detail.into()))
}

/// Delete a project with its personas, requirements and conversation turns
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{project_id}",
    tag = "projects",
    params(("project_id" = i64, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn delete_project(
    State(state): State<ProjectsApiState>,
    ApiPath(project_id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = state.database.repository();
    service::delete_project(repo.as_ref(), project_id).await?;
    tracing::debug!(project_id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
