//! User API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{ApiPath, ValidatedJson, ValidatedQuery};
use crate::api::types::ApiError;
use crate::data::TransactionalService;
use crate::domain::users as service;

use types::{CreateUserRequest, ListUsersQuery, UserDto};

#[derive(Clone)]
pub struct UsersApiState {
    pub database: Arc<TransactionalService>,
}

pub fn routes(database: Arc<TransactionalService>) -> Router<()> {
    let state = UsersApiState { database };

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{user_id}", get(get_user).delete(delete_user))
        .with_state(state)
}

/// List users, optionally for one organization
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Users in creation order", body = Vec<UserDto>),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn list_users(
    State(state): State<UsersApiState>,
    ValidatedQuery(query): ValidatedQuery<ListUsersQuery>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let repo = state.database.repository();
    let users = service::list_users(repo.as_ref(), query.organization_id).await?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Invalid email"),
        (status = 404, description = "Organization not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<UsersApiState>,
    ValidatedJson(body): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let repo = state.database.repository();
    let user = service::create_user(repo.as_ref(), &body.email, body.organization_id).await?;
    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserDto),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<UsersApiState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<UserDto>, ApiError> {
    let repo = state.database.repository();
    let user = service::get_user(repo.as_ref(), user_id).await?;
    Ok(Json(UserDto::from(user)))
}

/// Delete a user. Linked personas stay and lose their user reference.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<UsersApiState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = state.database.repository();
    service::delete_user(repo.as_ref(), user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
