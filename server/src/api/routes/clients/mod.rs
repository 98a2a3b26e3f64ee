//! Client API endpoints
//!
//! Clients cannot be deleted through the API.

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{ApiPath, ValidatedJson, ValidatedQuery};
use crate::api::types::ApiError;
use crate::data::TransactionalService;
use crate::domain::clients as service;

use types::{ClientDto, CreateClientRequest, ListClientsQuery};

#[derive(Clone)]
pub struct ClientsApiState {
    pub database: Arc<TransactionalService>,
}

pub fn routes(database: Arc<TransactionalService>) -> Router<()> {
    let state = ClientsApiState { database };

    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route("/{client_id}", get(get_client))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/clients",
    tag = "clients",
    params(ListClientsQuery),
    responses(
        (status = 200, description = "Clients of the organization", body = Vec<ClientDto>),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn list_clients(
    State(state): State<ClientsApiState>,
    ValidatedQuery(query): ValidatedQuery<ListClientsQuery>,
) -> Result<Json<Vec<ClientDto>>, ApiError> {
    let repo = state.database.repository();
    let clients = service::list_clients(repo.as_ref(), query.organization_id).await?;
    Ok(Json(clients.into_iter().map(ClientDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/clients",
    tag = "clients",
    request_body = CreateClientRequest,
    responses(
        (status = 201, description = "Client created", body = ClientDto),
        (status = 404, description = "Organization not found")
    )
)]
pub async fn create_client(
    State(state): State<ClientsApiState>,
    ValidatedJson(body): ValidatedJson<CreateClientRequest>,
) -> Result<(StatusCode, Json<ClientDto>), ApiError> {
    let repo = state.database.repository();
    let client = service::create_client(repo.as_ref(), &body.name, body.organization_id).await?;
    Ok((StatusCode::CREATED, Json(ClientDto::from(client))))
}

#[utoipa::path(
    get,
    path = "/api/v1/clients/{client_id}",
    tag = "clients",
    params(("client_id" = i64, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client", body = ClientDto),
        (status = 404, description = "Client not found")
    )
)]
pub async fn get_client(
    State(state): State<ClientsApiState>,
    ApiPath(client_id): ApiPath<i64>,
) -> Result<Json<ClientDto>, ApiError> {
    let repo = state.database.repository();
    let client = service::get_client(repo.as_ref(), client_id).await?;
    Ok(Json(ClientDto::from(client)))
}
