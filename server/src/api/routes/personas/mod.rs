//! Persona API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::extractors::{ApiPath, ValidatedJson, ValidatedQuery};
use crate::api::types::ApiError;
use crate::data::TransactionalService;
use crate::data::types::NewPersona;
use crate::domain::personas as service;

use types::{CreatePersonaRequest, ListPersonasQuery, PersonaDto, UpdatePersonaRequest};

#[derive(Clone)]
pub struct PersonasApiState {
    pub database: Arc<TransactionalService>,
}

pub fn routes(database: Arc<TransactionalService>) -> Router<()> {
    let state = PersonasApiState { database };

    Router::new()
        .route("/", get(list_personas).post(create_persona))
        .route(
            "/{persona_id}",
            get(get_persona)
                .patch(update_persona)
                .delete(delete_persona),
        )
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/personas",
    tag = "personas",
    params(ListPersonasQuery),
    responses(
        (status = 200, description = "Personas of the project", body = Vec<PersonaDto>),
        (status = 404, description = "Project not found")
    )
)]
pub async fn list_personas(
    State(state): State<PersonasApiState>,
    ValidatedQuery(query): ValidatedQuery<ListPersonasQuery>,
) -> Result<Json<Vec<PersonaDto>>, ApiError> {
    let repo = state.database.repository();
    let personas = service::list_personas(repo.as_ref(), query.project_id).await?;
    Ok(Json(personas.into_iter().map(PersonaDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/personas",
    tag = "personas",
    request_body = CreatePersonaRequest,
    responses(
        (status = 201, description = "Persona created", body = PersonaDto),
        (status = 404, description = "Project or user not found")
    )
)]
pub async fn create_persona(
    State(state): State<PersonasApiState>,
    ValidatedJson(body): ValidatedJson<CreatePersonaRequest>,
) -> Result<(StatusCode, Json<PersonaDto>), ApiError> {
    let repo = state.database.repository();
    let new = NewPersona {
        project_id: body.project_id,
        user_id: body.user_id,
        role: body.role,
        display_name: body.display_name,
    };
    let persona = service::create_persona(repo.as_ref(), new).await?;
    Ok((StatusCode::CREATED, Json(persona.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/personas/{persona_id}",
    tag = "personas",
    params(("persona_id" = Uuid, Path, description = "Persona ID")),
    responses(
        (status = 200, description = "Persona", body = PersonaDto),
        (status = 404, description = "Persona not found")
    )
)]
pub async fn get_persona(
    State(state): State<PersonasApiState>,
    ApiPath(persona_id): ApiPath<Uuid>,
) -> Result<Json<PersonaDto>, ApiError> {
    let repo = state.database.repository();
    let persona = service::get_persona(repo.as_ref(), &persona_id.to_string()).await?;
    Ok(Json(persona.into()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/personas/{persona_id}",
    tag = "personas",
    params(("persona_id" = Uuid, Path, description = "Persona ID")),
    request_body = UpdatePersonaRequest,
    responses(
        (status = 200, description = "Persona updated", body = PersonaDto),
        (status = 400, description = "No fields supplied or invalid value"),
        (status = 404, description = "Persona not found")
    )
)]
pub async fn update_persona(
    State(state): State<PersonasApiState>,
    ApiPath(persona_id): ApiPath<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdatePersonaRequest>,
) -> Result<Json<PersonaDto>, ApiError> {
    let repo = state.database.repository();
    let persona =
        service::update_persona(repo.as_ref(), &persona_id.to_string(), body.into()).await?;
    Ok(Json(persona.into()))
}

/// Delete a persona with its requirements and conversation turns
#[utoipa::path(
    delete,
    path = "/api/v1/personas/{persona_id}",
    tag = "personas",
    params(("persona_id" = Uuid, Path, description = "Persona ID")),
    responses(
        (status = 204, description = "Persona deleted"),
        (status = 404, description = "Persona not found")
    )
)]
pub async fn delete_persona(
    State(state): State<PersonasApiState>,
    ApiPath(persona_id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = state.database.repository();
    service::delete_persona(repo.as_ref(), &persona_id.to_string()).await?;
    Ok(StatusCode::NO_CONTENT)
}
