//! OpenAPI document

use axum::http::header;
use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{
    auth, clients, conversations, health, intake, organizations, personas, projects,
    requirements, users,
};
use crate::data::types::{PersonaRole, ProjectStatus, RequirementType};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AI PM API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Project and requirements tracking"
    ),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "auth", description = "Identity endpoints"),
        (name = "organizations", description = "Organization management"),
        (name = "users", description = "User management"),
        (name = "clients", description = "Client management"),
        (name = "projects", description = "Projects and rollups"),
        (name = "personas", description = "Project personas"),
        (name = "requirements", description = "Requirements"),
        (name = "conversations", description = "Conversation turns"),
        (name = "intake", description = "Requirement extraction")
    ),
    paths(
        health::ping,
        auth::me,
        auth::callback,
        organizations::list_organizations,
        organizations::create_org,
        organizations::get_org,
        organizations::delete_org,
        users::list_users,
        users::create_user,
        users::get_user,
        users::delete_user,
        clients::list_clients,
        clients::create_client,
        clients::get_client,
        projects::list_projects,
        projects::create_project,
        projects::get_project,
        projects::update_project,
        projects::delete_project,
        personas::list_personas,
        personas::create_persona,
        personas::get_persona,
        personas::update_persona,
        personas::delete_persona,
        requirements::list_requirements,
        requirements::create_requirement,
        requirements::update_requirement,
        requirements::delete_requirement,
        conversations::list_turns,
        conversations::create_turn,
        intake::extract,
    ),
    components(schemas(
        ProjectStatus,
        PersonaRole,
        RequirementType,
        health::HealthResponse,
        auth::MeResponse,
        auth::CallbackResponse,
        organizations::types::OrganizationDto,
        organizations::types::CreateOrgRequest,
        users::types::UserDto,
        users::types::CreateUserRequest,
        clients::types::ClientDto,
        clients::types::CreateClientRequest,
        projects::types::ProjectDto,
        projects::types::ProjectSummaryDto,
        projects::types::PersonaSummaryDto,
        projects::types::RequirementCountsDto,
        projects::types::ProjectDetailDto,
        projects::types::CreateProjectRequest,
        projects::types::UpdateProjectRequest,
        personas::types::PersonaDto,
        personas::types::CreatePersonaRequest,
        personas::types::UpdatePersonaRequest,
        requirements::types::RequirementDto,
        requirements::types::CreateRequirementRequest,
        requirements::types::UpdateRequirementRequest,
        conversations::types::ConversationTurnDto,
        conversations::types::CreateTurnRequest,
        intake::ExtractRequest,
    ))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_resource_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/projects",
            "/api/v1/projects/{project_id}",
            "/api/v1/personas/{persona_id}",
            "/api/v1/requirements",
            "/api/v1/intake/extract",
            "/api/v1/auth/me",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
