//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::middleware::{self, AllowedOrigins};
use super::openapi::openapi_json;
use super::routes::{
    auth, clients, conversations, health, intake, organizations, personas, projects,
    requirements, users,
};
use crate::core::CoreApp;
use crate::core::constants::DEFAULT_BODY_LIMIT;
use crate::data::TransactionalService;

/// Build the full HTTP router
pub fn router(database: Arc<TransactionalService>, allowed_origins: &AllowedOrigins) -> Router {
    let api = Router::new()
        .route("/ping", get(health::ping))
        .route("/openapi.json", get(openapi_json))
        .nest("/auth", auth::routes())
        .nest("/organizations", organizations::routes(database.clone()))
        .nest("/users", users::routes(database.clone()))
        .nest("/clients", clients::routes(database.clone()))
        .nest("/projects", projects::routes(database.clone()))
        .nest("/personas", personas::routes(database.clone()))
        .nest("/requirements", requirements::routes(database.clone()))
        .nest("/conversations", conversations::routes(database.clone()))
        .nest("/intake", intake::routes(database));

    Router::new()
        .route("/healthz", get(health::ping))
        .route("/api/openapi.json", get(openapi_json))
        .nest("/api/v1", api)
        .fallback(middleware::handle_404)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(middleware::cors(allowed_origins))
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
}

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);
        Self {
            app,
            allowed_origins,
        }
    }

    /// Serve until shutdown is triggered. Returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self {
            app,
            allowed_origins,
        } = self;

        let shutdown = app.shutdown.clone();
        let addr = SocketAddr::new(app.config.server.host.parse()?, app.config.server.port);

        let router = router(app.database.clone(), &allowed_origins);

        let listener = TcpListener::bind(addr).await?;
        tracing::debug!(%addr, "HTTP server listening");
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.wait())
        .await?;

        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let database = Arc::new(TransactionalService::in_memory().await.unwrap());
        router(database, &AllowedOrigins::new("127.0.0.1", 8000))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Organization, project and one persona; returns (org_id, project_id, persona_id)
    async fn seed(app: &Router) -> (i64, i64, String) {
        let (status, org) = send(
            app,
            Method::POST,
            "/api/v1/organizations",
            Some(json!({"name": "Acme"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let org_id = org["id"].as_i64().unwrap();

        let (status, project) = send(
            app,
            Method::POST,
            "/api/v1/projects",
            Some(json!({"name": "Portal", "organization_id": org_id})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let project_id = project["id"].as_i64().unwrap();

        let (status, persona) = send(
            app,
            Method::POST,
            "/api/v1/personas",
            Some(json!({"project_id": project_id, "role": "client", "display_name": "Buyer"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let persona_id = persona["id"].as_str().unwrap().to_string();

        (org_id, project_id, persona_id)
    }

    #[tokio::test]
    async fn test_health_and_openapi() {
        let app = test_router().await;
        let (status, body) = send(&app, Method::GET, "/api/v1/ping", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = send(&app, Method::GET, "/api/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/v1/projects"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let app = test_router().await;
        let (status, body) = send(&app, Method::GET, "/api/v1/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "ROUTE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_missing_query_field_is_validation_error() {
        let app = test_router().await;
        let (status, body) = send(&app, Method::GET, "/api/v1/projects", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("organization_id"));
    }

    #[tokio::test]
    async fn test_project_detail_rollup() {
        let app = test_router().await;
        let (_, project_id, persona_id) = seed(&app).await;

        for (text, kind) in [
            ("Export CSV", "feature"),
            ("Login fails", "bug"),
            ("Faster", "feature"),
        ] {
            let (status, _) = send(
                &app,
                Method::POST,
                "/api/v1/requirements",
                Some(json!({
                    "project_id": project_id,
                    "persona_id": persona_id,
                    "text": text,
                    "type": kind,
                    "confidence": 0.5,
                })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, detail) = send(
            &app,
            Method::GET,
            &format!("/api/v1/projects/{}", project_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["name"], "Portal");
        assert_eq!(detail["status"], "active");
        assert_eq!(detail["personas"].as_array().unwrap().len(), 1);
        assert_eq!(detail["requirement_counts"]["total"], 3);
        assert_eq!(detail["requirement_counts"]["by_type"]["feature"], 2);
        assert_eq!(detail["requirement_counts"]["by_type"]["bug"], 1);
    }

    #[tokio::test]
    async fn test_project_patch_semantics() {
        let app = test_router().await;
        let (_, project_id, _) = seed(&app).await;
        let uri = format!("/api/v1/projects/{}", project_id);

        let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, body) =
            send(&app, Method::PATCH, &uri, Some(json!({"status": "paused"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "paused");
        assert_eq!(body["name"], "Portal");

        let (status, body) =
            send(&app, Method::PATCH, &uri, Some(json!({"status": "bogus"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, body) = send(
            &app,
            Method::PATCH,
            &uri,
            Some(json!({"description": null})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["description"].is_null());
    }

    #[tokio::test]
    async fn test_cross_org_client_rejected() {
        let app = test_router().await;
        let (org_id, _, _) = seed(&app).await;
        let (_, other) = send(
            &app,
            Method::POST,
            "/api/v1/organizations",
            Some(json!({"name": "Other"})),
        )
        .await;
        let (status, client) = send(
            &app,
            Method::POST,
            "/api/v1/clients",
            Some(json!({"name": "Theirs", "organization_id": other["id"]})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/projects",
            Some(json!({"name": "Wrong", "organization_id": org_id, "client_id": client["id"]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_ASSOCIATION");
    }

    #[tokio::test]
    async fn test_intake_extract_and_empty() {
        let app = test_router().await;
        let (_, project_id, persona_id) = seed(&app).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/intake/extract",
            Some(json!({
                "project_id": project_id,
                "persona_id": persona_id,
                "text": "- Enable offline access\n- Support automatic backups\n",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["text"], "Enable offline access");
        assert_eq!(rows[1]["type"], "feature");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/intake/extract",
            Some(json!({"project_id": project_id, "persona_id": persona_id, "text": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_conversation_turns_and_cascade() {
        let app = test_router().await;
        let (_, project_id, persona_id) = seed(&app).await;

        let (status, turn) = send(
            &app,
            Method::POST,
            "/api/v1/conversations",
            Some(json!({"project_id": project_id, "persona_id": persona_id, "text": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(turn["embedding"].as_array().unwrap().len(), 3);

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/v1/personas/{}", persona_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/conversations?project_id={}", project_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_persona_is_404() {
        let app = test_router().await;
        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/personas/6f1c9f7e-2f55-4a39-9d8e-6a0c2b7e0c11",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "PERSONA_NOT_FOUND");

        let (status, body) = send(&app, Method::GET, "/api/v1/personas/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "PATH_PARSE_ERROR");
    }

    #[tokio::test]
    async fn test_auth_me_dev_header() {
        let app = test_router().await;
        let request = Request::builder()
            .uri("/api/v1/auth/me")
            .header("x-dev-user", "lead@acme.test|lead")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["email"], "lead@acme.test");
        assert_eq!(body["roles"], json!(["lead"]));

        let (status, _) = send(&app, Method::GET, "/api/v1/auth/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
