//! Health check endpoint

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/v1/ping",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn ping() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
