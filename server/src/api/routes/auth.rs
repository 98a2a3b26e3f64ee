//! Authentication endpoints

use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::auth::AuthenticatedUser;

pub fn routes() -> Router<()> {
    Router::new()
        .route("/me", get(me))
        .route("/callback", get(callback))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub email: String,
    pub roles: Vec<String>,
    pub is_admin: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CallbackQuery {
    pub state: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CallbackResponse {
    pub status: &'static str,
    pub detail: &'static str,
    pub state: Option<String>,
    pub code: Option<String>,
}

/// Current identity
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Authenticated identity", body = MeResponse),
        (status = 400, description = "Malformed development header"),
        (status = 401, description = "Not authenticated"),
        (status = 501, description = "Bearer tokens are not verified")
    )
)]
pub async fn me(user: AuthenticatedUser) -> Json<MeResponse> {
    let is_admin = user.is_admin();
    Json(MeResponse {
        email: user.email,
        roles: user.roles,
        is_admin,
    })
}

/// OAuth callback placeholder
#[utoipa::path(
    get,
    path = "/api/v1/auth/callback",
    tag = "auth",
    params(CallbackQuery),
    responses(
        (status = 200, description = "Callback acknowledged", body = CallbackResponse)
    )
)]
pub async fn callback(query: axum::extract::Query<CallbackQuery>) -> Json<CallbackResponse> {
    let CallbackQuery { state, code } = query.0;
    Json(CallbackResponse {
        status: "pending",
        detail: "OAuth callback handling not implemented",
        state,
        code,
    })
}
