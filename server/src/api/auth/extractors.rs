//! Identity extractor for Axum handlers
//!
//! ```ignore
//! pub async fn me(user: AuthenticatedUser) -> Json<MeResponse> { ... }
//! ```

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::dev::{DevHeaderError, parse_dev_user, parse_roles};
use crate::api::types::ApiError;
use crate::core::constants::{HEADER_DEV_ROLES, HEADER_DEV_USER};

/// Caller identity supplied by the authentication collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == "admin")
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(dev_user) = header(parts, HEADER_DEV_USER) {
            let (email, roles) = parse_dev_user(dev_user).map_err(|e| match e {
                DevHeaderError::MissingEmail => ApiError::bad_request(
                    "INVALID_DEV_USER",
                    "x-dev-user header must include an email before the optional role list",
                ),
            })?;
            let roles = match parts.headers.get(HEADER_DEV_ROLES) {
                Some(raw) => parse_roles(raw.to_str().ok()),
                None => roles,
            };
            return Ok(Self { email, roles });
        }

        if let Some(authorization) = header(parts, AUTHORIZATION.as_str()) {
            let (scheme, token) = authorization.split_once(' ').unwrap_or((authorization, ""));
            if !scheme.eq_ignore_ascii_case("bearer") {
                return Err(ApiError::unauthorized(
                    "UNSUPPORTED_SCHEME",
                    "Unsupported authorization scheme",
                ));
            }
            if token.trim().is_empty() {
                return Err(ApiError::unauthorized(
                    "INVALID_AUTHORIZATION",
                    "Invalid authorization header",
                ));
            }
            return Err(ApiError::not_implemented(
                "Bearer token verification not implemented",
            ));
        }

        Err(ApiError::unauthorized("UNAUTHENTICATED", "Not authenticated"))
    }
}
