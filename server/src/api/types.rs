//! Shared API types
//!
//! Error responses and the helpers request types use to validate
//! tri-state patch bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use validator::ValidationError;

use crate::domain::DomainError;
use crate::domain::projects::EMPTY_PATCH_MESSAGE;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Unauthorized { code: String, message: String },
    Conflict { code: String, message: String },
    Unprocessable { code: String, message: String },
    NotImplemented { message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn unauthorized(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn conflict(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::NotImplemented {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn from_data(e: crate::data::DataError) -> Self {
        tracing::error!(error = %e, "Data error");
        Self::internal("Database operation failed")
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { entity, .. } => Self::not_found(
                format!("{}_NOT_FOUND", entity.to_uppercase()),
                e.to_string(),
            ),
            DomainError::InvalidAssociation(message) => {
                Self::bad_request("INVALID_ASSOCIATION", message)
            }
            DomainError::Validation(message) => Self::bad_request("VALIDATION_ERROR", message),
            DomainError::ExtractionEmpty => Self::Unprocessable {
                code: "EXTRACTION_EMPTY".to_string(),
                message: e.to_string(),
            },
            DomainError::Conflict(message) => Self::conflict("CONFLICT", message),
            DomainError::Data(e) => Self::from_data(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::Unauthorized { code, message } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", code, message)
            }
            Self::Conflict { code, message } => (StatusCode::CONFLICT, "conflict", code, message),
            Self::Unprocessable { code, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "unprocessable_entity",
                code,
                message,
            ),
            Self::NotImplemented { message } => (
                StatusCode::NOT_IMPLEMENTED,
                "not_implemented",
                "NOT_IMPLEMENTED".to_string(),
                message,
            ),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

// ============================================================================
// Patch validation
// ============================================================================

/// Error for a patch body with no fields present
pub fn empty_patch_error() -> ValidationError {
    ValidationError::new("empty_patch").with_message(EMPTY_PATCH_MESSAGE.into())
}

/// Reject an explicit `null` on a field that cannot be cleared
pub fn reject_null<T>(field: &Option<Option<T>>, name: &str) -> Result<(), ValidationError> {
    if matches!(field, Some(None)) {
        return Err(ValidationError::new("null_not_allowed")
            .with_message(format!("{} cannot be null", name).into()));
    }
    Ok(())
}

/// Reject text that is empty or only whitespace
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message("text must contain non-whitespace characters".into()));
    }
    Ok(())
}

/// Check the character length of a present string
pub fn check_length(value: Option<&str>, name: &str, max: u64) -> Result<(), ValidationError> {
    if let Some(value) = value {
        let len = value.chars().count() as u64;
        if len == 0 || len > max {
            return Err(ValidationError::new("length")
                .with_message(format!("{} must be 1-{} characters", name, max).into()));
        }
    }
    Ok(())
}
