//! HTTP middleware (CORS, 404 handler)

use axum::extract::Request;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::types::ApiError;
use crate::core::config::is_all_interfaces;
use crate::core::constants::{HEADER_DEV_ROLES, HEADER_DEV_USER};

/// Allowed origins configuration
#[derive(Debug, Clone)]
pub struct AllowedOrigins {
    origins: Vec<String>,
}

impl AllowedOrigins {
    /// Create allowed origins from host and port configuration
    pub fn new(host: &str, port: u16) -> Self {
        let dev_port = port.saturating_add(1);

        // Loopback and wildcard binds accept both loopback spellings
        let base_hosts: Vec<&str> =
            if is_all_interfaces(host) || host == "127.0.0.1" || host == "localhost" {
                vec!["localhost", "127.0.0.1"]
            } else {
                vec![host]
            };

        let origins = base_hosts
            .iter()
            .flat_map(|h| {
                [
                    format!("http://{}:{}", h, port),
                    format!("http://{}:{}", h, dev_port),
                    format!("http://{}", h),
                ]
            })
            .collect();

        Self { origins }
    }

    /// Check if an origin is allowed
    pub fn is_allowed(&self, origin: &str) -> bool {
        self.origins.iter().any(|o| o == origin)
    }

    fn as_header_values(&self) -> Vec<HeaderValue> {
        self.origins.iter().filter_map(|o| o.parse().ok()).collect()
    }
}

/// Create CORS layer
pub fn cors(allowed: &AllowedOrigins) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed.as_header_values()))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
            header::HeaderName::from_static(HEADER_DEV_USER),
            header::HeaderName::from_static(HEADER_DEV_ROLES),
        ])
        .allow_credentials(true)
}

/// JSON 404 for unmatched routes
pub async fn handle_404(req: Request) -> ApiError {
    tracing::debug!(method = %req.method(), uri = %req.uri(), "[404] No route");
    ApiError::not_found(
        "ROUTE_NOT_FOUND",
        format!("No route for {} {}", req.method(), req.uri().path()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_origins() {
        let origins = AllowedOrigins::new("127.0.0.1", 8000);
        assert!(origins.is_allowed("http://localhost:8000"));
        assert!(origins.is_allowed("http://127.0.0.1:8001"));
        assert!(origins.is_allowed("http://localhost"));
        assert!(!origins.is_allowed("http://evil.test"));
    }

    #[test]
    fn test_named_host_origins() {
        let origins = AllowedOrigins::new("pm.internal", 9000);
        assert!(origins.is_allowed("http://pm.internal:9000"));
        assert!(!origins.is_allowed("http://localhost:9000"));
    }
}
