//! Error handler for converting AppError to HTTP responses.
//!
//! Implements the IntoResponse trait for AppError with the status mapping
//! the error taxonomy prescribes, and provides the catch-all middleware
//! that turns any non-JSON error response into the standard envelope.

use axum::{
    Json,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::config::Environment;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - NotFound → 404 NOT_FOUND
    /// - BadRequest → 400 BAD_REQUEST
    /// - InvalidId → 500 INTERNAL_SERVER_ERROR (store id faults are server faults)
    /// - Database → 500 INTERNAL_SERVER_ERROR
    /// - ConnectionPool → 503 SERVICE_UNAVAILABLE
    /// - Configuration / Internal → 500 INTERNAL_SERVER_ERROR
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            AppError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("NOT_FOUND", &self.to_string()),
            ),
            AppError::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("BAD_REQUEST", message),
            ),
            AppError::InvalidId { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("INVALID_ID", &self.to_string()),
            ),
            AppError::Database { operation, source } => {
                tracing::error!(operation = %operation, error = %source, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    with_debug_details(
                        ErrorResponse::new(
                            "DATABASE_ERROR",
                            &format!("Database operation failed: {}", operation),
                        ),
                        source,
                    ),
                )
            }
            AppError::ConnectionPool { source } => {
                tracing::error!(error = %source, "Connection pool error");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable"),
                )
            }
            AppError::Configuration { key, source } => {
                tracing::error!(key = %key, error = %source, "Configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("CONFIGURATION_ERROR", &format!("Configuration error: {}", key)),
                )
            }
            AppError::Internal { source } => {
                tracing::error!(error = %source, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    with_debug_details(
                        ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred"),
                        source,
                    ),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Attaches the underlying fault text only in development.
fn with_debug_details(response: ErrorResponse, source: &anyhow::Error) -> ErrorResponse {
    if Environment::from_env() == Environment::Development {
        response.with_details(&source.to_string())
    } else {
        response
    }
}

/// Catch-all middleware that guards against any uncaught fault.
///
/// Error responses produced outside the AppError path (router 404s, method
/// mismatches, panics converted by the framework) come back as plain text;
/// this rewrites them into the standard JSON envelope with a generic
/// message so no caller ever sees a non-JSON error body.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    // AppError responses are already JSON; leave them alone.
    if let Some(content_type) = response.headers().get("content-type") {
        if content_type
            .to_str()
            .unwrap_or("")
            .contains("application/json")
        {
            return response;
        }
    }

    let error_response = match status {
        StatusCode::NOT_FOUND => {
            ErrorResponse::new("NOT_FOUND", "The requested resource was not found")
        }
        StatusCode::METHOD_NOT_ALLOWED => {
            ErrorResponse::new("METHOD_NOT_ALLOWED", "HTTP method not allowed for this endpoint")
        }
        status if status.is_client_error() => ErrorResponse::new("BAD_REQUEST", "Bad request"),
        _ => ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred"),
    };

    (status, Json(error_response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::not_found("Product").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_request_maps_to_400() {
        let response = AppError::bad_request("nope").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_id_maps_to_500() {
        let response = AppError::InvalidId {
            value: "abc".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_connection_pool_maps_to_503() {
        let response = AppError::ConnectionPool {
            source: anyhow::anyhow!("pool exhausted"),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let response = AppError::Internal {
            source: anyhow::anyhow!("boom"),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
