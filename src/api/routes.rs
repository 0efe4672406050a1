//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::api::handlers::documents::document_routes;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::models::{Product, User};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Routes
/// - `/products` - Product CRUD operations
/// - `/users` - User CRUD operations
/// - `/health` - Liveness and store connectivity
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs
/// first on the way in):
/// 1. Request ID middleware - generates/propagates request IDs
/// 2. Logging middleware - logs requests with request IDs
/// 3. Global error handler - rewrites non-JSON error responses
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/products", document_routes::<Product>())
        .nest("/users", document_routes::<User>())
        .merge(handlers::health::health_routes())
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use diesel_async::AsyncPgConnection;
    use diesel_async::pooled_connection::AsyncDieselConnectionManager;
    use diesel_async::pooled_connection::bb8::Pool;
    use tower::ServiceExt;

    // build_unchecked never opens a connection, so every test below runs
    // without a database as long as it stays out of the repository layer.
    fn test_router() -> Router {
        let manager =
            AsyncDieselConnectionManager::<AsyncPgConnection>::new("postgres://localhost/unused");
        let pool = Pool::builder().build_unchecked(manager);
        create_router(AppState::new(pool))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_route_returns_json_404() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/nowhere")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert!(content_type.to_str().unwrap().contains("application/json"));
        let json = body_json(response).await;
        assert!(json["message"].is_string());
    }

    #[tokio::test]
    async fn test_method_not_allowed_returns_json_envelope() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method(Method::PATCH)
                    .uri("/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let json = body_json(response).await;
        assert_eq!(json["code"], "METHOD_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_malformed_id_reports_as_internal_fault() {
        // Id parsing happens before any store access; a malformed id is a
        // 500-class fault, not a client error.
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/users/not-a-valid-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("not-a-valid-id")
        );
    }

    #[tokio::test]
    async fn test_invalid_json_body_returns_400() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/products")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_request_id_header_is_echoed() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/nowhere")
                    .header("x-request-id", "trace-me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("x-request-id").unwrap(),
            "trace-me"
        );
    }
}
