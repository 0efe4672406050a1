//! Health check endpoint handler.
//!
//! Reports process liveness and store connectivity for monitoring and load
//! balancer checks. Purely observational: no side effects, always 200. The
//! probe goes straight to the connection pool rather than through a
//! repository.

use axum::{Router, extract::State, response::Json, routing::get};
use diesel_async::RunQueryDsl;

use crate::api::dto::{DatabaseStatus, HealthResponse, HealthStatus};
use crate::state::AppState;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Liveness plus store connectivity
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health
///
/// # Example Response
/// ```json
/// {
///   "status": "healthy",
///   "database": "connected",
///   "timestamp": "2025-08-25T12:00:00Z"
/// }
/// ```
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = check_database(&state).await;
    let status = match database {
        DatabaseStatus::Connected => HealthStatus::Healthy,
        DatabaseStatus::Disconnected => HealthStatus::Degraded,
    };

    Json(HealthResponse {
        status,
        database,
        timestamp: jiff::Timestamp::now().to_string(),
    })
}

/// Probes the store with a trivial query on a pooled connection.
async fn check_database(state: &AppState) -> DatabaseStatus {
    let mut conn = match state.db_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: connection pool unavailable");
            return DatabaseStatus::Disconnected;
        }
    };

    match diesel::sql_query("SELECT 1").execute(&mut conn).await {
        Ok(_) => DatabaseStatus::Connected,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: probe query failed");
            DatabaseStatus::Disconnected
        }
    }
}
