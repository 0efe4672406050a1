//! Health check DTOs for API responses.

use serde::{Deserialize, Serialize};

/// Health check response structure.
///
/// Purely observational: reports process liveness and store connectivity.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,
    /// Store connectivity state
    pub database: DatabaseStatus,
    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Health status enumeration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Process up, store reachable
    Healthy,
    /// Process up, store unreachable
    Degraded,
}

/// Store connectivity state.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
}
