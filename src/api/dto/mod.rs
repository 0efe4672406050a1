//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `document` - Generic record/confirmation response DTOs
//! - `error` - Common error response DTOs
//! - `health` - Health check DTOs

mod document;
mod error;
mod health;

pub use document::{DocumentResponse, MessageResponse};
pub use error::ErrorResponse;
pub use health::{DatabaseStatus, HealthResponse, HealthStatus};
