use thiserror::Error;

use crate::config::ConfigError;

/// Application-wide error type that represents all possible errors in the system.
///
/// Variants map one-to-one onto the HTTP error surface: NotFound (404),
/// BadRequest (400), ConnectionPool (503) and everything else (500).
#[derive(Error, Debug)]
pub enum AppError {
    /// No record matched the given identifier
    #[error("{entity} not found")]
    NotFound {
        entity: String,
    },

    /// Malformed create/update request or store rejection of a write
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Identifier string is not a valid document id for the store
    #[error("Invalid document id: {value}")]
    InvalidId { value: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error (store unreachable)
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// NotFound for a named collection entity, e.g. "Product not found".
    pub fn not_found(entity: &str) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
        }
    }

    /// BadRequest with an arbitrary message.
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        AppError::BadRequest {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        AppError::Database {
            operation: "database query".to_string(),
            source: anyhow::Error::new(error),
        }
    }
}

impl From<bb8::RunError<diesel_async::pooled_connection::PoolError>> for AppError {
    fn from(error: bb8::RunError<diesel_async::pooled_connection::PoolError>) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::new(error),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        AppError::Configuration {
            key: "configuration".to_string(),
            source: anyhow::Error::new(error),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
