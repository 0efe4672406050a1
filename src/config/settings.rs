//! Configuration settings structures for realty-rs
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "realty-rs".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_connect_retries() -> u32 {
    5
}

fn default_retry_delay() -> u64 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ============================================================================
// Database Configuration
// ============================================================================

/// Document store (PostgreSQL) configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(default)]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// How many times to retry the initial connection before giving up
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,

    /// Fixed delay between connection retries, in seconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,

    /// Whether to automatically run pending migrations on startup
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            connect_retries: default_connect_retries(),
            retry_delay: default_retry_delay(),
            auto_migrate: false,
        }
    }
}

// ============================================================================
// Logger Configuration
// ============================================================================

/// Tracing subscriber configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Log level filter, e.g. "info" or "realty_rs=debug,info"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON-formatted log lines instead of human-readable ones
    #[serde(default)]
    pub json: bool,

    /// Use ANSI colors on the console (only honored on a TTY)
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            colored: true,
        }
    }
}

// ============================================================================
// Top-level Settings
// ============================================================================

/// Complete application settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Document store configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerConfig,
}

impl Settings {
    /// Validates settings that have no usable fallback.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL must be set (database.url, DATABASE_URL or --database-url)",
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Connection pool must allow at least one connection",
            ));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                "min_connections cannot exceed max_connections",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/realty".to_string();
        settings
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 5001);
        assert_eq!(settings.database.max_connections, 10);
        assert_eq!(settings.database.connect_retries, 5);
        assert_eq!(settings.logger.level, "info");
        assert!(!settings.logger.json);
    }

    #[test]
    fn test_server_address() {
        let settings = valid_settings();
        assert_eq!(settings.server.address(), "127.0.0.1:5001");
    }

    #[test]
    fn test_validate_accepts_valid_settings() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_url() {
        let settings = Settings::default();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_pool_bounds() {
        let mut settings = valid_settings();
        settings.database.min_connections = 20;
        settings.database.max_connections = 5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_deserialize_from_partial_toml() {
        let settings: Settings = toml::from_str(
            r#"
            [server]
            port = 8080

            [database]
            url = "postgres://localhost/realty"
            "#,
        )
        .unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.database.url, "postgres://localhost/realty");
        assert!(!settings.database.auto_migrate);
    }
}
