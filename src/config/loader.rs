//! Configuration loader for realty-rs
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment as EnvSource, File, FileFormat};

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "REALTY";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources, in order of priority (lowest first):
/// 1. `default.toml` - Base default configuration
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local development overrides (optional)
/// 4. `REALTY_*` environment variables, e.g. `REALTY_SERVER__PORT`
#[derive(Debug)]
pub struct ConfigLoader {
    /// Configuration directory path
    config_dir: PathBuf,
    /// Current application environment
    environment: Environment,
}

impl ConfigLoader {
    /// Create a loader for the default `config/` directory.
    ///
    /// The application environment is read from `REALTY_APP_ENV`.
    pub fn new() -> Self {
        Self::with_dir(PathBuf::from(DEFAULT_CONFIG_DIR))
    }

    /// Create a loader for an explicit configuration directory.
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self {
            config_dir,
            environment: Environment::from_env(),
        }
    }

    /// Get the current application environment
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Load settings from all sources.
    ///
    /// A missing configuration directory is not an error: the built-in
    /// defaults plus environment variables are enough to run. A directory
    /// that exists but has no `default.toml` is treated as a misconfiguration.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let mut builder = Config::builder();

        if self.config_dir.is_dir() {
            let default_file = self.config_dir.join("default.toml");
            if !default_file.is_file() {
                return Err(ConfigError::file_not_found(
                    default_file.display().to_string(),
                ));
            }
            builder = Self::add_file(builder, &default_file, true);

            let env_file = self
                .config_dir
                .join(format!("{}.toml", self.environment.as_str()));
            builder = Self::add_file(builder, &env_file, false);

            let local_file = self.config_dir.join("local.toml");
            builder = Self::add_file(builder, &local_file, false);
        }

        // Environment variables always win:
        // REALTY_SERVER__PORT -> server.port
        builder = builder.add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn add_file(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(required),
        )
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
