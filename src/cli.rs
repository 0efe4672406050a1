//! Command line interface.
//!
//! Flags mirror the configuration file layout; anything given on the command
//! line (or through the associated environment variable) takes priority over
//! the layered TOML configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigLoader, Settings};
use crate::error::AppResult;

/// Generic document CRUD REST backend.
#[derive(Debug, Parser)]
#[command(name = "realty-rs", version = crate::clap_long_version())]
pub struct Cli {
    /// Directory holding default.toml / {environment}.toml / local.toml
    #[arg(long, env = "REALTY_CONFIG_DIR", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Listening port (overrides server.port)
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Store connection string (overrides database.url)
    #[arg(long, env = "DATABASE_URL", value_name = "URL")]
    pub database_url: Option<String>,

    /// Log level filter, e.g. "info" or "realty_rs=debug"
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Validate configuration and exit without starting the server
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Loads settings from the layered configuration and applies CLI overrides.
    ///
    /// Validation runs after the overrides so that a connection string given
    /// only on the command line still satisfies the database.url requirement.
    pub fn load_settings(&self) -> AppResult<Settings> {
        let loader = match &self.config_dir {
            Some(dir) => ConfigLoader::with_dir(dir.clone()),
            None => ConfigLoader::new(),
        };
        let mut settings = loader.load()?;
        self.apply_overrides(&mut settings);
        settings.validate()?;
        Ok(settings)
    }

    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(url) = &self.database_url {
            settings.database.url = url.clone();
        }
        if let Some(level) = &self.log_level {
            settings.logger.level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_cli_parses_overrides() {
        let cli = Cli::parse_from([
            "realty-rs",
            "--port",
            "8080",
            "--database-url",
            "postgres://localhost/realty",
            "--dry-run",
        ]);
        assert_eq!(cli.port, Some(8080));
        assert_eq!(
            cli.database_url.as_deref(),
            Some("postgres://localhost/realty")
        );
        assert!(cli.dry_run);
    }

    #[test]
    fn test_cli_defaults_to_no_overrides() {
        let cli = Cli::parse_from(["realty-rs"]);
        assert_eq!(cli.port, None);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_overrides_applied_in_order() {
        let cli = Cli::parse_from(["realty-rs", "--port", "9000", "--log-level", "debug"]);
        let mut settings = Settings::default();
        cli.apply_overrides(&mut settings);
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.logger.level, "debug");
    }
}
