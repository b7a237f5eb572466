//! Configuration merger for CLI arguments and config files
//!
//! This module handles merging CLI argument overrides with file-based configuration,
//! implementing the configuration precedence logic.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Environment, Settings};
use std::path::Path;

/// Configuration merger that handles CLI argument integration with file-based configuration
///
/// CLI arguments override configuration file and environment values.
pub struct ConfigurationMerger {
    base_config: Settings,
    environment: Environment,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings, environment: Environment) -> Self {
        Self {
            base_config,
            environment,
        }
    }

    /// Load the base configuration the way the CLI selects it
    ///
    /// `config_path` replaces the layered files; `environment` overrides
    /// `PHONK_APP_ENV`.
    pub fn load(
        config_path: Option<&Path>,
        environment: Option<Environment>,
    ) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(path) = config_path {
            loader = loader.with_config_file(path);
        }
        if let Some(environment) = environment {
            loader = loader.with_environment(environment);
        }

        let config = loader.load()?;
        Ok(Self::new(config, loader.environment()))
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// The merged settings are validated before being returned.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        Self::apply_global_overrides(&mut config, cli);

        if let Some(ref command) = cli.command {
            Self::apply_command_overrides(&mut config, command);
        }

        config.validate()?;

        Ok(config)
    }

    fn apply_global_overrides(config: &mut Settings, cli: &Cli) {
        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }
    }

    fn apply_command_overrides(config: &mut Settings, command: &Commands) {
        match command {
            Commands::Serve {
                host,
                port,
                log_level,
                dry_run: _,
            } => {
                if let Some(host_addr) = host {
                    config.server.host = host_addr.clone();
                }
                if let Some(port_num) = port {
                    config.server.port = *port_num;
                }
                // Command-specific level wins over --verbose/--quiet
                if let Some(level) = log_level {
                    config.logger.level = (*level).into();
                }
            }
            Commands::Trending { limit } => {
                if let Some(limit) = limit {
                    config.trending.limit = *limit;
                }
            }
        }
    }

    /// Environment the configuration was loaded for
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Get the current configuration (useful for inspection)
    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parser::Cli;
    use crate::config::loader::test_support::{EnvGuard, TEST_MUTEX};
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn merger() -> ConfigurationMerger {
        ConfigurationMerger::new(Settings::default(), Environment::Test)
    }

    #[test]
    fn test_configuration_merger_new() {
        let merger = merger();
        assert_eq!(merger.config(), &Settings::default());
        assert_eq!(merger.environment(), Environment::Test);
    }

    #[test]
    fn test_merge_verbose_flag() {
        let cli = Cli::try_parse_from(["phonk-relay", "--verbose"]).unwrap();
        assert_eq!(merger().merge_cli_args(&cli).unwrap().logger.level, "debug");
    }

    #[test]
    fn test_merge_quiet_flag() {
        let cli = Cli::try_parse_from(["phonk-relay", "--quiet"]).unwrap();
        assert_eq!(merger().merge_cli_args(&cli).unwrap().logger.level, "error");
    }

    #[test]
    fn test_merge_serve_host_and_port() {
        let cli =
            Cli::try_parse_from(["phonk-relay", "serve", "--host", "0.0.0.0", "--port", "8080"])
                .unwrap();
        let merged = merger().merge_cli_args(&cli).unwrap();

        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let cli =
            Cli::try_parse_from(["phonk-relay", "--verbose", "serve", "--log-level", "warn"])
                .unwrap();
        assert_eq!(merger().merge_cli_args(&cli).unwrap().logger.level, "warn");
    }

    #[test]
    fn test_merge_trending_limit() {
        let cli = Cli::try_parse_from(["phonk-relay", "trending", "--limit", "2"]).unwrap();
        assert_eq!(merger().merge_cli_args(&cli).unwrap().trending.limit, 2);
    }

    #[test]
    fn test_merge_validates_result() {
        let mut base = Settings::default();
        base.trending.queries.clear();
        let merger = ConfigurationMerger::new(base, Environment::Test);

        let cli = Cli::try_parse_from(["phonk-relay", "trending"]).unwrap();
        assert!(merger.merge_cli_args(&cli).is_err());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let _lock = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let _env = EnvGuard::new();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("relay.toml");
        fs::write(
            &path,
            r#"
[server]
port = 4100

[firebase]
topic = "night-drive"
"#,
        )
        .unwrap();

        let merger = ConfigurationMerger::load(Some(path.as_path()), Some(Environment::Production)).unwrap();

        assert_eq!(merger.environment(), Environment::Production);
        assert_eq!(merger.config().server.port, 4100);
        assert_eq!(merger.config().firebase.topic, "night-drive");
    }
}
