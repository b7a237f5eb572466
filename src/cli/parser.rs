//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Push notification relay for new posts and trending phonks
#[derive(Parser, Debug)]
#[command(name = "phonk-relay")]
#[command(about = "Push notification relay for new posts and trending phonks")]
#[command(long_about = "
phonk-relay forwards new-post notifications to a Firebase Cloud Messaging
topic and periodically pushes a trending phonk discovered through YouTube
search.

EXAMPLES:
    # Start the server with default configuration
    phonk-relay serve

    # Start server on custom host and port
    phonk-relay serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    phonk-relay --config /path/to/config.toml serve

    # Check configuration without starting server
    phonk-relay serve --dry-run

    # Run one trending pass from an external scheduler
    phonk-relay --env production trending --limit 5

Secrets are read from PHONK_FIREBASE__PROJECT_ID,
PHONK_FIREBASE__SERVICE_ACCOUNT_KEY and PHONK_YOUTUBE__API_KEY.
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this TOML file instead of the layered files under `config/`.
    /// Environment variable overrides still apply.
    ///
    /// Example: --config /etc/phonk-relay/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Takes precedence over PHONK_APP_ENV.
    ///
    /// Available values: development (dev), production (prod), test
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Serves the notification endpoints and, when `trending.schedule.enabled`
    /// is set, runs the trending job on its cron schedule.
    ///
    /// Examples:
    ///   phonk-relay serve                           # Start with defaults
    ///   phonk-relay serve --host 0.0.0.0 --port 80  # Bind to all interfaces on port 80
    ///   phonk-relay serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// Default: 127.0.0.1
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Default: 3000
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Overrides both configuration file settings and global --verbose/--quiet flags.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Run one trending notification pass and print the result as JSON
    ///
    /// Examples:
    ///   phonk-relay trending            # Use trending.limit from configuration
    ///   phonk-relay trending --limit 3  # Draw from at most 3 candidates
    Trending {
        /// Number of candidates to draw from
        #[arg(short, long, value_name = "N", value_parser = super::validation::validate_trending_limit)]
        limit: Option<usize>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "production", alias = "prod")]
    Production,
    #[value(name = "test")]
    Test,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Validate argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if let Some(Commands::Serve {
            host: Some(host),
            port: Some(port),
            ..
        }) = &self.command
            && host == "0.0.0.0"
            && *port < 1024
        {
            return Err("Binding to 0.0.0.0 on a privileged port (< 1024) requires root privileges".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Production => crate::config::Environment::Production,
            Environment::Test => crate::config::Environment::Test,
        }
    }
}
