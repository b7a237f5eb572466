//! Configuration management module for phonk-relay
//!
//! This module provides layered configuration loading with support for:
//! - TOML configuration files
//! - Environment variable overrides
//! - Multiple environment configurations (development, test, production)
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local development overrides (not committed to version control)
//! 4. `PHONK_*` environment variables
//!
//! Credentials (`firebase.service_account_key`, `youtube.api_key`) are
//! expected to arrive through environment variables only.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    ApplicationConfig, FirebaseConfig, LoggerSettings, ServerConfig, Settings, TrendingConfig,
    TrendingScheduleConfig, YoutubeConfig,
};
