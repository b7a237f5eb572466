//! Configuration validation logic
//!
//! Validation runs after every load and after CLI overrides are merged.
//! Secrets are deliberately absent from these rules: a relay without
//! credentials still starts and reports the gap per request.

use crate::config::error::ConfigError;
use crate::config::settings::{
    FirebaseConfig, LoggerSettings, ServerConfig, Settings, TrendingConfig, YoutubeConfig,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host must not be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl FirebaseConfig {
    /// Validate push delivery settings that have no sensible runtime fallback
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.topic.trim().is_empty() {
            return Err(ConfigError::validation(
                "firebase.topic",
                "Notification topic must not be empty.",
            ));
        }

        validate_base_url("firebase.api_base_url", &self.api_base_url)
    }
}

impl YoutubeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base_url("youtube.api_base_url", &self.api_base_url)
    }
}

impl TrendingConfig {
    /// Validate trending aggregation settings
    ///
    /// # Validation Rules
    /// - At least one non-blank query
    /// - Per-query and total limits greater than 0
    /// - Per-query limit within the search API's page size (50)
    /// - Non-empty cron expression when scheduling is enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queries.iter().all(|q| q.trim().is_empty()) {
            return Err(ConfigError::validation(
                "trending.queries",
                "At least one search query is required.",
            ));
        }

        if self.per_query_limit == 0 || self.per_query_limit > 50 {
            return Err(ConfigError::ValidationError {
                field: "trending.per_query_limit".to_string(),
                message: format!(
                    "Per-query limit must be between 1 and 50, got {}.",
                    self.per_query_limit
                ),
            });
        }

        if self.limit == 0 {
            return Err(ConfigError::validation(
                "trending.limit",
                "Trending limit must be greater than 0.",
            ));
        }

        if self.schedule.enabled {
            let fields = self.schedule.cron.split_whitespace().count();
            if !(5..=7).contains(&fields) {
                return Err(ConfigError::ValidationError {
                    field: "trending.schedule.cron".to_string(),
                    message: format!(
                        "Invalid cron expression '{}'. Expected 5 to 7 space-separated fields.",
                        self.schedule.cron
                    ),
                });
            }
        }

        Ok(())
    }
}

fn validate_base_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        return Ok(());
    }

    Err(ConfigError::ValidationError {
        field: field.to_string(),
        message: format!("Expected an http(s) base URL, got '{}'.", url),
    })
}

impl Settings {
    /// Validate all configuration sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.logger.validate()?;
        self.firebase.validate()?;
        self.youtube.validate()?;
        self.trending.validate()?;
        Ok(())
    }
}
