//! Configuration settings structures for phonk-relay
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "phonk-relay".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_format() -> String {
    "full".to_string()
}

fn default_topic() -> String {
    "trending-phonks".to_string()
}

fn default_fcm_base_url() -> String {
    "https://fcm.googleapis.com".to_string()
}

fn default_youtube_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_queries() -> Vec<String> {
    [
        "phonk trending 2025",
        "drift phonk",
        "LXNGVX",
        "popular phonk music",
        "memphis phonk",
    ]
    .iter()
    .map(|q| q.to_string())
    .collect()
}

fn default_per_query_limit() -> u32 {
    8
}

fn default_trending_limit() -> usize {
    5
}

fn default_trending_cron() -> String {
    // Every six hours, on the hour (seconds-resolution cron)
    "0 0 */6 * * *".to_string()
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
// Firebase Cloud Messaging Configuration
// ============================================================================

/// Push delivery configuration (Firebase Cloud Messaging HTTP v1)
///
/// `project_id` and `service_account_key` are secrets in practice and are
/// normally supplied through `PHONK_FIREBASE__PROJECT_ID` and
/// `PHONK_FIREBASE__SERVICE_ACCOUNT_KEY`. Absent values are reported per
/// request rather than at startup.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirebaseConfig {
    /// Messaging project identifier
    #[serde(default)]
    pub project_id: Option<String>,

    /// Service-account credential as a JSON document
    #[serde(default)]
    pub service_account_key: Option<String>,

    /// Broadcast topic every notification is sent to
    #[serde(default = "default_topic")]
    pub topic: String,

    /// Base URL of the messaging API
    #[serde(default = "default_fcm_base_url")]
    pub api_base_url: String,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            service_account_key: None,
            topic: default_topic(),
            api_base_url: default_fcm_base_url(),
        }
    }
}

impl std::fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseConfig")
            .field("project_id", &self.project_id)
            .field(
                "service_account_key",
                &self.service_account_key.as_ref().map(|_| "<redacted>"),
            )
            .field("topic", &self.topic)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl FirebaseConfig {
    /// Non-empty project id, if configured
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Whether a non-empty credential blob is present
    pub fn has_credentials(&self) -> bool {
        self.service_account_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

// ============================================================================
// YouTube Configuration
// ============================================================================

/// Search provider configuration (YouTube Data API v3)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YoutubeConfig {
    /// API key for the search endpoint
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the Data API
    #[serde(default = "default_youtube_base_url")]
    pub api_base_url: String,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: default_youtube_base_url(),
        }
    }
}

impl std::fmt::Debug for YoutubeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubeConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl YoutubeConfig {
    /// Non-empty API key, if configured
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}

// ============================================================================
// Trending Configuration
// ============================================================================

/// Cron schedule for the trending push job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingScheduleConfig {
    /// Whether the in-process scheduler runs the trending job
    #[serde(default)]
    pub enabled: bool,

    /// Six-field cron expression (seconds first)
    #[serde(default = "default_trending_cron")]
    pub cron: String,
}

impl Default for TrendingScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cron: default_trending_cron(),
        }
    }
}

/// Candidate aggregation settings for the trending notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingConfig {
    /// Search queries, tried in order
    #[serde(default = "default_queries")]
    pub queries: Vec<String>,

    /// Maximum results requested per query
    #[serde(default = "default_per_query_limit")]
    pub per_query_limit: u32,

    /// Maximum candidates kept after dedup and shuffle
    #[serde(default = "default_trending_limit")]
    pub limit: usize,

    /// Scheduler settings
    #[serde(default)]
    pub schedule: TrendingScheduleConfig,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            queries: default_queries(),
            per_query_limit: default_per_query_limit(),
            limit: default_trending_limit(),
            schedule: TrendingScheduleConfig::default(),
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to use colored output (only applied on a terminal)
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            colored: default_true(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to LoggerConfig
    ///
    /// This method transforms the configuration file representation into
    /// the runtime LoggerConfig used by the logger module.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.format".to_string(),
                message: e.to_string(),
            })?;

        LoggerConfig::new(ConsoleConfig::new(self.colored, format), self.level).map_err(|e| {
            ConfigError::ValidationError {
                field: "logger".to_string(),
                message: e.to_string(),
            }
        })
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
///
/// This structure represents the entire configuration that can be loaded
/// from TOML files and environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,

    /// Push delivery configuration
    #[serde(default)]
    pub firebase: FirebaseConfig,

    /// Search provider configuration
    #[serde(default)]
    pub youtube: YoutubeConfig,

    /// Trending aggregation and scheduling
    #[serde(default)]
    pub trending: TrendingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_trending_config() -> impl Strategy<Value = TrendingConfig> {
        (
            prop::collection::vec("[a-z ]{1,20}", 1..6),
            1u32..50,
            1usize..20,
            any::<bool>(),
        )
            .prop_map(|(queries, per_query_limit, limit, enabled)| TrendingConfig {
                queries,
                per_query_limit,
                limit,
                schedule: TrendingScheduleConfig {
                    enabled,
                    cron: default_trending_cron(),
                },
            })
    }

    proptest! {
        #[test]
        fn prop_trending_config_round_trip_serialization(config in arb_trending_config()) {
            let serialized = toml::to_string(&config).expect("serialize");
            let deserialized: TrendingConfig = toml::from_str(&serialized).expect("deserialize");
            prop_assert_eq!(config, deserialized);
        }
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_server_section_only_carries_bind_address() {
        let config: ServerConfig =
            toml::from_str("host = \"0.0.0.0\"\nport = 8080\n").expect("deserialize");
        assert_eq!(config.address(), "0.0.0.0:8080");

        let serialized = toml::to_string(&ServerConfig::default()).expect("serialize");
        let keys: Vec<&str> = serialized
            .lines()
            .filter_map(|line| line.split('=').next())
            .map(str::trim)
            .collect();
        assert_eq!(keys, vec!["host", "port"]);
    }

    #[test]
    fn test_server_config_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_firebase_config_defaults() {
        let config = FirebaseConfig::default();
        assert_eq!(config.topic, "trending-phonks");
        assert_eq!(config.api_base_url, "https://fcm.googleapis.com");
        assert!(config.project_id().is_none());
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_firebase_config_blank_values_are_absent() {
        let config = FirebaseConfig {
            project_id: Some("  ".to_string()),
            service_account_key: Some(String::new()),
            ..FirebaseConfig::default()
        };
        assert!(config.project_id().is_none());
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let firebase = FirebaseConfig {
            project_id: Some("phonkers".to_string()),
            service_account_key: Some(r#"{"private_key":"secret"}"#.to_string()),
            ..FirebaseConfig::default()
        };
        let youtube = YoutubeConfig {
            api_key: Some("AIza-secret".to_string()),
            ..YoutubeConfig::default()
        };

        let rendered = format!("{:?} {:?}", firebase, youtube);
        assert!(rendered.contains("phonkers"));
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_trending_config_defaults() {
        let config = TrendingConfig::default();
        assert_eq!(config.queries.len(), 5);
        assert_eq!(config.queries[0], "phonk trending 2025");
        assert_eq!(config.queries[4], "memphis phonk");
        assert_eq!(config.per_query_limit, 8);
        assert_eq!(config.limit, 5);
        assert!(!config.schedule.enabled);
        assert_eq!(config.schedule.cron, "0 0 */6 * * *");
    }

    #[test]
    fn test_logger_settings_into_logger_config() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            format: "json".to_string(),
            colored: false,
        };
        let config = settings.into_logger_config().expect("valid logger settings");
        assert_eq!(config.level, "debug");
        assert_eq!(config.console.format, LogFormat::Json);
        assert!(!config.console.colored);
    }

    #[test]
    fn test_logger_settings_invalid_format() {
        let settings = LoggerSettings {
            format: "xml".to_string(),
            ..LoggerSettings::default()
        };
        assert!(settings.into_logger_config().is_err());
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let toml_str = r#"
[server]
port = 8080

[firebase]
project_id = "phonkers-app"

[trending]
limit = 3
"#;
        let settings: Settings = toml::from_str(toml_str).expect("partial settings");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.firebase.project_id(), Some("phonkers-app"));
        assert_eq!(settings.firebase.topic, "trending-phonks");
        assert_eq!(settings.trending.limit, 3);
        assert_eq!(settings.trending.per_query_limit, 8);
        assert!(settings.youtube.api_key().is_none());
    }
}
