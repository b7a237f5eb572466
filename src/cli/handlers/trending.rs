//! Trending command handler
//!
//! Runs a single trending pass outside the HTTP server, for deployments that
//! trigger it from an external scheduler.

use crate::api::dto::NotificationResponse;
use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::server::log_configured_secrets;
use crate::services::Services;

/// Handler for the trending command
pub struct TrendingCommandHandler {
    services: Services,
    limit: usize,
}

impl TrendingCommandHandler {
    /// Create a handler backed by the real Google, YouTube and FCM clients
    pub fn new(config: &Settings) -> Self {
        log_configured_secrets(config);
        Self::with_services(Services::from_settings(config), config.trending.limit)
    }

    pub fn with_services(services: Services, limit: usize) -> Self {
        Self { services, limit }
    }

    /// Run the pass and print the response body as JSON
    pub async fn execute(&self) -> AppResult<()> {
        let response = self.run().await?;
        let json = serde_json::to_string_pretty(&response).map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?;
        println!("{}", json);
        Ok(())
    }

    /// Run the pass and return the response body
    pub async fn run(&self) -> AppResult<NotificationResponse> {
        let outcome = self
            .services
            .notifications
            .notify_trending(Some(self.limit))
            .await?;
        Ok(outcome.into())
    }
}
