//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::{Environment, Settings};
use crate::error::{AppError, AppResult};
use crate::jobs::ScheduledJob;
use crate::server::{Server, log_configured_secrets};

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
    environment: Environment,
}

impl ServeCommandHandler {
    /// Create a new serve command handler
    pub fn new(config: Settings, environment: Environment) -> Self {
        Self {
            config,
            environment,
        }
    }

    /// Execute the serve command with optional dry-run support
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config.clone(), self.environment)
            .run()
            .await
            .map_err(AppError::from)
    }

    /// Validate configuration without starting the server
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;
        log_configured_secrets(&self.config);

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Notifications go to topic: {}", self.config.firebase.topic);

        match ScheduledJob::from_settings(&self.config).first() {
            Some(job) => println!("✓ Trending job scheduled: {}", job.cron_expression),
            None => println!("✓ Trending schedule disabled"),
        }

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serve_handler_dry_run() {
        let handler = ServeCommandHandler::new(Settings::default(), Environment::Test);
        assert!(handler.execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run_invalid_config() {
        let mut config = Settings::default();
        config.server.port = 0;
        let handler = ServeCommandHandler::new(config, Environment::Test);

        let result = handler.execute(true).await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[test]
    fn test_serve_handler_keeps_config() {
        let config = Settings::default();
        let handler = ServeCommandHandler::new(config.clone(), Environment::Development);
        assert_eq!(handler.config(), &config);
    }
}
