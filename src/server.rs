//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use crate::api::routes::create_router;
use crate::config::{Environment, Settings};
use crate::jobs::{JobRegistry, JobScheduler, ScheduledJob};
use crate::state::AppState;
use tokio::net::TcpListener;
use tokio::signal;

/// HTTP server manager
pub struct Server {
    settings: Settings,
    environment: Environment,
}

impl Server {
    /// Create a new server with the given settings
    pub fn new(settings: Settings, environment: Environment) -> Self {
        Self {
            settings,
            environment,
        }
    }

    /// Start the server and run until shutdown signal
    ///
    /// Starts the trending scheduler first when `trending.schedule.enabled`
    /// is set, and stops it after the HTTP server has drained.
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %self.environment.as_str(),
            "Application starting"
        );

        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            "Server configuration loaded"
        );

        log_configured_secrets(&self.settings);

        let state = AppState::new(self.settings.clone());

        let scheduler = self.start_scheduler(&state).await?;

        let router = create_router(state);

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        if let Some(scheduler) = scheduler {
            if let Err(e) = scheduler.stop().await {
                tracing::warn!(error = %e, "Failed to stop job scheduler");
            }
        }

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    async fn start_scheduler(&self, state: &AppState) -> anyhow::Result<Option<JobScheduler>> {
        let jobs = ScheduledJob::from_settings(&self.settings);
        if jobs.is_empty() {
            tracing::info!("Trending schedule disabled");
            return Ok(None);
        }

        let scheduler = JobScheduler::new(state.services.clone(), JobRegistry::with_defaults())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create job scheduler: {}", e))?;
        scheduler
            .start(jobs)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start job scheduler: {}", e))?;

        tracing::info!(cron = %self.settings.trending.schedule.cron, "Job scheduler started");
        Ok(Some(scheduler))
    }
}

/// Logs which secrets are present, never their values.
pub fn log_configured_secrets(settings: &Settings) {
    tracing::info!(
        project_id_configured = settings.firebase.project_id().is_some(),
        service_account_configured = settings.firebase.has_credentials(),
        youtube_api_key_configured = settings.youtube.api_key().is_some(),
        topic = %settings.firebase.topic,
        "Notification configuration loaded"
    );
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
