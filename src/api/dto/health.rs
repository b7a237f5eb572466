//! Health check DTOs for API responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::Settings;

/// Health check response structure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.1.0",
    "timestamp": "2025-01-01T12:00:00.000Z",
    "checks": {
        "project_id": true,
        "service_account_key": true,
        "youtube_api_key": true
    }
}))]
pub struct HealthResponse {
    /// Overall health status
    #[schema(example = "healthy")]
    pub status: HealthStatus,
    /// Application version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Timestamp of the health check (ISO 8601 format)
    #[schema(value_type = String, format = DateTime, example = "2025-01-01T12:00:00.000Z")]
    pub timestamp: String,
    /// Which secrets are configured
    pub checks: ReadinessChecks,
}

/// Health status enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All collaborators configured
    Healthy,
    /// Running, but some requests will fail with configuration errors
    Degraded,
}

/// Presence of each secret the relay needs, never the values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReadinessChecks {
    pub project_id: bool,
    pub service_account_key: bool,
    pub youtube_api_key: bool,
}

impl ReadinessChecks {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            project_id: settings.firebase.project_id().is_some(),
            service_account_key: settings.firebase.has_credentials(),
            youtube_api_key: settings.youtube.api_key().is_some(),
        }
    }

    pub fn all_configured(&self) -> bool {
        self.project_id && self.service_account_key && self.youtube_api_key
    }

    pub fn status(&self) -> HealthStatus {
        if self.all_configured() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        }
    }
}
