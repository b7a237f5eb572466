//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::Settings;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Holds only immutable configuration and `Arc`-backed collaborators, so
/// cloning is cheap and requests never share mutable state.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Settings the services were built from
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Creates state backed by the real Google, YouTube and FCM clients.
    pub fn new(settings: Settings) -> Self {
        let services = Services::from_settings(&settings);
        Self::with_services(settings, services)
    }

    /// Creates state around already constructed services.
    pub fn with_services(settings: Settings, services: Services) -> Self {
        Self {
            services,
            settings: Arc::new(settings),
        }
    }
}
