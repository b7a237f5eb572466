//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between external
//! collaborators and handlers.

pub mod notifications;
pub mod trending;

pub use notifications::{NotificationService, TrendingOutcome};
pub use trending::CandidateAggregator;

use crate::config::Settings;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since collaborators are held behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub notifications: NotificationService,
}

impl Services {
    /// Creates services backed by the real Google, YouTube and FCM clients.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            notifications: NotificationService::from_settings(settings),
        }
    }

    pub fn new(notifications: NotificationService) -> Self {
        Self { notifications }
    }
}
