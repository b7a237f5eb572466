//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `notification` - Notification endpoint responses
//! - `health` - Health probe responses
//! - `error` - Common error response DTO

mod error;
mod health;
mod notification;

pub use error::ErrorResponse;
pub use health::{HealthResponse, HealthStatus, ReadinessChecks};
pub use notification::{NotificationResponse, SendNotificationResponse, TrendingMessageResponse};
