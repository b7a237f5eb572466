//! Notification-related DTOs for API responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::DispatchResult;
use crate::services::TrendingOutcome;

/// Response for a delivered notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "success": true,
    "result": {"name": "projects/phonkers-app/messages/0:1700000000000000%31bd1c9631bd1c96"}
}))]
pub struct SendNotificationResponse {
    pub success: bool,
    /// Body returned by FCM for the accepted message
    #[schema(value_type = Object)]
    pub result: Value,
}

impl From<DispatchResult> for SendNotificationResponse {
    fn from(result: DispatchResult) -> Self {
        Self {
            success: true,
            result: result.provider_response.unwrap_or(Value::Null),
        }
    }
}

/// Response for a trending pass that found nothing to send
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"message": "No trending phonks found"}))]
pub struct TrendingMessageResponse {
    pub message: String,
}

/// Body of the trending endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum NotificationResponse {
    Sent(SendNotificationResponse),
    Message(TrendingMessageResponse),
}

impl From<TrendingOutcome> for NotificationResponse {
    fn from(outcome: TrendingOutcome) -> Self {
        match outcome {
            TrendingOutcome::NothingToNotify => {
                NotificationResponse::Message(TrendingMessageResponse {
                    message: "No trending phonks found".to_string(),
                })
            }
            TrendingOutcome::Sent(result) => NotificationResponse::Sent(result.into()),
        }
    }
}
