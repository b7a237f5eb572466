//! Provider-ready notification payloads and dispatch outcomes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Fully composed notification, built fresh for every send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationEnvelope {
    pub topic: String,
    pub title: String,
    pub body: String,
    pub data: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apns: Option<ApnsConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidConfig {
    pub notification: AndroidNotification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidNotification {
    /// Drawable resource name in the app bundle
    pub icon: String,
    /// Accent colour in `#RRGGBB`
    pub color: String,
    pub sound: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApnsConfig {
    pub payload: ApnsPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApnsPayload {
    pub aps: Aps,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aps {
    pub sound: String,
    pub badge: u32,
}

/// Outcome of a single push attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DispatchResult {
    pub success: bool,
    /// Parsed response body from the push provider
    #[schema(value_type = Option<Object>)]
    pub provider_response: Option<Value>,
    pub error_message: Option<String>,
}

impl DispatchResult {
    pub fn delivered(provider_response: Value) -> Self {
        Self {
            success: true,
            provider_response: Some(provider_response),
            error_message: None,
        }
    }
}
