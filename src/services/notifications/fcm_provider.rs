//! Firebase Cloud Messaging HTTP v1 transport.
//!
//! Posts to `{base}/v1/projects/{project_id}/messages:send` using the global
//! HTTP_CLIENT.

use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;

use super::provider::{PushTransport, TransportResponse};
use crate::external::client::HTTP_CLIENT;

pub struct FcmTransport {
    base_url: String,
}

impl FcmTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn send_url(&self, project_id: &str) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.base_url.trim_end_matches('/'),
            project_id
        )
    }
}

#[async_trait]
impl PushTransport for FcmTransport {
    async fn send(
        &self,
        project_id: &str,
        token: &str,
        payload: &Value,
    ) -> anyhow::Result<TransportResponse> {
        let response = HTTP_CLIENT
            .post(self.send_url(project_id))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await
            .context("FCM request failed")?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("FCM response body unreadable")?;

        Ok(TransportResponse { status, body })
    }

    fn name(&self) -> &'static str {
        "fcm"
    }
}
