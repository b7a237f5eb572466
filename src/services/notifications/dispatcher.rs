//! Wraps envelopes in the FCM v1 message contract and maps transport
//! outcomes onto `DispatchResult` or `AppError::Delivery`.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::{Value, json};

use super::provider::PushTransport;
use crate::error::{AppError, AppResult};
use crate::models::{AndroidConfig, ApnsConfig, DispatchResult, NotificationEnvelope};

/// `message` object of an FCM v1 `messages:send` request
#[derive(Debug, Serialize)]
struct FcmMessage<'a> {
    topic: &'a str,
    notification: FcmNotification<'a>,
    data: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    android: Option<&'a AndroidConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    apns: Option<&'a ApnsConfig>,
}

#[derive(Debug, Serialize)]
struct FcmNotification<'a> {
    title: &'a str,
    body: &'a str,
}

impl<'a> From<&'a NotificationEnvelope> for FcmMessage<'a> {
    fn from(envelope: &'a NotificationEnvelope) -> Self {
        Self {
            topic: &envelope.topic,
            notification: FcmNotification {
                title: &envelope.title,
                body: &envelope.body,
            },
            data: &envelope.data,
            android: envelope.android.as_ref(),
            apns: envelope.apns.as_ref(),
        }
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn PushTransport>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn PushTransport>) -> Self {
        Self { transport }
    }

    /// Request body for an envelope: `{"message": {...}}`
    pub fn wrap(envelope: &NotificationEnvelope) -> Value {
        json!({ "message": FcmMessage::from(envelope) })
    }

    /// Send one envelope. No retries.
    pub async fn send(
        &self,
        envelope: &NotificationEnvelope,
        token: &str,
        project_id: &str,
    ) -> AppResult<DispatchResult> {
        let payload = Self::wrap(envelope);
        let start = Instant::now();

        let response = self
            .transport
            .send(project_id, token, &payload)
            .await
            .map_err(|e| {
                tracing::error!(
                    transport = self.transport.name(),
                    error = %format!("{:#}", e),
                    "Push transport failed"
                );
                AppError::Delivery {
                    detail: Value::String(format!("{:#}", e)),
                }
            })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let body = parse_body(&response.body);

        if !response.is_success() {
            tracing::error!(
                transport = self.transport.name(),
                status = response.status,
                duration_ms,
                detail = %body,
                "Push provider rejected message"
            );
            return Err(AppError::Delivery { detail: body });
        }

        tracing::info!(
            transport = self.transport.name(),
            topic = %envelope.topic,
            status = response.status,
            duration_ms,
            "Notification dispatched"
        );
        Ok(DispatchResult::delivered(body))
    }
}

/// Parsed JSON body, or the raw text as a JSON string
fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::provider::TransportResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Transport that records payloads and replies with a canned response
    struct StubTransport {
        reply: Result<TransportResponse, String>,
        sent: Mutex<Vec<(String, String, Value)>>,
    }

    impl StubTransport {
        fn replying(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(TransportResponse {
                    status,
                    body: body.to_string(),
                }),
                sent: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                sent: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl PushTransport for StubTransport {
        async fn send(
            &self,
            project_id: &str,
            token: &str,
            payload: &Value,
        ) -> anyhow::Result<TransportResponse> {
            self.sent.lock().unwrap().push((
                project_id.to_string(),
                token.to_string(),
                payload.clone(),
            ));
            self.reply.clone().map_err(|m| anyhow::anyhow!(m))
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    fn envelope(with_styling: bool) -> NotificationEnvelope {
        let mut data = BTreeMap::new();
        data.insert("type".to_string(), "new_post".to_string());
        NotificationEnvelope {
            topic: "trending-phonks".to_string(),
            title: "DriftKing posted 🎵".to_string(),
            body: "new mix".to_string(),
            data,
            android: with_styling.then(|| AndroidConfig {
                notification: crate::models::AndroidNotification {
                    icon: "background".to_string(),
                    color: "#FF6B35".to_string(),
                    sound: "default".to_string(),
                },
            }),
            apns: None,
        }
    }

    #[test]
    fn test_wrap_matches_fcm_contract() {
        let payload = Dispatcher::wrap(&envelope(true));
        assert_eq!(payload["message"]["topic"], "trending-phonks");
        assert_eq!(payload["message"]["notification"]["title"], "DriftKing posted 🎵");
        assert_eq!(payload["message"]["notification"]["body"], "new mix");
        assert_eq!(payload["message"]["data"]["type"], "new_post");
        assert_eq!(payload["message"]["android"]["notification"]["color"], "#FF6B35");
        assert!(payload["message"].get("apns").is_none());
    }

    #[tokio::test]
    async fn test_success_returns_provider_response() {
        let transport = StubTransport::replying(
            200,
            r#"{"name":"projects/phonkers-app/messages/0:1500415314455276%31bd1c9631bd1c96"}"#,
        );
        let dispatcher = Dispatcher::new(transport.clone());

        let result = dispatcher
            .send(&envelope(false), "ya29.token", "phonkers-app")
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.error_message.is_none());
        assert_eq!(
            result.provider_response.unwrap()["name"],
            "projects/phonkers-app/messages/0:1500415314455276%31bd1c9631bd1c96"
        );

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "phonkers-app");
        assert_eq!(sent[0].1, "ya29.token");
        assert_eq!(sent[0].2["message"]["topic"], "trending-phonks");
    }

    #[tokio::test]
    async fn test_rejection_carries_provider_detail() {
        let transport = StubTransport::replying(400, r#"{"error":"INVALID_ARGUMENT"}"#);
        let dispatcher = Dispatcher::new(transport.clone());

        match dispatcher.send(&envelope(false), "t", "p").await {
            Err(AppError::Delivery { detail }) => {
                assert_eq!(detail, json!({"error": "INVALID_ARGUMENT"}))
            }
            other => panic!("Expected Delivery error, got {:?}", other),
        }
        // no retry
        assert_eq!(transport.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_non_json_rejection_is_wrapped_as_string() {
        let dispatcher = Dispatcher::new(StubTransport::replying(502, "Bad Gateway"));
        match dispatcher.send(&envelope(false), "t", "p").await {
            Err(AppError::Delivery { detail }) => assert_eq!(detail, json!("Bad Gateway")),
            other => panic!("Expected Delivery error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_delivery_error() {
        let dispatcher = Dispatcher::new(StubTransport::failing("connection refused"));
        match dispatcher.send(&envelope(false), "t", "p").await {
            Err(AppError::Delivery { detail }) => {
                assert!(detail.as_str().unwrap().contains("connection refused"))
            }
            other => panic!("Expected Delivery error, got {:?}", other),
        }
    }
}
