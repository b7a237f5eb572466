//! Push transport abstraction.
//!
//! A transport performs the single authenticated HTTP call that submits a
//! message. It reports whatever the provider answered; deciding what counts
//! as a failure is left to the `Dispatcher`.

use async_trait::async_trait;
use serde_json::Value;

/// Raw provider answer to a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for push delivery transports
///
/// All transports must be Send + Sync for use behind `Arc<dyn PushTransport>`.
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Submit `payload` for `project_id`, authenticated with `token`
    ///
    /// Errors are reserved for failures to obtain any response at all
    /// (DNS, connect, TLS, timeouts).
    async fn send(
        &self,
        project_id: &str,
        token: &str,
        payload: &Value,
    ) -> anyhow::Result<TransportResponse>;

    /// Returns the transport name for logging
    fn name(&self) -> &'static str;
}
