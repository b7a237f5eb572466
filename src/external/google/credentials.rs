use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Token endpoint used when the credential omits `token_uri`
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const CONFIG_KEY: &str = "firebase.service_account_key";

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The subset of a service-account JSON document needed for the
/// JWT-bearer grant. Unknown fields are ignored.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .finish()
    }
}

impl ServiceAccountKey {
    /// Parse a credential blob
    ///
    /// Absent, blank or malformed input is a configuration error keyed on
    /// `firebase.service_account_key`.
    pub fn parse(blob: Option<&str>) -> AppResult<Self> {
        let blob = blob
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| AppError::missing_config(CONFIG_KEY, "Service account credential"))?;

        let key: ServiceAccountKey =
            serde_json::from_str(blob).map_err(|e| AppError::Configuration {
                key: CONFIG_KEY.to_string(),
                source: anyhow::anyhow!(
                    "Service account credential is not valid JSON (line {}, column {})",
                    e.line(),
                    e.column()
                ),
            })?;

        if key.client_email.trim().is_empty() || key.private_key.trim().is_empty() {
            return Err(AppError::Configuration {
                key: CONFIG_KEY.to_string(),
                source: anyhow::anyhow!(
                    "Service account credential requires client_email and private_key"
                ),
            });
        }

        Ok(key)
    }
}
