use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::credentials::ServiceAccountKey;
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;

/// OAuth2 scope for sending messages through the FCM HTTP v1 API
pub const FIREBASE_MESSAGING_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime in seconds; Google rejects anything above one hour
const ASSERTION_TTL_SECS: i64 = 3600;

/// Exchanges stored credentials for a short-lived bearer token
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self, scope: &str) -> AppResult<String>;
}

#[derive(Debug, Serialize, Deserialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// JWT-bearer grant against the credential's `token_uri`
///
/// The credential is parsed on every call and tokens are not cached, so a
/// rotated secret takes effect on the next request.
#[derive(Clone)]
pub struct ServiceAccountTokenProvider {
    credential: Option<String>,
}

impl ServiceAccountTokenProvider {
    pub fn new(credential: Option<String>) -> Self {
        Self { credential }
    }

    fn make_error(message: impl Into<String>, source: Option<anyhow::Error>) -> AppError {
        AppError::ExternalApi {
            provider: "OAuth2".into(),
            message: message.into(),
            source,
        }
    }

    /// Sign the RS256 assertion presented to the token endpoint
    fn build_assertion(key: &ServiceAccountKey, scope: &str, issued_at: i64) -> AppResult<String> {
        let claims = AssertionClaims {
            iss: key.client_email.clone(),
            scope: scope.to_string(),
            aud: key.token_uri.clone(),
            iat: issued_at,
            exp: issued_at + ASSERTION_TTL_SECS,
        };

        let encoding_key =
            EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
                AppError::Configuration {
                    key: "firebase.service_account_key".to_string(),
                    source: anyhow::anyhow!("private_key is not a valid RSA PEM: {:?}", e.kind()),
                }
            })?;

        encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| AppError::Internal { source: e.into() })
    }

    fn token_from_response(status: StatusCode, body: &str) -> AppResult<String> {
        if !status.is_success() {
            return Err(Self::make_error(
                format!("token exchange failed with status {}: {}", status, body),
                None,
            ));
        }

        let token: TokenResponse = serde_json::from_str(body).map_err(|e| {
            Self::make_error("token endpoint returned an unexpected body", Some(e.into()))
        })?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl TokenProvider for ServiceAccountTokenProvider {
    async fn access_token(&self, scope: &str) -> AppResult<String> {
        let key = ServiceAccountKey::parse(self.credential.as_deref())?;
        let assertion = Self::build_assertion(&key, scope, jiff::Timestamp::now().as_second())?;

        let response = HTTP_CLIENT
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| {
                Self::make_error(format!("token request failed: {}", e), Some(e.into()))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            Self::make_error(format!("token response unreadable: {}", e), Some(e.into()))
        })?;

        tracing::debug!(status = %status, token_uri = %key.token_uri, "Token exchange completed");
        Self::token_from_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation, decode};

    const TEST_PRIVATE_KEY: &str = include_str!("testdata/test_service_account.pem");
    const TEST_PUBLIC_KEY: &str = include_str!("testdata/test_service_account.pub.pem");

    fn test_key() -> ServiceAccountKey {
        ServiceAccountKey {
            client_email: "relay@phonkers.iam.gserviceaccount.com".to_string(),
            private_key: TEST_PRIVATE_KEY.to_string(),
            token_uri: super::super::DEFAULT_TOKEN_URI.to_string(),
            project_id: None,
        }
    }

    #[test]
    fn test_assertion_claims_and_signature() {
        let now = jiff::Timestamp::now().as_second();
        let assertion =
            ServiceAccountTokenProvider::build_assertion(&test_key(), FIREBASE_MESSAGING_SCOPE, now)
                .expect("assertion should sign");

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&["https://oauth2.googleapis.com/token"]);
        let decoded = decode::<AssertionClaims>(
            &assertion,
            &DecodingKey::from_rsa_pem(TEST_PUBLIC_KEY.as_bytes()).unwrap(),
            &validation,
        )
        .expect("assertion should verify");

        assert_eq!(decoded.header.alg, Algorithm::RS256);
        assert_eq!(decoded.claims.iss, "relay@phonkers.iam.gserviceaccount.com");
        assert_eq!(decoded.claims.scope, FIREBASE_MESSAGING_SCOPE);
        assert_eq!(decoded.claims.iat, now);
        assert_eq!(decoded.claims.exp, now + 3600);
    }

    #[test]
    fn test_invalid_private_key_is_configuration_error() {
        let mut key = test_key();
        key.private_key = "not a pem".to_string();
        let result = ServiceAccountTokenProvider::build_assertion(&key, FIREBASE_MESSAGING_SCOPE, 0);
        match result {
            Err(AppError::Configuration { key, source }) => {
                assert_eq!(key, "firebase.service_account_key");
                assert!(!source.to_string().contains("not a pem"));
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_token_from_success_response() {
        let token = ServiceAccountTokenProvider::token_from_response(
            StatusCode::OK,
            r#"{"access_token":"ya29.token","expires_in":3599,"token_type":"Bearer"}"#,
        )
        .unwrap();
        assert_eq!(token, "ya29.token");
    }

    #[test]
    fn test_token_from_error_response() {
        let result = ServiceAccountTokenProvider::token_from_response(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant"}"#,
        );
        match result {
            Err(AppError::ExternalApi { provider, message, .. }) => {
                assert_eq!(provider, "OAuth2");
                assert!(message.contains("invalid_grant"));
            }
            other => panic!("Expected ExternalApi error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_access_token_without_credential() {
        let provider = ServiceAccountTokenProvider::new(None);
        let result = provider.access_token(FIREBASE_MESSAGING_SCOPE).await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_access_token_with_unparseable_credential() {
        let provider = ServiceAccountTokenProvider::new(Some("{oops".to_string()));
        let result = provider.access_token(FIREBASE_MESSAGING_SCOPE).await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }
}
