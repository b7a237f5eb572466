use crate::error::{AppError, AppResult};
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor that validates the payload
///
/// Parsing is lenient: the content type is not checked and an empty body is
/// read as `{}`. Malformed JSON is a `BadRequest`, failed validation is
/// `ValidationErrors`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest {
                message: format!("Failed to read request body: {}", e),
            })?;

        let value = parse_lenient::<T>(&bytes)?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

fn parse_lenient<T: DeserializeOwned>(bytes: &[u8]) -> AppResult<T> {
    let body = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"{}".as_slice()
    } else {
        bytes
    };

    serde_json::from_slice(body).map_err(|e| AppError::BadRequest {
        message: format!("Invalid JSON in request body: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(required(message = "Missing name"), length(min = 1, message = "Missing name"))]
        name: Option<String>,
    }

    fn request(body: &'static str, content_type: Option<&str>) -> Request {
        let mut builder = Request::builder().method(Method::POST).uri("/test");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_valid_json() {
        let result =
            ValidatedJson::<TestBody>::from_request(request(r#"{"name":"drift"}"#, Some("application/json")), &())
                .await;

        let ValidatedJson(body) = result.unwrap();
        assert_eq!(body.name.as_deref(), Some("drift"));
    }

    #[tokio::test]
    async fn test_content_type_not_required() {
        let result =
            ValidatedJson::<TestBody>::from_request(request(r#"{"name":"drift"}"#, Some("text/plain")), &()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_empty_body_reads_as_empty_object() {
        let result = ValidatedJson::<TestBody>::from_request(request("", None), &()).await;

        match result {
            Err(AppError::ValidationErrors { errors }) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "name");
                assert_eq!(errors[0].message, "Missing name");
            }
            other => panic!("Expected ValidationErrors, got {:?}", other.map(|v| v.0)),
        }
    }

    #[tokio::test]
    async fn test_empty_string_fails_validation() {
        let result =
            ValidatedJson::<TestBody>::from_request(request(r#"{"name":""}"#, Some("application/json")), &()).await;
        assert!(matches!(result, Err(AppError::ValidationErrors { .. })));
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let result =
            ValidatedJson::<TestBody>::from_request(request("{not json", Some("application/json")), &()).await;

        match result {
            Err(AppError::BadRequest { message }) => {
                assert!(message.starts_with("Invalid JSON in request body"));
            }
            other => panic!("Expected BadRequest, got {:?}", other.map(|v| v.0)),
        }
    }
}
