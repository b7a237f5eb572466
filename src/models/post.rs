use serde::{Deserialize, Deserializer, de};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

/// Request body of the new-post notification
///
/// Every field is optional on the wire so that a missing `content` is
/// reported as a validation failure instead of a parse error.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostSubmission {
    #[validate(
        required(message = "Missing content"),
        length(min = 1, message = "Missing content")
    )]
    #[schema(example = "Just dropped a new drift phonk mix, go check it out")]
    pub content: Option<String>,

    #[schema(example = "DriftKing")]
    pub author: Option<String>,

    #[serde(default, deserialize_with = "scalar_as_string")]
    #[schema(value_type = Option<String>, example = "post_8f14e45f")]
    pub post_id: Option<String>,

    #[serde(default, deserialize_with = "scalar_as_string")]
    #[schema(value_type = Option<String>, example = "user_42")]
    pub author_id: Option<String>,
}

/// Accepts ids sent as strings, numbers or booleans and keeps their text form.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string or number id, got {other}"
        ))),
    }
}
