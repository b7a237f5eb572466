use utoipa::OpenApi;

pub const HEALTH_TAG: &str = "Health";
pub const NOTIFICATION_TAG: &str = "Notifications";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Phonk Relay",
        description = "Push notification relay for new posts and trending phonks",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::models::DispatchResult,
        )
    ),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = NOTIFICATION_TAG, description = "Topic notification endpoints"),
    )
)]
pub struct ApiDoc;
