//! Notification API handlers.
//!
//! Two entry points: relaying a new post to the topic, and pushing the
//! current trending phonk.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::NOTIFICATION_TAG;
use crate::api::dto::{ErrorResponse, NotificationResponse, SendNotificationResponse};
use crate::error::AppResult;
use crate::models::PostSubmission;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates notification-related routes.
///
/// Routes:
/// - POST /post           - Notify subscribers about a new post
/// - GET|POST /trending   - Push one trending phonk
pub fn notification_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(notify_post))
        .routes(routes!(trending_get, trending_post))
}

/// POST /api/notifications/post - Notify about a new post
///
/// The body is parsed leniently: an empty body counts as `{}` and the
/// content type is not checked.
#[utoipa::path(
    post,
    path = "/post",
    tag = NOTIFICATION_TAG,
    request_body = PostSubmission,
    responses(
        (status = 200, description = "Notification delivered", body = SendNotificationResponse),
        (status = 400, description = "Invalid JSON or missing content", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Configuration, token or delivery failure", body = ErrorResponse)
    )
)]
async fn notify_post(
    State(state): State<AppState>,
    ValidatedJson(post): ValidatedJson<PostSubmission>,
) -> AppResult<Json<SendNotificationResponse>> {
    let result = state.services.notifications.notify_new_post(&post).await?;
    tracing::info!(post_id = ?post.post_id, "Post notification sent");
    Ok(Json(result.into()))
}

/// GET /api/notifications/trending - Push the current trending phonk
#[utoipa::path(
    get,
    path = "/trending",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Notification delivered, or nothing to notify", body = NotificationResponse),
        (status = 500, description = "Configuration, token or delivery failure", body = ErrorResponse)
    )
)]
async fn trending_get(State(state): State<AppState>) -> AppResult<Json<NotificationResponse>> {
    run_trending(&state).await
}

/// POST /api/notifications/trending - Push the current trending phonk
///
/// Any request body is ignored.
#[utoipa::path(
    post,
    path = "/trending",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Notification delivered, or nothing to notify", body = NotificationResponse),
        (status = 500, description = "Configuration, token or delivery failure", body = ErrorResponse)
    )
)]
async fn trending_post(State(state): State<AppState>) -> AppResult<Json<NotificationResponse>> {
    run_trending(&state).await
}

async fn run_trending(state: &AppState) -> AppResult<Json<NotificationResponse>> {
    let outcome = state.services.notifications.notify_trending(None).await?;
    Ok(Json(outcome.into()))
}
