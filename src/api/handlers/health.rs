//! Health check endpoint handlers.
//!
//! Liveness only proves the process answers. Readiness reports which secrets
//! are configured; the relay still serves requests without them, but they
//! fail with configuration errors.

use axum::{extract::State, http::StatusCode, response::Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{HealthResponse, ReadinessChecks};
use crate::state::AppState;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Overall status with configured-secret checks
/// - `GET /health/ready` - Readiness probe
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

/// Basic health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(build_response(&state))
}

/// Readiness probe endpoint.
///
/// # Responses
/// - `200 OK` - Project ID, service account and YouTube key are configured
/// - `503 Service Unavailable` - At least one of them is missing
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse),
        (status = 503, description = "Service is missing configuration", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let response = build_response(&state);
    let status = if response.checks.all_configured() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}

/// Liveness probe endpoint.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

fn build_response(state: &AppState) -> HealthResponse {
    let checks = ReadinessChecks::from_settings(&state.settings);
    HealthResponse {
        status: checks.status(),
        version: state.settings.application.version.clone(),
        timestamp: format!("{:.3}", jiff::Timestamp::now()),
        checks,
    }
}
