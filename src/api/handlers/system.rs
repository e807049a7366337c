//! System endpoints: health check and form choice lists.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::catalog::{GENRES, STATES};

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health`: Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /config/genres`: Genres accepted by the venue and artist forms.
#[utoipa::path(
    get,
    path = "/config/genres",
    tag = "System",
    summary = "List genres",
    responses(
        (status = 200, description = "Genre choices", body = Vec<String>),
    )
)]
pub async fn genres_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(GENRES))
}

/// `GET /config/states`: State codes accepted by the venue and artist forms.
#[utoipa::path(
    get,
    path = "/config/states",
    tag = "System",
    summary = "List states",
    responses(
        (status = 200, description = "State code choices", body = Vec<String>),
    )
)]
pub async fn states_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(STATES))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/genres", get(genres_handler))
        .route("/config/states", get(states_handler))
}
