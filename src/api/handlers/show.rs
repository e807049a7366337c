//! Show handlers: listing and creation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::ShowRequest;
use crate::app_state::AppState;
use crate::domain::{Show, ShowDraft, ShowListing};
use crate::error::{ErrorResponse, FyyurError};

/// `GET /shows`: Every show joined with its venue and artist, newest first.
///
/// # Errors
///
/// Returns [`FyyurError::LookupFailure`] when a show names a missing record.
#[utoipa::path(
    get,
    path = "/api/v1/shows",
    tag = "Shows",
    summary = "List shows",
    description = "Shows ordered by start time, latest first. Ties keep store order.",
    responses(
        (status = 200, description = "All shows", body = Vec<ShowListing>),
        (status = 500, description = "Dangling show reference", body = ErrorResponse),
    )
)]
pub async fn list_shows(State(state): State<AppState>) -> Result<impl IntoResponse, FyyurError> {
    let shows = state.listing_service.shows().await?;
    Ok(Json(shows))
}

/// `POST /shows`: List a new show.
///
/// # Errors
///
/// Returns [`FyyurError::ValidationFailure`] for malformed input or when the
/// artist or venue does not exist.
#[utoipa::path(
    post,
    path = "/api/v1/shows",
    tag = "Shows",
    summary = "Create a show",
    request_body = ShowRequest,
    responses(
        (status = 201, description = "Show created", body = Show),
        (status = 400, description = "Invalid form or unknown reference", body = ErrorResponse),
    )
)]
pub async fn create_show(
    State(state): State<AppState>,
    Json(req): Json<ShowRequest>,
) -> Result<impl IntoResponse, FyyurError> {
    let draft = ShowDraft::try_from(req)?;
    let show = state.listing_service.create_show(draft).await?;
    Ok((StatusCode::CREATED, Json(show)))
}

/// Show routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows).post(create_show))
}
