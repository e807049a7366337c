//! Venue handlers: grouped listing, search, detail, and CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{SearchRequest, VenueDetailResponse, VenueRequest, VenueSearchResponse};
use crate::app_state::AppState;
use crate::domain::{LocationGroup, Venue, VenueDraft, VenueId};
use crate::error::{ErrorResponse, FyyurError};

/// `GET /venues`: Venues grouped by city and state.
///
/// # Errors
///
/// Returns [`FyyurError`] when the store cannot be read.
#[utoipa::path(
    get,
    path = "/api/v1/venues",
    tag = "Venues",
    summary = "List venues by location",
    description = "Groups venues by exact (city, state) with upcoming show counts.",
    responses(
        (status = 200, description = "Location groups", body = Vec<LocationGroup>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_venues(State(state): State<AppState>) -> Result<impl IntoResponse, FyyurError> {
    let groups = state.listing_service.venues_by_location().await?;
    Ok(Json(groups))
}

/// `POST /venues/search`: Case-insensitive name search.
///
/// # Errors
///
/// Returns [`FyyurError`] when the store cannot be read.
#[utoipa::path(
    post,
    path = "/api/v1/venues/search",
    tag = "Venues",
    summary = "Search venues",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching venues", body = VenueSearchResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn search_venues(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<impl IntoResponse, FyyurError> {
    let data = state
        .listing_service
        .search_venues(&req.search_term)
        .await?;
    Ok(Json(VenueSearchResponse::new(req.search_term, data)))
}

/// `GET /venues/{id}`: Venue with its past and upcoming shows.
///
/// # Errors
///
/// Returns [`FyyurError::NotFound`] for unknown ids and
/// [`FyyurError::LookupFailure`] when a show names a missing artist.
#[utoipa::path(
    get,
    path = "/api/v1/venues/{id}",
    tag = "Venues",
    summary = "Venue detail",
    params(("id" = i64, Path, description = "Venue identifier")),
    responses(
        (status = 200, description = "Venue with classified shows", body = VenueDetailResponse),
        (status = 404, description = "Venue not found", body = ErrorResponse),
        (status = 500, description = "Dangling show reference", body = ErrorResponse),
    )
)]
pub async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, FyyurError> {
    let detail = state.listing_service.venue_detail(VenueId::new(id)).await?;
    Ok(Json(VenueDetailResponse::from(detail)))
}

/// `GET /venues/{id}/edit`: Current values for the edit form.
///
/// # Errors
///
/// Returns [`FyyurError::NotFound`] for unknown ids.
#[utoipa::path(
    get,
    path = "/api/v1/venues/{id}/edit",
    tag = "Venues",
    summary = "Venue edit form values",
    params(("id" = i64, Path, description = "Venue identifier")),
    responses(
        (status = 200, description = "Stored venue", body = Venue),
        (status = 404, description = "Venue not found", body = ErrorResponse),
    )
)]
pub async fn edit_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, FyyurError> {
    let venue = state.listing_service.venue(VenueId::new(id)).await?;
    Ok(Json(venue))
}

/// `POST /venues`: Create a venue.
///
/// # Errors
///
/// Returns [`FyyurError::ValidationFailure`] for invalid form data.
#[utoipa::path(
    post,
    path = "/api/v1/venues",
    tag = "Venues",
    summary = "Create a venue",
    request_body = VenueRequest,
    responses(
        (status = 201, description = "Venue created", body = Venue),
        (status = 400, description = "Invalid form data", body = ErrorResponse),
    )
)]
pub async fn create_venue(
    State(state): State<AppState>,
    Json(req): Json<VenueRequest>,
) -> Result<impl IntoResponse, FyyurError> {
    let draft = VenueDraft::try_from(req)?;
    let venue = state.listing_service.create_venue(draft).await?;
    Ok((StatusCode::CREATED, Json(venue)))
}

/// `PUT /venues/{id}`: Replace a venue's editable fields.
///
/// # Errors
///
/// Returns [`FyyurError::ValidationFailure`] for invalid form data and
/// [`FyyurError::NotFound`] for unknown ids.
#[utoipa::path(
    put,
    path = "/api/v1/venues/{id}",
    tag = "Venues",
    summary = "Edit a venue",
    params(("id" = i64, Path, description = "Venue identifier")),
    request_body = VenueRequest,
    responses(
        (status = 200, description = "Venue updated", body = Venue),
        (status = 400, description = "Invalid form data", body = ErrorResponse),
        (status = 404, description = "Venue not found", body = ErrorResponse),
    )
)]
pub async fn update_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<VenueRequest>,
) -> Result<impl IntoResponse, FyyurError> {
    let draft = VenueDraft::try_from(req)?;
    let venue = state
        .listing_service
        .update_venue(VenueId::new(id), draft)
        .await?;
    Ok(Json(venue))
}

/// `DELETE /venues/{id}`: Delete a venue and its shows.
///
/// # Errors
///
/// Returns [`FyyurError::NotFound`] for unknown ids.
#[utoipa::path(
    delete,
    path = "/api/v1/venues/{id}",
    tag = "Venues",
    summary = "Delete a venue",
    params(("id" = i64, Path, description = "Venue identifier")),
    responses(
        (status = 204, description = "Venue deleted"),
        (status = 404, description = "Venue not found", body = ErrorResponse),
    )
)]
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, FyyurError> {
    state.listing_service.delete_venue(VenueId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Venue routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues).post(create_venue))
        .route("/venues/search", post(search_venues))
        .route(
            "/venues/{id}",
            get(get_venue).put(update_venue).delete(delete_venue),
        )
        .route("/venues/{id}/edit", get(edit_venue))
}
