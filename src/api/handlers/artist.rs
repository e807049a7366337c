//! Artist handlers: listing, search, detail, and CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    ArtistDetailResponse, ArtistListItem, ArtistRequest, ArtistSearchResponse, SearchRequest,
};
use crate::app_state::AppState;
use crate::domain::{Artist, ArtistDraft, ArtistId};
use crate::error::{ErrorResponse, FyyurError};

/// `GET /artists`: Every artist's id and name.
///
/// # Errors
///
/// Returns [`FyyurError`] when the store cannot be read.
#[utoipa::path(
    get,
    path = "/api/v1/artists",
    tag = "Artists",
    summary = "List artists",
    responses(
        (status = 200, description = "All artists", body = Vec<ArtistListItem>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_artists(State(state): State<AppState>) -> Result<impl IntoResponse, FyyurError> {
    let artists = state.listing_service.artists().await?;
    let items: Vec<ArtistListItem> = artists.into_iter().map(ArtistListItem::from).collect();
    Ok(Json(items))
}

/// `POST /artists/search`: Case-insensitive name search.
///
/// # Errors
///
/// Returns [`FyyurError`] when the store cannot be read.
#[utoipa::path(
    post,
    path = "/api/v1/artists/search",
    tag = "Artists",
    summary = "Search artists",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching artists", body = ArtistSearchResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn search_artists(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<impl IntoResponse, FyyurError> {
    let data = state
        .listing_service
        .search_artists(&req.search_term)
        .await?;
    Ok(Json(ArtistSearchResponse::new(req.search_term, data)))
}

/// `GET /artists/{id}`: Artist with past and upcoming shows.
///
/// # Errors
///
/// Returns [`FyyurError::NotFound`] for unknown ids and
/// [`FyyurError::LookupFailure`] when a show names a missing venue.
#[utoipa::path(
    get,
    path = "/api/v1/artists/{id}",
    tag = "Artists",
    summary = "Artist detail",
    params(("id" = i64, Path, description = "Artist identifier")),
    responses(
        (status = 200, description = "Artist with classified shows", body = ArtistDetailResponse),
        (status = 404, description = "Artist not found", body = ErrorResponse),
        (status = 500, description = "Dangling show reference", body = ErrorResponse),
    )
)]
pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, FyyurError> {
    let detail = state
        .listing_service
        .artist_detail(ArtistId::new(id))
        .await?;
    Ok(Json(ArtistDetailResponse::from(detail)))
}

/// `GET /artists/{id}/edit`: Current values for the edit form.
///
/// # Errors
///
/// Returns [`FyyurError::NotFound`] for unknown ids.
#[utoipa::path(
    get,
    path = "/api/v1/artists/{id}/edit",
    tag = "Artists",
    summary = "Artist edit form values",
    params(("id" = i64, Path, description = "Artist identifier")),
    responses(
        (status = 200, description = "Stored artist", body = Artist),
        (status = 404, description = "Artist not found", body = ErrorResponse),
    )
)]
pub async fn edit_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, FyyurError> {
    let artist = state.listing_service.artist(ArtistId::new(id)).await?;
    Ok(Json(artist))
}

/// `POST /artists`: Create an artist.
///
/// # Errors
///
/// Returns [`FyyurError::ValidationFailure`] for invalid form data.
#[utoipa::path(
    post,
    path = "/api/v1/artists",
    tag = "Artists",
    summary = "Create an artist",
    request_body = ArtistRequest,
    responses(
        (status = 201, description = "Artist created", body = Artist),
        (status = 400, description = "Invalid form data", body = ErrorResponse),
    )
)]
pub async fn create_artist(
    State(state): State<AppState>,
    Json(req): Json<ArtistRequest>,
) -> Result<impl IntoResponse, FyyurError> {
    let draft = ArtistDraft::try_from(req)?;
    let artist = state.listing_service.create_artist(draft).await?;
    Ok((StatusCode::CREATED, Json(artist)))
}

/// `PUT /artists/{id}`: Replace an artist's editable fields.
///
/// # Errors
///
/// Returns [`FyyurError::ValidationFailure`] for invalid form data and
/// [`FyyurError::NotFound`] for unknown ids.
#[utoipa::path(
    put,
    path = "/api/v1/artists/{id}",
    tag = "Artists",
    summary = "Edit an artist",
    params(("id" = i64, Path, description = "Artist identifier")),
    request_body = ArtistRequest,
    responses(
        (status = 200, description = "Artist updated", body = Artist),
        (status = 400, description = "Invalid form data", body = ErrorResponse),
        (status = 404, description = "Artist not found", body = ErrorResponse),
    )
)]
pub async fn update_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ArtistRequest>,
) -> Result<impl IntoResponse, FyyurError> {
    let draft = ArtistDraft::try_from(req)?;
    let artist = state
        .listing_service
        .update_artist(ArtistId::new(id), draft)
        .await?;
    Ok(Json(artist))
}

/// `DELETE /artists/{id}`: Delete an artist and their shows.
///
/// # Errors
///
/// Returns [`FyyurError::NotFound`] for unknown ids.
#[utoipa::path(
    delete,
    path = "/api/v1/artists/{id}",
    tag = "Artists",
    summary = "Delete an artist",
    params(("id" = i64, Path, description = "Artist identifier")),
    responses(
        (status = 204, description = "Artist deleted"),
        (status = 404, description = "Artist not found", body = ErrorResponse),
    )
)]
pub async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, FyyurError> {
    state
        .listing_service
        .delete_artist(ArtistId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Artist routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists).post(create_artist))
        .route("/artists/search", post(search_artists))
        .route(
            "/artists/{id}",
            get(get_artist).put(update_artist).delete(delete_artist),
        )
        .route("/artists/{id}/edit", get(edit_artist))
}
