//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Resource endpoints are mounted under `/api/v1`; health and form
//! choice lists live at the root.

pub mod dto;
pub mod handlers;

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::error::ErrorResponse;

/// OpenAPI document covering every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Fyyur API",
        description = "Venues, artists, and the shows that connect them."
    ),
    paths(
        handlers::venue::list_venues,
        handlers::venue::search_venues,
        handlers::venue::get_venue,
        handlers::venue::edit_venue,
        handlers::venue::create_venue,
        handlers::venue::update_venue,
        handlers::venue::delete_venue,
        handlers::artist::list_artists,
        handlers::artist::search_artists,
        handlers::artist::get_artist,
        handlers::artist::edit_artist,
        handlers::artist::create_artist,
        handlers::artist::update_artist,
        handlers::artist::delete_artist,
        handlers::show::list_shows,
        handlers::show::create_show,
        handlers::system::health_handler,
        handlers::system::genres_handler,
        handlers::system::states_handler,
    ),
    components(schemas(ErrorResponse)),
    tags(
        (name = "Venues", description = "Venue listing, search, and management"),
        (name = "Artists", description = "Artist listing, search, and management"),
        (name = "Shows", description = "Show listing and creation"),
        (name = "System", description = "Health and form choice lists"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

/// Builds the served application: routes, middleware, and state.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    build_router()
        .layer(timeout_layer(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Answers requests running longer than `request_timeout` with
/// `408 Request Timeout`.
fn timeout_layer(request_timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout)
}
