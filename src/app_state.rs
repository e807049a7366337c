//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::ListingService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Listing service for all venue, artist, and show operations.
    pub listing_service: Arc<ListingService>,
}

impl AppState {
    /// Wraps a listing service for sharing across handlers.
    #[must_use]
    pub fn new(listing_service: ListingService) -> Self {
        Self {
            listing_service: Arc::new(listing_service),
        }
    }
}
