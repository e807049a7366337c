//! Service layer: business logic orchestration.
//!
//! [`ListingService`] reads and writes records through a
//! [`crate::persistence::RecordStore`] and shapes them with the
//! [`crate::domain::aggregation`] functions.

pub mod clock;
pub mod listing_service;

pub use clock::Clock;
pub use listing_service::{ArtistDetail, ListingService, VenueDetail};
