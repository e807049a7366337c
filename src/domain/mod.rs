//! Domain layer: records, form catalogs, and the aggregation engine.
//!
//! This module holds the typed venue, artist, and show records, the
//! identifiers that key them, the fixed choice lists the forms validate
//! against, and the pure functions that group and classify records for
//! display.

pub mod aggregation;
pub mod artist;
pub mod catalog;
pub mod record_id;
pub mod show;
pub mod venue;

pub use aggregation::{
    ArtistSummary, ClassifiedShows, Counterpart, LocationGroup, ShowDetail, ShowListing,
    VenueSummary,
};
pub use artist::{Artist, ArtistDraft};
pub use record_id::{ArtistId, ShowId, VenueId};
pub use show::{Show, ShowDraft};
pub use venue::{Venue, VenueDraft};
