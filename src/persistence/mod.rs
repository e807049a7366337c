//! Persistence layer: the record store seam and its implementations.
//!
//! [`RecordStore`] is the only way the service touches stored records.
//! [`postgres::PostgresStore`] backs it with `sqlx::PgPool` and wraps every
//! mutation in its own transaction; [`memory::MemoryStore`] keeps records
//! in process for tests and database-less runs.
//!
//! Reads that join shows with venues and artists go through [`Lineup`] and
//! [`ShowIndex`], which are loaded from one snapshot so a concurrent delete
//! can never leave a show pointing at a record missing from the same read.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;

use crate::domain::{Artist, ArtistDraft, ArtistId, Show, ShowDraft, Venue, VenueDraft, VenueId};
use crate::error::FyyurError;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// A venue or artist with its shows and the records on the other side of
/// those shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineup<R, C> {
    /// The venue or artist itself.
    pub record: R,
    /// Shows referencing `record`, ordered by id.
    pub shows: Vec<Show>,
    /// Records named on the other side of `shows`, ordered by id.
    pub counterparts: Vec<C>,
}

/// Every show together with every venue and artist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowIndex {
    /// All shows, ordered by id.
    pub shows: Vec<Show>,
    /// All artists, ordered by id.
    pub artists: Vec<Artist>,
    /// All venues, ordered by id.
    pub venues: Vec<Venue>,
}

/// Create, read, update, and delete access to venues, artists, and shows.
///
/// Lists come back ordered by id. Lookups by id fail with
/// [`FyyurError::NotFound`]. Deleting a venue or an artist also deletes the
/// shows that reference it. Creating a show whose artist or venue does not
/// exist fails with [`FyyurError::ValidationFailure`]. The lineup and index
/// reads see a single consistent state of the store.
#[async_trait]
pub trait RecordStore: Send + Sync + fmt::Debug {
    /// Returns every venue.
    async fn list_venues(&self) -> Result<Vec<Venue>, FyyurError>;

    /// Returns the venue with the given id.
    async fn find_venue(&self, id: VenueId) -> Result<Venue, FyyurError>;

    /// Returns venues whose name contains `term`, ignoring case.
    async fn search_venues(&self, term: &str) -> Result<Vec<Venue>, FyyurError>;

    /// Stores a new venue and returns it with its assigned id.
    async fn create_venue(&self, draft: VenueDraft) -> Result<Venue, FyyurError>;

    /// Replaces every field of an existing venue.
    async fn update_venue(&self, id: VenueId, draft: VenueDraft) -> Result<Venue, FyyurError>;

    /// Removes a venue and its shows, returning the removed venue.
    async fn delete_venue(&self, id: VenueId) -> Result<Venue, FyyurError>;

    /// Returns every artist.
    async fn list_artists(&self) -> Result<Vec<Artist>, FyyurError>;

    /// Returns the artist with the given id.
    async fn find_artist(&self, id: ArtistId) -> Result<Artist, FyyurError>;

    /// Returns artists whose name contains `term`, ignoring case.
    async fn search_artists(&self, term: &str) -> Result<Vec<Artist>, FyyurError>;

    /// Stores a new artist and returns it with its assigned id.
    async fn create_artist(&self, draft: ArtistDraft) -> Result<Artist, FyyurError>;

    /// Replaces every field of an existing artist.
    async fn update_artist(&self, id: ArtistId, draft: ArtistDraft) -> Result<Artist, FyyurError>;

    /// Removes an artist and its shows, returning the removed artist.
    async fn delete_artist(&self, id: ArtistId) -> Result<Artist, FyyurError>;

    /// Returns every show.
    async fn list_shows(&self) -> Result<Vec<Show>, FyyurError>;

    /// Returns a venue, the shows it hosts, and the artists playing them.
    async fn venue_lineup(&self, id: VenueId) -> Result<Lineup<Venue, Artist>, FyyurError>;

    /// Returns an artist, the shows they play, and the venues hosting them.
    async fn artist_lineup(&self, id: ArtistId) -> Result<Lineup<Artist, Venue>, FyyurError>;

    /// Returns every show with every artist and venue.
    async fn show_index(&self) -> Result<ShowIndex, FyyurError>;

    /// Stores a new show and returns it with its assigned id.
    async fn create_show(&self, draft: ShowDraft) -> Result<Show, FyyurError>;
}
