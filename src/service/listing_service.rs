//! Listing service: orchestrates record store calls and aggregation.

use std::sync::Arc;

use crate::domain::aggregation::{
    classify_shows, group_venues_by_location, list_shows, summarize_artist, summarize_venue,
};
use crate::domain::{
    Artist, ArtistDraft, ArtistId, ArtistSummary, ClassifiedShows, LocationGroup, Show, ShowDraft,
    ShowListing, Venue, VenueDraft, VenueId, VenueSummary,
};
use crate::error::FyyurError;
use crate::persistence::RecordStore;

use super::Clock;

/// A venue with its shows joined to their artists and split around now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueDetail {
    /// The venue record.
    pub venue: Venue,
    /// Shows hosted by the venue.
    pub shows: ClassifiedShows,
}

/// An artist with their shows joined to venues and split around now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistDetail {
    /// The artist record.
    pub artist: Artist,
    /// Shows played by the artist.
    pub shows: ClassifiedShows,
}

/// Orchestration layer for all listing operations.
///
/// Stateless coordinator over an injected [`RecordStore`]. Every read that
/// depends on time reads the [`Clock`] exactly once.
#[derive(Debug, Clone)]
pub struct ListingService {
    store: Arc<dyn RecordStore>,
    clock: Clock,
}

impl ListingService {
    /// Creates a service on the system clock.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_clock(store, Clock::System)
    }

    /// Creates a service with an explicit clock.
    #[must_use]
    pub fn with_clock(store: Arc<dyn RecordStore>, clock: Clock) -> Self {
        Self { store, clock }
    }

    // ── Venues ──────────────────────────────────────────────────────────

    /// Groups every venue by city and state.
    ///
    /// # Errors
    ///
    /// Returns a [`FyyurError`] if the store fails.
    pub async fn venues_by_location(&self) -> Result<Vec<LocationGroup>, FyyurError> {
        let venues = self.store.list_venues().await?;
        let shows = self.store.list_shows().await?;
        Ok(group_venues_by_location(&venues, &shows, self.clock.now()))
    }

    /// Loads one venue for editing.
    ///
    /// # Errors
    ///
    /// Returns [`FyyurError::NotFound`] if the venue does not exist.
    pub async fn venue(&self, id: VenueId) -> Result<Venue, FyyurError> {
        self.store.find_venue(id).await
    }

    /// Loads one venue with its past and upcoming shows.
    ///
    /// The venue, its shows, and their artists come from one store
    /// snapshot, so a concurrent delete cannot strand a show.
    ///
    /// # Errors
    ///
    /// Returns [`FyyurError::NotFound`] if the venue does not exist, or
    /// [`FyyurError::LookupFailure`] if a show points at a missing artist.
    pub async fn venue_detail(&self, id: VenueId) -> Result<VenueDetail, FyyurError> {
        let lineup = self.store.venue_lineup(id).await?;
        let now = self.clock.now();
        let shows = classify_shows(&lineup.shows, &lineup.counterparts, now)?;
        let venue = lineup.record;
        Ok(VenueDetail { venue, shows })
    }

    /// Finds venues by case-insensitive name fragment.
    ///
    /// # Errors
    ///
    /// Returns a [`FyyurError`] if the store fails.
    pub async fn search_venues(&self, term: &str) -> Result<Vec<VenueSummary>, FyyurError> {
        let venues = self.store.search_venues(term).await?;
        let shows = self.upcoming_context(venues.is_empty()).await?;
        let now = self.clock.now();
        Ok(venues
            .iter()
            .map(|venue| summarize_venue(venue, &shows, now))
            .collect())
    }

    /// Lists a new venue.
    ///
    /// # Errors
    ///
    /// Returns a [`FyyurError`] if the store rejects the insert.
    pub async fn create_venue(&self, draft: VenueDraft) -> Result<Venue, FyyurError> {
        let venue = self.store.create_venue(draft).await?;
        tracing::info!(venue_id = %venue.id, name = %venue.name, "venue listed");
        Ok(venue)
    }

    /// Replaces a venue's fields.
    ///
    /// # Errors
    ///
    /// Returns [`FyyurError::NotFound`] if the venue does not exist.
    pub async fn update_venue(&self, id: VenueId, draft: VenueDraft) -> Result<Venue, FyyurError> {
        let venue = self.store.update_venue(id, draft).await?;
        tracing::info!(venue_id = %venue.id, "venue updated");
        Ok(venue)
    }

    /// Deletes a venue and its shows.
    ///
    /// # Errors
    ///
    /// Returns [`FyyurError::NotFound`] if the venue does not exist.
    pub async fn delete_venue(&self, id: VenueId) -> Result<Venue, FyyurError> {
        let venue = self.store.delete_venue(id).await?;
        tracing::info!(venue_id = %venue.id, name = %venue.name, "venue deleted");
        Ok(venue)
    }

    // ── Artists ─────────────────────────────────────────────────────────

    /// Returns every artist.
    ///
    /// # Errors
    ///
    /// Returns a [`FyyurError`] if the store fails.
    pub async fn artists(&self) -> Result<Vec<Artist>, FyyurError> {
        self.store.list_artists().await
    }

    /// Loads one artist for editing.
    ///
    /// # Errors
    ///
    /// Returns [`FyyurError::NotFound`] if the artist does not exist.
    pub async fn artist(&self, id: ArtistId) -> Result<Artist, FyyurError> {
        self.store.find_artist(id).await
    }

    /// Loads one artist with their past and upcoming shows, read from one
    /// store snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`FyyurError::NotFound`] if the artist does not exist, or
    /// [`FyyurError::LookupFailure`] if a show points at a missing venue.
    pub async fn artist_detail(&self, id: ArtistId) -> Result<ArtistDetail, FyyurError> {
        let lineup = self.store.artist_lineup(id).await?;
        let now = self.clock.now();
        let shows = classify_shows(&lineup.shows, &lineup.counterparts, now)?;
        let artist = lineup.record;
        Ok(ArtistDetail { artist, shows })
    }

    /// Finds artists by case-insensitive name fragment.
    ///
    /// # Errors
    ///
    /// Returns a [`FyyurError`] if the store fails.
    pub async fn search_artists(&self, term: &str) -> Result<Vec<ArtistSummary>, FyyurError> {
        let artists = self.store.search_artists(term).await?;
        let shows = self.upcoming_context(artists.is_empty()).await?;
        let now = self.clock.now();
        Ok(artists
            .iter()
            .map(|artist| summarize_artist(artist, &shows, now))
            .collect())
    }

    /// Lists a new artist.
    ///
    /// # Errors
    ///
    /// Returns a [`FyyurError`] if the store rejects the insert.
    pub async fn create_artist(&self, draft: ArtistDraft) -> Result<Artist, FyyurError> {
        let artist = self.store.create_artist(draft).await?;
        tracing::info!(artist_id = %artist.id, name = %artist.name, "artist listed");
        Ok(artist)
    }

    /// Replaces an artist's fields.
    ///
    /// # Errors
    ///
    /// Returns [`FyyurError::NotFound`] if the artist does not exist.
    pub async fn update_artist(
        &self,
        id: ArtistId,
        draft: ArtistDraft,
    ) -> Result<Artist, FyyurError> {
        let artist = self.store.update_artist(id, draft).await?;
        tracing::info!(artist_id = %artist.id, "artist updated");
        Ok(artist)
    }

    /// Deletes an artist and their shows.
    ///
    /// # Errors
    ///
    /// Returns [`FyyurError::NotFound`] if the artist does not exist.
    pub async fn delete_artist(&self, id: ArtistId) -> Result<Artist, FyyurError> {
        let artist = self.store.delete_artist(id).await?;
        tracing::info!(artist_id = %artist.id, name = %artist.name, "artist deleted");
        Ok(artist)
    }

    // ── Shows ───────────────────────────────────────────────────────────

    /// Returns every show, latest first, joined with venue and artist.
    ///
    /// # Errors
    ///
    /// Returns a [`FyyurError`] if the store fails or a show points at a
    /// missing record.
    pub async fn shows(&self) -> Result<Vec<ShowListing>, FyyurError> {
        let index = self.store.show_index().await?;
        list_shows(index.shows, &index.artists, &index.venues)
    }

    /// Lists a new show.
    ///
    /// # Errors
    ///
    /// Returns [`FyyurError::ValidationFailure`] if the artist or venue does
    /// not exist.
    pub async fn create_show(&self, draft: ShowDraft) -> Result<Show, FyyurError> {
        let show = self.store.create_show(draft).await?;
        tracing::info!(
            show_id = %show.id,
            artist_id = %show.artist_id,
            venue_id = %show.venue_id,
            "show listed"
        );
        Ok(show)
    }

    /// Shows needed to count upcoming appearances; skipped when there is
    /// nothing to summarize.
    async fn upcoming_context(&self, nothing_to_summarize: bool) -> Result<Vec<Show>, FyyurError> {
        if nothing_to_summarize {
            return Ok(Vec::new());
        }
        self.store.list_shows().await
    }
}
