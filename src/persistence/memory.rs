//! In-process record store.
//!
//! [`MemoryStore`] keeps each table in a `BTreeMap` behind one
//! [`tokio::sync::RwLock`], so reads run concurrently and every mutation,
//! cascades included, is applied atomically under the write lock. Lineup
//! and index reads hold one read guard for their whole duration.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Lineup, RecordStore, ShowIndex};
use crate::domain::{
    Artist, ArtistDraft, ArtistId, Show, ShowDraft, ShowId, Venue, VenueDraft, VenueId,
};
use crate::error::{EntityKind, FyyurError};

#[derive(Debug, Default)]
struct Tables {
    venues: BTreeMap<VenueId, Venue>,
    artists: BTreeMap<ArtistId, Artist>,
    shows: BTreeMap<ShowId, Show>,
    last_venue_id: i64,
    last_artist_id: i64,
    last_show_id: i64,
}

/// Record store held entirely in memory. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Case-insensitive substring match, the in-memory counterpart of
/// `ILIKE '%term%'`.
fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

fn missing_venue(id: VenueId) -> FyyurError {
    FyyurError::NotFound {
        kind: EntityKind::Venue,
        id: id.get(),
    }
}

fn missing_artist(id: ArtistId) -> FyyurError {
    FyyurError::NotFound {
        kind: EntityKind::Artist,
        id: id.get(),
    }
}

/// Clones the records whose ids appear in `ids`, in id order.
fn pick<K: Ord, V: Clone>(rows: &BTreeMap<K, V>, keys: &BTreeSet<K>) -> Vec<V> {
    keys.iter().filter_map(|k| rows.get(k)).cloned().collect()
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_venues(&self) -> Result<Vec<Venue>, FyyurError> {
        let tables = self.tables.read().await;
        Ok(tables.venues.values().cloned().collect())
    }

    async fn find_venue(&self, id: VenueId) -> Result<Venue, FyyurError> {
        let tables = self.tables.read().await;
        let venue = tables.venues.get(&id).ok_or(missing_venue(id))?;
        Ok(venue.clone())
    }

    async fn search_venues(&self, term: &str) -> Result<Vec<Venue>, FyyurError> {
        let tables = self.tables.read().await;
        Ok(tables
            .venues
            .values()
            .filter(|venue| name_matches(&venue.name, term))
            .cloned()
            .collect())
    }

    async fn create_venue(&self, draft: VenueDraft) -> Result<Venue, FyyurError> {
        let mut tables = self.tables.write().await;
        tables.last_venue_id += 1;
        let venue = Venue::from_draft(VenueId::new(tables.last_venue_id), draft);
        tables.venues.insert(venue.id, venue.clone());
        Ok(venue)
    }

    async fn update_venue(&self, id: VenueId, draft: VenueDraft) -> Result<Venue, FyyurError> {
        let mut tables = self.tables.write().await;
        let slot = tables.venues.get_mut(&id).ok_or(missing_venue(id))?;
        *slot = Venue::from_draft(id, draft);
        Ok(slot.clone())
    }

    async fn delete_venue(&self, id: VenueId) -> Result<Venue, FyyurError> {
        let mut tables = self.tables.write().await;
        let venue = tables.venues.remove(&id).ok_or(missing_venue(id))?;
        tables.shows.retain(|_, show| show.venue_id != id);
        Ok(venue)
    }

    async fn list_artists(&self) -> Result<Vec<Artist>, FyyurError> {
        let tables = self.tables.read().await;
        Ok(tables.artists.values().cloned().collect())
    }

    async fn find_artist(&self, id: ArtistId) -> Result<Artist, FyyurError> {
        let tables = self.tables.read().await;
        let artist = tables.artists.get(&id).ok_or(missing_artist(id))?;
        Ok(artist.clone())
    }

    async fn search_artists(&self, term: &str) -> Result<Vec<Artist>, FyyurError> {
        let tables = self.tables.read().await;
        Ok(tables
            .artists
            .values()
            .filter(|artist| name_matches(&artist.name, term))
            .cloned()
            .collect())
    }

    async fn create_artist(&self, draft: ArtistDraft) -> Result<Artist, FyyurError> {
        let mut tables = self.tables.write().await;
        tables.last_artist_id += 1;
        let artist = Artist::from_draft(ArtistId::new(tables.last_artist_id), draft);
        tables.artists.insert(artist.id, artist.clone());
        Ok(artist)
    }

    async fn update_artist(&self, id: ArtistId, draft: ArtistDraft) -> Result<Artist, FyyurError> {
        let mut tables = self.tables.write().await;
        let slot = tables.artists.get_mut(&id).ok_or(missing_artist(id))?;
        *slot = Artist::from_draft(id, draft);
        Ok(slot.clone())
    }

    async fn delete_artist(&self, id: ArtistId) -> Result<Artist, FyyurError> {
        let mut tables = self.tables.write().await;
        let artist = tables.artists.remove(&id).ok_or(missing_artist(id))?;
        tables.shows.retain(|_, show| show.artist_id != id);
        Ok(artist)
    }

    async fn list_shows(&self) -> Result<Vec<Show>, FyyurError> {
        let tables = self.tables.read().await;
        Ok(tables.shows.values().cloned().collect())
    }

    async fn venue_lineup(&self, id: VenueId) -> Result<Lineup<Venue, Artist>, FyyurError> {
        let tables = self.tables.read().await;
        let record = tables.venues.get(&id).ok_or(missing_venue(id))?;
        let shows: Vec<Show> = tables
            .shows
            .values()
            .filter(|show| show.venue_id == id)
            .cloned()
            .collect();
        let ids: BTreeSet<ArtistId> = shows.iter().map(|show| show.artist_id).collect();
        Ok(Lineup {
            record: record.clone(),
            shows,
            counterparts: pick(&tables.artists, &ids),
        })
    }

    async fn artist_lineup(&self, id: ArtistId) -> Result<Lineup<Artist, Venue>, FyyurError> {
        let tables = self.tables.read().await;
        let record = tables.artists.get(&id).ok_or(missing_artist(id))?;
        let shows: Vec<Show> = tables
            .shows
            .values()
            .filter(|show| show.artist_id == id)
            .cloned()
            .collect();
        let ids: BTreeSet<VenueId> = shows.iter().map(|show| show.venue_id).collect();
        Ok(Lineup {
            record: record.clone(),
            shows,
            counterparts: pick(&tables.venues, &ids),
        })
    }

    async fn show_index(&self) -> Result<ShowIndex, FyyurError> {
        let tables = self.tables.read().await;
        Ok(ShowIndex {
            shows: tables.shows.values().cloned().collect(),
            artists: tables.artists.values().cloned().collect(),
            venues: tables.venues.values().cloned().collect(),
        })
    }

    async fn create_show(&self, draft: ShowDraft) -> Result<Show, FyyurError> {
        let mut tables = self.tables.write().await;
        if !tables.artists.contains_key(&draft.artist_id) {
            let message = format!("unknown artist {}", draft.artist_id);
            return Err(FyyurError::invalid(message));
        }
        if !tables.venues.contains_key(&draft.venue_id) {
            let message = format!("unknown venue {}", draft.venue_id);
            return Err(FyyurError::invalid(message));
        }
        tables.last_show_id += 1;
        let show = Show::from_draft(ShowId::new(tables.last_show_id), draft);
        tables.shows.insert(show.id, show.clone());
        Ok(show)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn venue_draft(name: &str) -> VenueDraft {
        VenueDraft {
            name: name.to_string(),
            address: "1015 Folsom Street".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: Some("123-123-1234".to_string()),
            website: None,
            image_link: None,
            facebook_link: None,
            genres: vec!["Jazz".to_string()],
            seeking_talent: true,
            seeking_description: Some("Looking for local jazz acts".to_string()),
        }
    }

    fn artist_draft(name: &str) -> ArtistDraft {
        ArtistDraft {
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: None,
            genres: vec!["Rock n Roll".to_string()],
            image_link: None,
            facebook_link: None,
        }
    }

    fn show_draft(artist_id: ArtistId, venue_id: VenueId) -> ShowDraft {
        let date = NaiveDate::from_ymd_opt(2035, 6, 15);
        let Some(start_time) = date.and_then(|d| d.and_hms_opt(21, 0, 0)) else {
            panic!("valid timestamp");
        };
        ShowDraft {
            artist_id,
            venue_id,
            start_time,
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let Ok(first) = store.create_venue(venue_draft("The Musical Hop")).await else {
            panic!("create failed");
        };
        let Ok(second) = store.create_venue(venue_draft("Park Square")).await else {
            panic!("create failed");
        };
        assert_eq!(first.id.get(), 1);
        assert_eq!(second.id.get(), 2);
    }

    #[tokio::test]
    async fn find_missing_returns_not_found() {
        let store = MemoryStore::new();
        let result = store.find_venue(VenueId::new(1)).await;
        assert!(matches!(
            result,
            Err(FyyurError::NotFound {
                kind: EntityKind::Venue,
                id: 1
            })
        ));
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let store = MemoryStore::new();
        let Ok(artist) = store.create_artist(artist_draft("Guns N Petals")).await else {
            panic!("create failed");
        };
        let mut draft = artist_draft("Guns N Petals");
        draft.city = "Oakland".to_string();
        let Ok(updated) = store.update_artist(artist.id, draft).await else {
            panic!("update failed");
        };
        assert_eq!(updated.id, artist.id);
        assert_eq!(updated.city, "Oakland");

        let draft = artist_draft("x");
        let missing = store.update_artist(ArtistId::new(99), draft).await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let store = MemoryStore::new();
        for name in [
            "The Musical Hop",
            "Park Square Live Music & Coffee",
            "The Dueling Pianos Bar",
        ] {
            let _ = store.create_venue(venue_draft(name)).await;
        }

        let Ok(found) = store.search_venues("hop").await else {
            panic!("search failed");
        };
        assert_eq!(found.len(), 1);

        let Ok(found) = store.search_venues("MUSIC").await else {
            panic!("search failed");
        };
        assert_eq!(found.len(), 2);

        let Ok(all) = store.search_venues("").await else {
            panic!("search failed");
        };
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn show_requires_existing_references() {
        let store = MemoryStore::new();
        let Ok(venue) = store.create_venue(venue_draft("The Musical Hop")).await else {
            panic!("create failed");
        };
        let result = store
            .create_show(show_draft(ArtistId::new(7), venue.id))
            .await;
        assert!(matches!(result, Err(FyyurError::ValidationFailure(_))));
    }

    #[tokio::test]
    async fn lineups_hold_only_referenced_counterparts() {
        let store = MemoryStore::new();
        let (Ok(hop), Ok(park), Ok(a1), Ok(a2), Ok(a3)) = (
            store.create_venue(venue_draft("The Musical Hop")).await,
            store.create_venue(venue_draft("Park Square")).await,
            store.create_artist(artist_draft("Guns N Petals")).await,
            store.create_artist(artist_draft("Matt Quevedo")).await,
            store.create_artist(artist_draft("Wild Sax Band")).await,
        ) else {
            panic!("setup failed");
        };
        let _ = store.create_show(show_draft(a1.id, hop.id)).await;
        let _ = store.create_show(show_draft(a2.id, hop.id)).await;
        let _ = store.create_show(show_draft(a2.id, hop.id)).await;
        let _ = store.create_show(show_draft(a3.id, park.id)).await;

        let Ok(lineup) = store.venue_lineup(hop.id).await else {
            panic!("lineup failed");
        };
        assert_eq!(lineup.record.id, hop.id);
        assert_eq!(lineup.shows.len(), 3);
        let names: Vec<&str> = lineup
            .counterparts
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["Guns N Petals", "Matt Quevedo"]);

        let Ok(lineup) = store.artist_lineup(a3.id).await else {
            panic!("lineup failed");
        };
        assert_eq!(lineup.shows.len(), 1);
        assert_eq!(lineup.counterparts, vec![park]);
    }

    #[tokio::test]
    async fn lineup_of_missing_record_is_not_found() {
        let store = MemoryStore::new();
        let result = store.artist_lineup(ArtistId::new(3)).await;
        assert!(matches!(
            result,
            Err(FyyurError::NotFound {
                kind: EntityKind::Artist,
                id: 3
            })
        ));
    }

    #[tokio::test]
    async fn show_index_reads_every_table() {
        let store = MemoryStore::new();
        let (Ok(venue), Ok(artist)) = (
            store.create_venue(venue_draft("The Musical Hop")).await,
            store.create_artist(artist_draft("Guns N Petals")).await,
        ) else {
            panic!("setup failed");
        };
        let _ = store.create_show(show_draft(artist.id, venue.id)).await;

        let Ok(index) = store.show_index().await else {
            panic!("index failed");
        };
        assert_eq!(index.shows.len(), 1);
        assert_eq!(index.artists, vec![artist]);
        assert_eq!(index.venues, vec![venue]);
    }

    #[tokio::test]
    async fn delete_cascades_to_shows() {
        let store = MemoryStore::new();
        let (Ok(v1), Ok(v2), Ok(artist)) = (
            store.create_venue(venue_draft("The Musical Hop")).await,
            store.create_venue(venue_draft("Park Square")).await,
            store.create_artist(artist_draft("Guns N Petals")).await,
        ) else {
            panic!("setup failed");
        };
        let _ = store.create_show(show_draft(artist.id, v1.id)).await;
        let _ = store.create_show(show_draft(artist.id, v2.id)).await;

        let Ok(removed) = store.delete_venue(v1.id).await else {
            panic!("delete failed");
        };
        assert_eq!(removed.name, "The Musical Hop");

        let Ok(remaining) = store.list_shows().await else {
            panic!("list failed");
        };
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|s| s.venue_id == v2.id));

        let _ = store.delete_artist(artist.id).await;
        let Ok(remaining) = store.list_shows().await else {
            panic!("list failed");
        };
        assert!(remaining.is_empty());
    }
}
