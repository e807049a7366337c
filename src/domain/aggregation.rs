//! Aggregation engine: turns raw record lists into grouped and classified
//! view data.
//!
//! Everything here is pure. The evaluation instant is always passed in, so
//! callers read the clock once per request and every count and partition in
//! that request agrees on what "now" means.
//!
//! Two comparison rules are in play and they differ at the boundary:
//!
//! - a venue's *upcoming show count* includes shows strictly after `now`;
//! - [`classify_shows`] puts a show in `past` only when it starts strictly
//!   before the reference instant, so a show starting exactly at the
//!   reference is upcoming.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use super::{Artist, ArtistId, Show, Venue, VenueId};
use crate::error::{EntityKind, FyyurError};

/// The record on the other side of a show, joined in for display.
///
/// An artist page lists shows joined with their venues; a venue page lists
/// shows joined with their artists.
pub trait Counterpart {
    /// Identifier type of the joined record.
    type Id: Copy + Eq + Hash + Into<i64>;

    /// Reported in [`FyyurError::LookupFailure`] when the join misses.
    const KIND: EntityKind;

    /// Identifier of this record.
    fn id(&self) -> Self::Id;

    /// The identifier a show holds for this side of the join.
    fn referenced_by(show: &Show) -> Self::Id;

    /// Display name.
    fn name(&self) -> &str;

    /// Display picture.
    fn image_link(&self) -> Option<&str>;
}

impl Counterpart for Artist {
    type Id = ArtistId;
    const KIND: EntityKind = EntityKind::Artist;

    fn id(&self) -> ArtistId {
        self.id
    }

    fn referenced_by(show: &Show) -> ArtistId {
        show.artist_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn image_link(&self) -> Option<&str> {
        self.image_link.as_deref()
    }
}

impl Counterpart for Venue {
    type Id = VenueId;
    const KIND: EntityKind = EntityKind::Venue;

    fn id(&self) -> VenueId {
        self.id
    }

    fn referenced_by(show: &Show) -> VenueId {
        show.venue_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn image_link(&self) -> Option<&str> {
        self.image_link.as_deref()
    }
}

/// A venue as listed inside its location group or in search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct VenueSummary {
    /// Venue identifier.
    pub id: VenueId,
    /// Venue name.
    pub name: String,
    /// Shows at this venue starting strictly after the evaluation instant.
    pub upcoming_show_count: usize,
}

/// An artist as listed in search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ArtistSummary {
    /// Artist identifier.
    pub id: ArtistId,
    /// Artist name.
    pub name: String,
    /// Shows by this artist starting strictly after the evaluation instant.
    pub upcoming_show_count: usize,
}

/// Venues sharing an identical (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LocationGroup {
    /// City shared by every venue in the group.
    pub city: String,
    /// State shared by every venue in the group.
    pub state: String,
    /// Venues in input order.
    pub venues: Vec<VenueSummary>,
}

/// A show joined with its counterpart's display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ShowDetail {
    /// Identifier of the joined artist or venue.
    pub counterpart_id: i64,
    /// Name of the joined artist or venue.
    pub counterpart_name: String,
    /// Picture of the joined artist or venue.
    pub counterpart_image_link: Option<String>,
    /// Show start.
    pub start_time: NaiveDateTime,
}

/// Shows split around a reference instant.
///
/// Counts are only ever read off the list lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedShows {
    /// Shows that started strictly before the reference, input order.
    pub past: Vec<ShowDetail>,
    /// Shows starting at or after the reference, input order.
    pub upcoming: Vec<ShowDetail>,
}

impl ClassifiedShows {
    /// Number of past shows.
    #[must_use]
    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    /// Number of upcoming shows.
    #[must_use]
    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }
}

/// A show joined with both its venue and its artist, for the show index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ShowListing {
    /// Hosting venue.
    pub venue_id: VenueId,
    /// Hosting venue name.
    pub venue_name: String,
    /// Performing artist.
    pub artist_id: ArtistId,
    /// Performing artist name.
    pub artist_name: String,
    /// Performing artist picture.
    pub artist_image_link: Option<String>,
    /// Show start.
    pub start_time: NaiveDateTime,
}

/// Number of shows at `venue_id` starting strictly after `now`.
#[must_use]
pub fn count_upcoming(venue_id: VenueId, shows: &[Show], now: NaiveDateTime) -> usize {
    shows
        .iter()
        .filter(|show| show.venue_id == venue_id && show.start_time > now)
        .count()
}

/// Summarizes one venue against the given shows.
#[must_use]
pub fn summarize_venue(venue: &Venue, shows: &[Show], now: NaiveDateTime) -> VenueSummary {
    VenueSummary {
        id: venue.id,
        name: venue.name.clone(),
        upcoming_show_count: count_upcoming(venue.id, shows, now),
    }
}

/// Summarizes one artist against the given shows.
#[must_use]
pub fn summarize_artist(artist: &Artist, shows: &[Show], now: NaiveDateTime) -> ArtistSummary {
    ArtistSummary {
        id: artist.id,
        name: artist.name.clone(),
        upcoming_show_count: shows
            .iter()
            .filter(|show| show.artist_id == artist.id && show.start_time > now)
            .count(),
    }
}

/// Partitions venues by exact `(city, state)` match.
///
/// Every venue lands in exactly one group, including venues without shows.
/// Groups come out in order of first appearance; callers must not rely on
/// that order. Cities and states are compared verbatim, so `"Boston"` and
/// `"boston"` form separate groups.
#[must_use]
pub fn group_venues_by_location(
    venues: &[Venue],
    shows: &[Show],
    now: NaiveDateTime,
) -> Vec<LocationGroup> {
    let mut upcoming: HashMap<VenueId, usize> = HashMap::new();
    for show in shows.iter().filter(|show| show.start_time > now) {
        *upcoming.entry(show.venue_id).or_default() += 1;
    }

    let mut groups: Vec<LocationGroup> = Vec::new();
    let mut slots: HashMap<(&str, &str), usize> = HashMap::new();
    for venue in venues {
        let slot = *slots
            .entry((venue.city.as_str(), venue.state.as_str()))
            .or_insert_with(|| {
                groups.push(LocationGroup {
                    city: venue.city.clone(),
                    state: venue.state.clone(),
                    venues: Vec::new(),
                });
                groups.len() - 1
            });
        if let Some(group) = groups.get_mut(slot) {
            group.venues.push(VenueSummary {
                id: venue.id,
                name: venue.name.clone(),
                upcoming_show_count: upcoming.get(&venue.id).copied().unwrap_or(0),
            });
        }
    }
    groups
}

/// Joins each show with its counterpart and splits the result around
/// `reference`.
///
/// `shows` should already be narrowed to a single artist or venue.
///
/// # Errors
///
/// Returns [`FyyurError::LookupFailure`] when a show references a
/// counterpart missing from `counterparts`.
pub fn classify_shows<C: Counterpart>(
    shows: &[Show],
    counterparts: &[C],
    reference: NaiveDateTime,
) -> Result<ClassifiedShows, FyyurError> {
    let by_id: HashMap<C::Id, &C> = counterparts.iter().map(|c| (c.id(), c)).collect();

    let mut classified = ClassifiedShows::default();
    for show in shows {
        let key = C::referenced_by(show);
        let counterpart = by_id.get(&key).ok_or(FyyurError::LookupFailure {
            kind: C::KIND,
            id: key.into(),
        })?;
        let detail = ShowDetail {
            counterpart_id: key.into(),
            counterpart_name: counterpart.name().to_string(),
            counterpart_image_link: counterpart.image_link().map(str::to_string),
            start_time: show.start_time,
        };
        if show.start_time < reference {
            classified.past.push(detail);
        } else {
            classified.upcoming.push(detail);
        }
    }
    Ok(classified)
}

/// Orders shows by start time, latest first. Ties keep their input order.
#[must_use]
pub fn sort_shows_descending(mut shows: Vec<Show>) -> Vec<Show> {
    shows.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    shows
}

/// Builds the show index: latest first, each show joined with its venue and
/// artist.
///
/// # Errors
///
/// Returns [`FyyurError::LookupFailure`] when a show references a venue or
/// artist that is not in the given lists.
pub fn list_shows(
    shows: Vec<Show>,
    artists: &[Artist],
    venues: &[Venue],
) -> Result<Vec<ShowListing>, FyyurError> {
    let artists: HashMap<ArtistId, &Artist> = artists.iter().map(|a| (a.id, a)).collect();
    let venues: HashMap<VenueId, &Venue> = venues.iter().map(|v| (v.id, v)).collect();

    sort_shows_descending(shows)
        .into_iter()
        .map(|show| {
            let Some(venue) = venues.get(&show.venue_id) else {
                return Err(FyyurError::LookupFailure {
                    kind: EntityKind::Venue,
                    id: show.venue_id.get(),
                });
            };
            let Some(artist) = artists.get(&show.artist_id) else {
                return Err(FyyurError::LookupFailure {
                    kind: EntityKind::Artist,
                    id: show.artist_id.get(),
                });
            };
            Ok(ShowListing {
                venue_id: venue.id,
                venue_name: venue.name.clone(),
                artist_id: artist.id,
                artist_name: artist.name.clone(),
                artist_image_link: artist.image_link.clone(),
                start_time: show.start_time,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::{BTreeSet, HashSet};

    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::domain::ShowId;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        let date = NaiveDate::from_ymd_opt(y, m, d);
        let Some(dt) = date.and_then(|date| date.and_hms_opt(h, min, 0)) else {
            panic!("valid timestamp");
        };
        dt
    }

    fn reference() -> NaiveDateTime {
        at(2024, 1, 1, 0, 0)
    }

    fn venue(id: i64, city: &str, state: &str) -> Venue {
        Venue {
            id: VenueId::new(id),
            name: format!("Venue {id}"),
            address: "1015 Folsom Street".to_string(),
            city: city.to_string(),
            state: state.to_string(),
            phone: None,
            website: None,
            image_link: Some(format!("https://img.example/venue/{id}.jpg")),
            facebook_link: None,
            genres: vec!["Jazz".to_string()],
            seeking_talent: false,
            seeking_description: None,
        }
    }

    fn artist(id: i64) -> Artist {
        Artist {
            id: ArtistId::new(id),
            name: format!("Artist {id}"),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: None,
            genres: vec!["Rock n Roll".to_string()],
            image_link: Some(format!("https://img.example/artist/{id}.jpg")),
            facebook_link: None,
        }
    }

    fn show(id: i64, artist_id: i64, venue_id: i64, start_time: NaiveDateTime) -> Show {
        Show {
            id: ShowId::new(id),
            artist_id: ArtistId::new(artist_id),
            venue_id: VenueId::new(venue_id),
            start_time,
        }
    }

    fn group_for<'a>(groups: &'a [LocationGroup], city: &str, state: &str) -> &'a LocationGroup {
        let matches = |g: &&LocationGroup| g.city == city && g.state == state;
        let Some(group) = groups.iter().find(matches) else {
            panic!("missing group {city}, {state}");
        };
        group
    }

    #[test]
    fn same_city_venues_share_a_group() {
        let venues = vec![venue(1, "Boston", "MA"), venue(2, "Boston", "MA")];
        let groups = group_venues_by_location(&venues, &[], reference());

        assert_eq!(groups.len(), 1);
        let group = group_for(&groups, "Boston", "MA");
        let ids: Vec<i64> = group.venues.iter().map(|v| v.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(group.venues.iter().all(|v| v.upcoming_show_count == 0));
    }

    #[test]
    fn grouping_is_a_partition() {
        let venues = vec![
            venue(1, "San Francisco", "CA"),
            venue(2, "New York", "NY"),
            venue(3, "San Francisco", "CA"),
            venue(4, "Portland", "OR"),
            venue(5, "Portland", "ME"),
            venue(6, "new york", "NY"),
        ];
        let groups = group_venues_by_location(&venues, &[], reference());

        let mut seen = Vec::new();
        for group in &groups {
            for summary in &group.venues {
                let Some(original) = venues.iter().find(|v| v.id == summary.id) else {
                    panic!("unknown venue {}", summary.id);
                };
                assert_eq!(original.city, group.city);
                assert_eq!(original.state, group.state);
                seen.push(summary.id);
            }
        }
        seen.sort();
        let expected: Vec<VenueId> = venues.iter().map(|v| v.id).collect();
        assert_eq!(seen, expected);

        let keys: HashSet<(&str, &str)> = groups
            .iter()
            .map(|g| (g.city.as_str(), g.state.as_str()))
            .collect();
        assert_eq!(keys.len(), groups.len());
        assert_eq!(groups.len(), 5);
    }

    #[test]
    fn grouping_ignores_input_order() {
        let venues = vec![
            venue(1, "San Francisco", "CA"),
            venue(2, "New York", "NY"),
            venue(3, "San Francisco", "CA"),
        ];
        let mut reversed = venues.clone();
        reversed.reverse();

        let as_sets = |groups: Vec<LocationGroup>| -> BTreeSet<(String, String, BTreeSet<i64>)> {
            groups
                .into_iter()
                .map(|g| {
                    let ids = g.venues.iter().map(|v| v.id.get()).collect();
                    (g.city, g.state, ids)
                })
                .collect()
        };

        assert_eq!(
            as_sets(group_venues_by_location(&venues, &[], reference())),
            as_sets(group_venues_by_location(&reversed, &[], reference())),
        );
    }

    #[test]
    fn upcoming_counts_are_strictly_after_now() {
        let now = reference();
        let venues = vec![venue(1, "Boston", "MA"), venue(2, "Boston", "MA")];
        let shows = vec![
            show(1, 1, 1, at(2023, 6, 1, 20, 0)),
            show(2, 1, 1, at(2025, 6, 1, 20, 0)),
            show(3, 2, 1, at(2026, 6, 1, 20, 0)),
            show(4, 2, 2, now),
            show(5, 2, 2, at(2030, 1, 1, 21, 0)),
        ];
        let groups = group_venues_by_location(&venues, &shows, now);
        let group = group_for(&groups, "Boston", "MA");

        let counts: Vec<(i64, usize)> = group
            .venues
            .iter()
            .map(|v| (v.id.get(), v.upcoming_show_count))
            .collect();
        assert_eq!(counts, vec![(1, 2), (2, 1)]);

        let total: usize = group.venues.iter().map(|v| v.upcoming_show_count).sum();
        let in_group = |s: &Show| group.venues.iter().any(|v| v.id == s.venue_id);
        let expected = shows
            .iter()
            .filter(|&s| in_group(s) && s.start_time > now)
            .count();
        assert_eq!(total, expected);
    }

    #[test]
    fn summary_matches_group_count() {
        let now = reference();
        let hall = venue(1, "Boston", "MA");
        let shows = vec![
            show(1, 1, 1, at(2025, 1, 1, 20, 0)),
            show(2, 1, 2, at(2025, 1, 1, 20, 0)),
        ];
        let summary = summarize_venue(&hall, &shows, now);
        assert_eq!(summary.upcoming_show_count, 1);
        assert_eq!(count_upcoming(VenueId::new(2), &shows, now), 1);
    }

    #[test]
    fn artist_summary_counts_only_their_future_shows() {
        let now = reference();
        let shows = vec![
            show(1, 1, 1, at(2023, 1, 1, 20, 0)),
            show(2, 1, 2, at(2025, 1, 1, 20, 0)),
            show(3, 2, 2, at(2025, 1, 1, 20, 0)),
        ];
        let summary = summarize_artist(&artist(1), &shows, now);
        assert_eq!(summary.upcoming_show_count, 1);
        assert_eq!(summary.name, "Artist 1");
    }

    #[test]
    fn classify_splits_past_and_upcoming() {
        let venues = vec![venue(1, "Boston", "MA")];
        let shows = vec![
            show(1, 1, 1, at(2020, 1, 1, 10, 0)),
            show(2, 1, 1, at(2099, 1, 1, 10, 0)),
        ];

        let Ok(classified) = classify_shows(&shows, &venues, reference()) else {
            panic!("classification failed");
        };

        assert_eq!(classified.past_count(), 1);
        assert_eq!(classified.upcoming_count(), 1);
        let Some(past) = classified.past.first() else {
            panic!("no past show");
        };
        assert_eq!(past.start_time, at(2020, 1, 1, 10, 0));
        assert_eq!(past.counterpart_id, 1);
        assert_eq!(past.counterpart_name, "Venue 1");
        assert_eq!(
            past.counterpart_image_link.as_deref(),
            Some("https://img.example/venue/1.jpg")
        );
        let Some(upcoming) = classified.upcoming.first() else {
            panic!("no upcoming show");
        };
        assert_eq!(upcoming.start_time, at(2099, 1, 1, 10, 0));
    }

    #[test]
    fn show_at_reference_instant_is_upcoming() {
        let artists = vec![artist(4)];
        let shows = vec![show(1, 4, 1, reference())];

        let Ok(classified) = classify_shows(&shows, &artists, reference()) else {
            panic!("classification failed");
        };
        assert!(classified.past.is_empty());
        assert_eq!(classified.upcoming_count(), 1);
    }

    #[test]
    fn classification_covers_every_show_once() {
        let artists = vec![artist(1), artist(2)];
        let t = reference();
        let shows: Vec<Show> = (0_i64..10)
            .map(|i| show(i, i % 2 + 1, 1, t + Duration::hours(i - 5)))
            .collect();

        let Ok(classified) = classify_shows(&shows, &artists, t) else {
            panic!("classification failed");
        };
        let total = classified.past_count() + classified.upcoming_count();
        assert_eq!(total, shows.len());
        assert!(classified.past.iter().all(|d| d.start_time < t));
        assert!(classified.upcoming.iter().all(|d| d.start_time >= t));
        assert_eq!(classified.past_count(), 5);
    }

    #[test]
    fn classification_keeps_input_order() {
        let artists = vec![artist(1), artist(2), artist(3)];
        let shows = vec![
            show(1, 3, 1, at(2030, 5, 1, 20, 0)),
            show(2, 1, 1, at(2029, 5, 1, 20, 0)),
            show(3, 2, 1, at(2031, 5, 1, 20, 0)),
        ];
        let Ok(classified) = classify_shows(&shows, &artists, reference()) else {
            panic!("classification failed");
        };
        let upcoming = classified.upcoming.iter();
        let order: Vec<i64> = upcoming.map(|d| d.counterpart_id).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn classification_is_repeatable() {
        let artists = vec![artist(1)];
        let shows = vec![
            show(1, 1, 1, at(2020, 1, 1, 10, 0)),
            show(2, 1, 1, at(2099, 1, 1, 10, 0)),
        ];
        let first = classify_shows(&shows, &artists, reference());
        let second = classify_shows(&shows, &artists, reference());
        let (Ok(first), Ok(second)) = (first, second) else {
            panic!("classification failed");
        };
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let Ok(classified) = classify_shows::<Artist>(&[], &[], reference()) else {
            panic!("classification failed");
        };
        assert_eq!(classified, ClassifiedShows::default());
        assert!(group_venues_by_location(&[], &[], reference()).is_empty());
    }

    #[test]
    fn dangling_counterpart_is_reported() {
        let artists = vec![artist(1)];
        let shows = vec![show(1, 9, 1, reference())];
        let result = classify_shows(&shows, &artists, reference());
        assert!(matches!(
            result,
            Err(FyyurError::LookupFailure {
                kind: EntityKind::Artist,
                id: 9
            })
        ));
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let tie = at(2025, 3, 1, 20, 0);
        let shows = vec![
            show(1, 1, 1, at(2024, 3, 1, 20, 0)),
            show(2, 1, 1, tie),
            show(3, 1, 1, at(2026, 3, 1, 20, 0)),
            show(4, 1, 1, tie),
        ];
        let ids: Vec<i64> = sort_shows_descending(shows)
            .iter()
            .map(|s| s.id.get())
            .collect();
        assert_eq!(ids, vec![3, 2, 4, 1]);
    }

    #[test]
    fn show_index_joins_both_sides() {
        let artists = vec![artist(1), artist(2)];
        let venues = vec![venue(1, "Boston", "MA"), venue(2, "Boston", "MA")];
        let shows = vec![
            show(1, 1, 2, at(2024, 3, 1, 20, 0)),
            show(2, 2, 1, at(2026, 3, 1, 20, 0)),
        ];
        let Ok(listings) = list_shows(shows, &artists, &venues) else {
            panic!("listing failed");
        };
        let Some(latest) = listings.first() else {
            panic!("empty listing");
        };
        assert_eq!(latest.artist_name, "Artist 2");
        assert_eq!(latest.venue_name, "Venue 1");
        assert_eq!(listings.len(), 2);
    }

    #[test]
    fn show_index_reports_missing_venue() {
        let shows = vec![show(1, 1, 5, reference())];
        let result = list_shows(shows, &[artist(1)], &[]);
        assert!(matches!(
            result,
            Err(FyyurError::LookupFailure {
                kind: EntityKind::Venue,
                id: 5
            })
        ));
    }
}
