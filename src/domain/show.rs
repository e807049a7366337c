//! Show records: one artist at one venue at one time.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ArtistId, ShowId, VenueId};
use crate::error::FyyurError;

/// Timestamp layouts accepted for `start_time`, most specific first.
const START_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// A scheduled appearance of one artist at one venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Show {
    /// Store-assigned identifier.
    pub id: ShowId,
    /// Performing artist.
    pub artist_id: ArtistId,
    /// Hosting venue.
    pub venue_id: VenueId,
    /// Wall-clock start, without a timezone.
    pub start_time: NaiveDateTime,
}

/// Validated show fields for create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowDraft {
    /// Performing artist.
    pub artist_id: ArtistId,
    /// Hosting venue.
    pub venue_id: VenueId,
    /// Wall-clock start.
    pub start_time: NaiveDateTime,
}

impl Show {
    /// Builds a stored show from a draft and its assigned id.
    #[must_use]
    pub const fn from_draft(id: ShowId, draft: ShowDraft) -> Self {
        Self {
            id,
            artist_id: draft.artist_id,
            venue_id: draft.venue_id,
            start_time: draft.start_time,
        }
    }
}

/// Parses a submitted start time in any of the accepted layouts.
///
/// # Errors
///
/// Returns [`FyyurError::ValidationFailure`] when no layout matches.
pub fn parse_start_time(raw: &str) -> Result<NaiveDateTime, FyyurError> {
    let raw = raw.trim();
    let parsed = START_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok());
    parsed.ok_or_else(|| {
        let message = format!("start_time `{raw}` is not a valid timestamp");
        FyyurError::invalid(message)
    })
}
