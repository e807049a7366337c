//! Show DTOs.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::show::parse_start_time;
use crate::domain::{ArtistId, ShowDraft, VenueId};
use crate::error::FyyurError;

/// Request body for `POST /shows`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ShowRequest {
    /// Performing artist id.
    #[serde(default)]
    pub artist_id: i64,
    /// Hosting venue id.
    #[serde(default)]
    pub venue_id: i64,
    /// Local start time: `YYYY-MM-DD HH:MM:SS` or ISO-8601 without offset.
    #[serde(default)]
    pub start_time: String,
}

impl TryFrom<ShowRequest> for ShowDraft {
    type Error = FyyurError;

    fn try_from(req: ShowRequest) -> Result<Self, Self::Error> {
        if req.artist_id <= 0 {
            return Err(FyyurError::invalid("artist_id is required"));
        }
        if req.venue_id <= 0 {
            return Err(FyyurError::invalid("venue_id is required"));
        }
        Ok(Self {
            artist_id: ArtistId::new(req.artist_id),
            venue_id: VenueId::new(req.venue_id),
            start_time: parse_start_time(&req.start_time)?,
        })
    }
}
