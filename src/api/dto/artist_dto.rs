//! Artist DTOs for create, edit, list, search, and detail.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::catalog;
use crate::domain::{Artist, ArtistDraft, ArtistId, ArtistSummary, ShowDetail, VenueId};
use crate::error::FyyurError;
use crate::service::ArtistDetail;

/// Request body for `POST /artists` and `PUT /artists/{id}`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ArtistRequest {
    /// Artist name (required).
    #[serde(default)]
    pub name: String,
    /// Home city (required).
    #[serde(default)]
    pub city: String,
    /// Two-letter state code (required).
    #[serde(default)]
    pub state: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// At least one genre from `GET /config/genres`.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Picture URL.
    #[serde(default)]
    pub image_link: Option<String>,
    /// Facebook page URL.
    #[serde(default)]
    pub facebook_link: Option<String>,
}

impl TryFrom<ArtistRequest> for ArtistDraft {
    type Error = FyyurError;

    fn try_from(req: ArtistRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: catalog::required("name", &req.name)?,
            city: catalog::required("city", &req.city)?,
            state: catalog::state(&req.state)?,
            phone: catalog::optional(req.phone),
            genres: catalog::genres(req.genres)?,
            image_link: catalog::optional_link("image_link", req.image_link)?,
            facebook_link: catalog::optional_link("facebook_link", req.facebook_link)?,
        })
    }
}

/// Entry in `GET /artists`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ArtistListItem {
    /// Artist identifier.
    pub id: ArtistId,
    /// Artist name.
    pub name: String,
}

impl From<Artist> for ArtistListItem {
    fn from(artist: Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
        }
    }
}

/// A show on an artist page, joined with its venue.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ArtistShowDto {
    /// Hosting venue.
    pub venue_id: VenueId,
    /// Hosting venue name.
    pub venue_name: String,
    /// Hosting venue picture.
    pub venue_image_link: Option<String>,
    /// Show start.
    pub start_time: NaiveDateTime,
}

impl From<ShowDetail> for ArtistShowDto {
    fn from(detail: ShowDetail) -> Self {
        Self {
            venue_id: VenueId::new(detail.counterpart_id),
            venue_name: detail.counterpart_name,
            venue_image_link: detail.counterpart_image_link,
            start_time: detail.start_time,
        }
    }
}

/// Response body for `GET /artists/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ArtistDetailResponse {
    /// The artist record.
    #[serde(flatten)]
    pub artist: Artist,
    /// Shows that already started, in store order.
    pub past_shows: Vec<ArtistShowDto>,
    /// Shows starting now or later, in store order.
    pub upcoming_shows: Vec<ArtistShowDto>,
    /// Length of `past_shows`.
    pub past_shows_count: usize,
    /// Length of `upcoming_shows`.
    pub upcoming_shows_count: usize,
}

impl From<ArtistDetail> for ArtistDetailResponse {
    fn from(detail: ArtistDetail) -> Self {
        let past = detail.shows.past;
        let upcoming = detail.shows.upcoming;
        Self {
            artist: detail.artist,
            past_shows_count: past.len(),
            upcoming_shows_count: upcoming.len(),
            past_shows: past.into_iter().map(Into::into).collect(),
            upcoming_shows: upcoming.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response body for `POST /artists/search`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ArtistSearchResponse {
    /// Term echoed from the request.
    pub search_term: String,
    /// Number of matches; always the length of `data`.
    pub count: usize,
    /// Matching artists.
    pub data: Vec<ArtistSummary>,
}

impl ArtistSearchResponse {
    /// Wraps search results, deriving `count` from the list.
    #[must_use]
    pub fn new(search_term: String, data: Vec<ArtistSummary>) -> Self {
        Self {
            search_term,
            count: data.len(),
            data,
        }
    }
}
