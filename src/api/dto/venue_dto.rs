//! Venue DTOs for create, edit, search, and detail.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::catalog;
use crate::domain::{ArtistId, ShowDetail, Venue, VenueDraft, VenueSummary};
use crate::error::FyyurError;
use crate::service::VenueDetail;

/// Request body for `POST /venues` and `PUT /venues/{id}`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct VenueRequest {
    /// Venue name (required).
    #[serde(default)]
    pub name: String,
    /// Street address (required).
    #[serde(default)]
    pub address: String,
    /// City (required).
    #[serde(default)]
    pub city: String,
    /// Two-letter state code (required).
    #[serde(default)]
    pub state: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Website URL.
    #[serde(default)]
    pub website: Option<String>,
    /// Picture URL.
    #[serde(default)]
    pub image_link: Option<String>,
    /// Facebook page URL.
    #[serde(default)]
    pub facebook_link: Option<String>,
    /// At least one genre from `GET /config/genres`.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Whether the venue is looking for performers.
    #[serde(default)]
    pub seeking_talent: bool,
    /// What the venue is looking for.
    #[serde(default)]
    pub seeking_description: Option<String>,
}

impl TryFrom<VenueRequest> for VenueDraft {
    type Error = FyyurError;

    fn try_from(req: VenueRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: catalog::required("name", &req.name)?,
            address: catalog::required("address", &req.address)?,
            city: catalog::required("city", &req.city)?,
            state: catalog::state(&req.state)?,
            phone: catalog::optional(req.phone),
            website: catalog::optional_link("website", req.website)?,
            image_link: catalog::optional_link("image_link", req.image_link)?,
            facebook_link: catalog::optional_link("facebook_link", req.facebook_link)?,
            genres: catalog::genres(req.genres)?,
            seeking_talent: req.seeking_talent,
            seeking_description: catalog::optional(req.seeking_description),
        })
    }
}

/// A show on a venue page, joined with its artist.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VenueShowDto {
    /// Performing artist.
    pub artist_id: ArtistId,
    /// Performing artist name.
    pub artist_name: String,
    /// Performing artist picture.
    pub artist_image_link: Option<String>,
    /// Show start.
    pub start_time: NaiveDateTime,
}

impl From<ShowDetail> for VenueShowDto {
    fn from(detail: ShowDetail) -> Self {
        Self {
            artist_id: ArtistId::new(detail.counterpart_id),
            artist_name: detail.counterpart_name,
            artist_image_link: detail.counterpart_image_link,
            start_time: detail.start_time,
        }
    }
}

/// Response body for `GET /venues/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct VenueDetailResponse {
    /// The venue record.
    #[serde(flatten)]
    pub venue: Venue,
    /// Shows that already started, in store order.
    pub past_shows: Vec<VenueShowDto>,
    /// Shows starting now or later, in store order.
    pub upcoming_shows: Vec<VenueShowDto>,
    /// Length of `past_shows`.
    pub past_shows_count: usize,
    /// Length of `upcoming_shows`.
    pub upcoming_shows_count: usize,
}

impl From<VenueDetail> for VenueDetailResponse {
    fn from(detail: VenueDetail) -> Self {
        let past = detail.shows.past;
        let upcoming = detail.shows.upcoming;
        Self {
            venue: detail.venue,
            past_shows_count: past.len(),
            upcoming_shows_count: upcoming.len(),
            past_shows: past.into_iter().map(Into::into).collect(),
            upcoming_shows: upcoming.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response body for `POST /venues/search`.
#[derive(Debug, Serialize, ToSchema)]
pub struct VenueSearchResponse {
    /// Term echoed from the request.
    pub search_term: String,
    /// Number of matches; always the length of `data`.
    pub count: usize,
    /// Matching venues.
    pub data: Vec<VenueSummary>,
}

impl VenueSearchResponse {
    /// Wraps search results, deriving `count` from the list.
    #[must_use]
    pub fn new(search_term: String, data: Vec<VenueSummary>) -> Self {
        Self {
            search_term,
            count: data.len(),
            data,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn request() -> VenueRequest {
        VenueRequest {
            name: " The Musical Hop ".to_string(),
            address: "1015 Folsom Street".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: Some(" ".to_string()),
            website: Some("https://www.themusicalhop.com".to_string()),
            genres: vec!["Jazz".to_string(), "Folk".to_string()],
            seeking_talent: true,
            ..VenueRequest::default()
        }
    }

    #[test]
    fn valid_request_becomes_draft() {
        let Ok(draft) = VenueDraft::try_from(request()) else {
            panic!("valid request rejected");
        };
        assert_eq!(draft.name, "The Musical Hop");
        assert_eq!(draft.phone, None);
        assert_eq!(draft.genres.len(), 2);
        assert!(draft.seeking_talent);
    }

    #[test]
    fn missing_address_is_rejected() {
        let req = VenueRequest {
            address: String::new(),
            ..request()
        };
        let Err(err) = VenueDraft::try_from(req) else {
            panic!("blank address accepted");
        };
        assert_eq!(err.to_string(), "validation failed: address is required");
    }

    #[test]
    fn bad_facebook_link_is_rejected() {
        let req = VenueRequest {
            facebook_link: Some("facebook.com/hop".to_string()),
            ..request()
        };
        assert!(VenueDraft::try_from(req).is_err());
    }

    #[test]
    fn search_count_tracks_data() {
        let response = VenueSearchResponse::new("hop".to_string(), Vec::new());
        assert_eq!(response.count, 0);
    }
}
