//! Venue records.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::VenueId;

/// A physical location that can host shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Venue {
    /// Store-assigned identifier.
    pub id: VenueId,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City, compared verbatim when grouping.
    pub city: String,
    /// Two-letter state code, compared verbatim when grouping.
    pub state: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Venue website.
    pub website: Option<String>,
    /// Picture shown on listings.
    pub image_link: Option<String>,
    /// Facebook page.
    pub facebook_link: Option<String>,
    /// Genres the venue books, without duplicates.
    pub genres: Vec<String>,
    /// Whether the venue is looking for performers.
    pub seeking_talent: bool,
    /// What kind of performers the venue is looking for.
    pub seeking_description: Option<String>,
}

/// Validated venue fields for create and edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueDraft {
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State code.
    pub state: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Venue website.
    pub website: Option<String>,
    /// Picture shown on listings.
    pub image_link: Option<String>,
    /// Facebook page.
    pub facebook_link: Option<String>,
    /// Genres, already deduplicated.
    pub genres: Vec<String>,
    /// Whether the venue is looking for performers.
    pub seeking_talent: bool,
    /// What kind of performers the venue is looking for.
    pub seeking_description: Option<String>,
}

impl Venue {
    /// Builds a stored venue from a draft and its assigned id.
    #[must_use]
    pub fn from_draft(id: VenueId, draft: VenueDraft) -> Self {
        Self {
            id,
            name: draft.name,
            address: draft.address,
            city: draft.city,
            state: draft.state,
            phone: draft.phone,
            website: draft.website,
            image_link: draft.image_link,
            facebook_link: draft.facebook_link,
            genres: draft.genres,
            seeking_talent: draft.seeking_talent,
            seeking_description: draft.seeking_description,
        }
    }
}
