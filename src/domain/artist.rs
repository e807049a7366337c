//! Artist records.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ArtistId;

/// A performer that can appear in shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Artist {
    /// Store-assigned identifier.
    pub id: ArtistId,
    /// Display name.
    pub name: String,
    /// Home city.
    pub city: String,
    /// Home state code.
    pub state: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Genres performed, without duplicates.
    pub genres: Vec<String>,
    /// Picture shown on listings.
    pub image_link: Option<String>,
    /// Facebook page.
    pub facebook_link: Option<String>,
}

/// Validated artist fields for create and edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistDraft {
    /// Display name.
    pub name: String,
    /// Home city.
    pub city: String,
    /// Home state code.
    pub state: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Genres, already deduplicated.
    pub genres: Vec<String>,
    /// Picture shown on listings.
    pub image_link: Option<String>,
    /// Facebook page.
    pub facebook_link: Option<String>,
}

impl Artist {
    /// Builds a stored artist from a draft and its assigned id.
    #[must_use]
    pub fn from_draft(id: ArtistId, draft: ArtistDraft) -> Self {
        Self {
            id,
            name: draft.name,
            city: draft.city,
            state: draft.state,
            phone: draft.phone,
            genres: draft.genres,
            image_link: draft.image_link,
            facebook_link: draft.facebook_link,
        }
    }
}
