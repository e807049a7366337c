//! Database row types for the `venues`, `artists`, and `shows` tables.

use chrono::NaiveDateTime;
use sqlx::FromRow;

use crate::domain::{Artist, ArtistId, Show, ShowId, Venue, VenueId};

/// A row from the `venues` table.
#[derive(Debug, Clone, FromRow)]
pub struct VenueRow {
    /// `BIGSERIAL` primary key.
    pub id: i64,
    /// Venue name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State code.
    pub state: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Website.
    pub website: Option<String>,
    /// Picture URL.
    pub image_link: Option<String>,
    /// Facebook page URL.
    pub facebook_link: Option<String>,
    /// `TEXT[]` of genre names.
    pub genres: Vec<String>,
    /// Looking for performers.
    pub seeking_talent: bool,
    /// What the venue is looking for.
    pub seeking_description: Option<String>,
}

/// A row from the `artists` table.
#[derive(Debug, Clone, FromRow)]
pub struct ArtistRow {
    /// `BIGSERIAL` primary key.
    pub id: i64,
    /// Artist name.
    pub name: String,
    /// Home city.
    pub city: String,
    /// Home state code.
    pub state: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// `TEXT[]` of genre names.
    pub genres: Vec<String>,
    /// Picture URL.
    pub image_link: Option<String>,
    /// Facebook page URL.
    pub facebook_link: Option<String>,
}

/// A row from the `shows` table.
#[derive(Debug, Clone, FromRow)]
pub struct ShowRow {
    /// `BIGSERIAL` primary key.
    pub id: i64,
    /// Foreign key into `artists`.
    pub artist_id: i64,
    /// Foreign key into `venues`.
    pub venue_id: i64,
    /// `TIMESTAMP WITHOUT TIME ZONE`.
    pub start_time: NaiveDateTime,
}

impl From<VenueRow> for Venue {
    fn from(row: VenueRow) -> Self {
        Self {
            id: VenueId::new(row.id),
            name: row.name,
            address: row.address,
            city: row.city,
            state: row.state,
            phone: row.phone,
            website: row.website,
            image_link: row.image_link,
            facebook_link: row.facebook_link,
            genres: row.genres,
            seeking_talent: row.seeking_talent,
            seeking_description: row.seeking_description,
        }
    }
}

impl From<ArtistRow> for Artist {
    fn from(row: ArtistRow) -> Self {
        Self {
            id: ArtistId::new(row.id),
            name: row.name,
            city: row.city,
            state: row.state,
            phone: row.phone,
            genres: row.genres,
            image_link: row.image_link,
            facebook_link: row.facebook_link,
        }
    }
}

impl From<ShowRow> for Show {
    fn from(row: ShowRow) -> Self {
        Self {
            id: ShowId::new(row.id),
            artist_id: ArtistId::new(row.artist_id),
            venue_id: VenueId::new(row.venue_id),
            start_time: row.start_time,
        }
    }
}
