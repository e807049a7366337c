//! PostgreSQL implementation of the record store.
//!
//! Single-table reads go straight to the pool. Reads that join shows with
//! venues and artists run in one `REPEATABLE READ` transaction so every
//! query sees the same snapshot. Each mutation opens a transaction, runs
//! one statement, and commits; an early return drops the transaction,
//! which rolls it back.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};

use super::models::{ArtistRow, ShowRow, VenueRow};
use super::{Lineup, RecordStore, ShowIndex};
use crate::config::FyyurConfig;
use crate::domain::{Artist, ArtistDraft, ArtistId, Show, ShowDraft, Venue, VenueDraft, VenueId};
use crate::error::{EntityKind, FyyurError};

/// Foreign key from `shows.artist_id` to `artists.id`.
const SHOW_ARTIST_FK: &str = "shows_artist_id_fkey";

/// Foreign key from `shows.venue_id` to `venues.id`.
const SHOW_VENUE_FK: &str = "shows_venue_id_fkey";

macro_rules! venue_columns {
    () => {
        "id, name, address, city, state, phone, website, image_link, facebook_link, genres, \
         seeking_talent, seeking_description"
    };
}

macro_rules! artist_columns {
    () => {
        "id, name, city, state, phone, genres, image_link, facebook_link"
    };
}

macro_rules! show_columns {
    () => {
        "id, artist_id, venue_id, start_time"
    };
}

/// PostgreSQL-backed record store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized by the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`FyyurError::PersistenceFailure`] when the database is
    /// unreachable.
    pub async fn connect(config: &FyyurConfig) -> Result<Self, FyyurError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(config.database_connect_timeout())
            .connect(&config.database_url)
            .await
            .map_err(persistence)?;
        Ok(Self::new(pool))
    }

    /// Applies pending migrations from `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns a [`FyyurError::PersistenceFailure`] when a migration fails.
    pub async fn run_migrations(&self) -> Result<(), FyyurError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| FyyurError::PersistenceFailure(e.to_string()))?;
        tracing::info!("database migrations applied");
        Ok(())
    }

    /// Opens a read-only transaction whose queries all see one snapshot.
    async fn begin_snapshot(&self) -> Result<Transaction<'static, Postgres>, FyyurError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(persistence)?;
        Ok(tx)
    }
}

/// Logs and wraps a database error.
fn persistence(err: sqlx::Error) -> FyyurError {
    tracing::error!(error = %err, "database operation failed");
    FyyurError::PersistenceFailure(err.to_string())
}

/// Builds an `ILIKE` pattern matching `term` anywhere, with `%`, `_`, and
/// `\` in the term taken literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Maps a foreign key rejected by a show insert to the missing side.
///
/// Returns `None` for constraints other than the two show references.
fn unknown_reference(constraint: Option<&str>, draft: &ShowDraft) -> Option<FyyurError> {
    let message = match constraint? {
        SHOW_ARTIST_FK => format!("unknown artist {}", draft.artist_id),
        SHOW_VENUE_FK => format!("unknown venue {}", draft.venue_id),
        _ => return None,
    };
    Some(FyyurError::invalid(message))
}

#[async_trait]
impl RecordStore for PostgresStore {
    async fn list_venues(&self) -> Result<Vec<Venue>, FyyurError> {
        let rows = sqlx::query_as::<_, VenueRow>(concat!(
            "SELECT ",
            venue_columns!(),
            " FROM venues ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(persistence)?;
        Ok(rows.into_iter().map(Venue::from).collect())
    }

    async fn find_venue(&self, id: VenueId) -> Result<Venue, FyyurError> {
        sqlx::query_as::<_, VenueRow>(concat!(
            "SELECT ",
            venue_columns!(),
            " FROM venues WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence)?
        .map(Venue::from)
        .ok_or(FyyurError::NotFound {
            kind: EntityKind::Venue,
            id: id.get(),
        })
    }

    async fn search_venues(&self, term: &str) -> Result<Vec<Venue>, FyyurError> {
        let rows = sqlx::query_as::<_, VenueRow>(concat!(
            "SELECT ",
            venue_columns!(),
            " FROM venues WHERE name ILIKE $1 ORDER BY id"
        ))
        .bind(contains_pattern(term))
        .fetch_all(&self.pool)
        .await
        .map_err(persistence)?;
        Ok(rows.into_iter().map(Venue::from).collect())
    }

    async fn create_venue(&self, draft: VenueDraft) -> Result<Venue, FyyurError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;
        let row = sqlx::query_as::<_, VenueRow>(concat!(
            "INSERT INTO venues (name, address, city, state, phone, website, image_link, \
             facebook_link, genres, seeking_talent, seeking_description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING ",
            venue_columns!()
        ))
        .bind(&draft.name)
        .bind(&draft.address)
        .bind(&draft.city)
        .bind(&draft.state)
        .bind(&draft.phone)
        .bind(&draft.website)
        .bind(&draft.image_link)
        .bind(&draft.facebook_link)
        .bind(draft.genres.as_slice())
        .bind(draft.seeking_talent)
        .bind(&draft.seeking_description)
        .fetch_one(&mut *tx)
        .await
        .map_err(persistence)?;
        tx.commit().await.map_err(persistence)?;
        Ok(row.into())
    }

    async fn update_venue(&self, id: VenueId, draft: VenueDraft) -> Result<Venue, FyyurError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;
        let row = sqlx::query_as::<_, VenueRow>(concat!(
            "UPDATE venues SET name = $2, address = $3, city = $4, state = $5, phone = $6, \
             website = $7, image_link = $8, facebook_link = $9, genres = $10, \
             seeking_talent = $11, seeking_description = $12 WHERE id = $1 RETURNING ",
            venue_columns!()
        ))
        .bind(id.get())
        .bind(&draft.name)
        .bind(&draft.address)
        .bind(&draft.city)
        .bind(&draft.state)
        .bind(&draft.phone)
        .bind(&draft.website)
        .bind(&draft.image_link)
        .bind(&draft.facebook_link)
        .bind(draft.genres.as_slice())
        .bind(draft.seeking_talent)
        .bind(&draft.seeking_description)
        .fetch_optional(&mut *tx)
        .await
        .map_err(persistence)?
        .ok_or(FyyurError::NotFound {
            kind: EntityKind::Venue,
            id: id.get(),
        })?;
        tx.commit().await.map_err(persistence)?;
        Ok(row.into())
    }

    async fn delete_venue(&self, id: VenueId) -> Result<Venue, FyyurError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;
        let row = sqlx::query_as::<_, VenueRow>(concat!(
            "DELETE FROM venues WHERE id = $1 RETURNING ",
            venue_columns!()
        ))
        .bind(id.get())
        .fetch_optional(&mut *tx)
        .await
        .map_err(persistence)?
        .ok_or(FyyurError::NotFound {
            kind: EntityKind::Venue,
            id: id.get(),
        })?;
        tx.commit().await.map_err(persistence)?;
        Ok(row.into())
    }

    async fn list_artists(&self) -> Result<Vec<Artist>, FyyurError> {
        let rows = sqlx::query_as::<_, ArtistRow>(concat!(
            "SELECT ",
            artist_columns!(),
            " FROM artists ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(persistence)?;
        Ok(rows.into_iter().map(Artist::from).collect())
    }

    async fn find_artist(&self, id: ArtistId) -> Result<Artist, FyyurError> {
        sqlx::query_as::<_, ArtistRow>(concat!(
            "SELECT ",
            artist_columns!(),
            " FROM artists WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence)?
        .map(Artist::from)
        .ok_or(FyyurError::NotFound {
            kind: EntityKind::Artist,
            id: id.get(),
        })
    }

    async fn search_artists(&self, term: &str) -> Result<Vec<Artist>, FyyurError> {
        let rows = sqlx::query_as::<_, ArtistRow>(concat!(
            "SELECT ",
            artist_columns!(),
            " FROM artists WHERE name ILIKE $1 ORDER BY id"
        ))
        .bind(contains_pattern(term))
        .fetch_all(&self.pool)
        .await
        .map_err(persistence)?;
        Ok(rows.into_iter().map(Artist::from).collect())
    }

    async fn create_artist(&self, draft: ArtistDraft) -> Result<Artist, FyyurError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;
        let row = sqlx::query_as::<_, ArtistRow>(concat!(
            "INSERT INTO artists (name, city, state, phone, genres, image_link, facebook_link) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING ",
            artist_columns!()
        ))
        .bind(&draft.name)
        .bind(&draft.city)
        .bind(&draft.state)
        .bind(&draft.phone)
        .bind(draft.genres.as_slice())
        .bind(&draft.image_link)
        .bind(&draft.facebook_link)
        .fetch_one(&mut *tx)
        .await
        .map_err(persistence)?;
        tx.commit().await.map_err(persistence)?;
        Ok(row.into())
    }

    async fn update_artist(&self, id: ArtistId, draft: ArtistDraft) -> Result<Artist, FyyurError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;
        let row = sqlx::query_as::<_, ArtistRow>(concat!(
            "UPDATE artists SET name = $2, city = $3, state = $4, phone = $5, genres = $6, \
             image_link = $7, facebook_link = $8 WHERE id = $1 RETURNING ",
            artist_columns!()
        ))
        .bind(id.get())
        .bind(&draft.name)
        .bind(&draft.city)
        .bind(&draft.state)
        .bind(&draft.phone)
        .bind(draft.genres.as_slice())
        .bind(&draft.image_link)
        .bind(&draft.facebook_link)
        .fetch_optional(&mut *tx)
        .await
        .map_err(persistence)?
        .ok_or(FyyurError::NotFound {
            kind: EntityKind::Artist,
            id: id.get(),
        })?;
        tx.commit().await.map_err(persistence)?;
        Ok(row.into())
    }

    async fn delete_artist(&self, id: ArtistId) -> Result<Artist, FyyurError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;
        let row = sqlx::query_as::<_, ArtistRow>(concat!(
            "DELETE FROM artists WHERE id = $1 RETURNING ",
            artist_columns!()
        ))
        .bind(id.get())
        .fetch_optional(&mut *tx)
        .await
        .map_err(persistence)?
        .ok_or(FyyurError::NotFound {
            kind: EntityKind::Artist,
            id: id.get(),
        })?;
        tx.commit().await.map_err(persistence)?;
        Ok(row.into())
    }

    async fn list_shows(&self) -> Result<Vec<Show>, FyyurError> {
        let rows = sqlx::query_as::<_, ShowRow>(concat!(
            "SELECT ",
            show_columns!(),
            " FROM shows ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(persistence)?;
        Ok(rows.into_iter().map(Show::from).collect())
    }

    async fn venue_lineup(&self, id: VenueId) -> Result<Lineup<Venue, Artist>, FyyurError> {
        let mut tx = self.begin_snapshot().await?;
        let record = sqlx::query_as::<_, VenueRow>(concat!(
            "SELECT ",
            venue_columns!(),
            " FROM venues WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&mut *tx)
        .await
        .map_err(persistence)?
        .ok_or(FyyurError::NotFound {
            kind: EntityKind::Venue,
            id: id.get(),
        })?;
        let shows = sqlx::query_as::<_, ShowRow>(concat!(
            "SELECT ",
            show_columns!(),
            " FROM shows WHERE venue_id = $1 ORDER BY id"
        ))
        .bind(id.get())
        .fetch_all(&mut *tx)
        .await
        .map_err(persistence)?;
        let artists = sqlx::query_as::<_, ArtistRow>(concat!(
            "SELECT ",
            artist_columns!(),
            " FROM artists WHERE id IN (SELECT artist_id FROM shows WHERE venue_id = $1) \
             ORDER BY id"
        ))
        .bind(id.get())
        .fetch_all(&mut *tx)
        .await
        .map_err(persistence)?;
        tx.commit().await.map_err(persistence)?;
        Ok(Lineup {
            record: record.into(),
            shows: shows.into_iter().map(Show::from).collect(),
            counterparts: artists.into_iter().map(Artist::from).collect(),
        })
    }

    async fn artist_lineup(&self, id: ArtistId) -> Result<Lineup<Artist, Venue>, FyyurError> {
        let mut tx = self.begin_snapshot().await?;
        let record = sqlx::query_as::<_, ArtistRow>(concat!(
            "SELECT ",
            artist_columns!(),
            " FROM artists WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&mut *tx)
        .await
        .map_err(persistence)?
        .ok_or(FyyurError::NotFound {
            kind: EntityKind::Artist,
            id: id.get(),
        })?;
        let shows = sqlx::query_as::<_, ShowRow>(concat!(
            "SELECT ",
            show_columns!(),
            " FROM shows WHERE artist_id = $1 ORDER BY id"
        ))
        .bind(id.get())
        .fetch_all(&mut *tx)
        .await
        .map_err(persistence)?;
        let venues = sqlx::query_as::<_, VenueRow>(concat!(
            "SELECT ",
            venue_columns!(),
            " FROM venues WHERE id IN (SELECT venue_id FROM shows WHERE artist_id = $1) \
             ORDER BY id"
        ))
        .bind(id.get())
        .fetch_all(&mut *tx)
        .await
        .map_err(persistence)?;
        tx.commit().await.map_err(persistence)?;
        Ok(Lineup {
            record: record.into(),
            shows: shows.into_iter().map(Show::from).collect(),
            counterparts: venues.into_iter().map(Venue::from).collect(),
        })
    }

    async fn show_index(&self) -> Result<ShowIndex, FyyurError> {
        let mut tx = self.begin_snapshot().await?;
        let shows = sqlx::query_as::<_, ShowRow>(concat!(
            "SELECT ",
            show_columns!(),
            " FROM shows ORDER BY id"
        ))
        .fetch_all(&mut *tx)
        .await
        .map_err(persistence)?;
        let artists = sqlx::query_as::<_, ArtistRow>(concat!(
            "SELECT ",
            artist_columns!(),
            " FROM artists ORDER BY id"
        ))
        .fetch_all(&mut *tx)
        .await
        .map_err(persistence)?;
        let venues = sqlx::query_as::<_, VenueRow>(concat!(
            "SELECT ",
            venue_columns!(),
            " FROM venues ORDER BY id"
        ))
        .fetch_all(&mut *tx)
        .await
        .map_err(persistence)?;
        tx.commit().await.map_err(persistence)?;
        Ok(ShowIndex {
            shows: shows.into_iter().map(Show::from).collect(),
            artists: artists.into_iter().map(Artist::from).collect(),
            venues: venues.into_iter().map(Venue::from).collect(),
        })
    }

    async fn create_show(&self, draft: ShowDraft) -> Result<Show, FyyurError> {
        let mut tx = self.pool.begin().await.map_err(persistence)?;
        let row = sqlx::query_as::<_, ShowRow>(concat!(
            "INSERT INTO shows (artist_id, venue_id, start_time) VALUES ($1, $2, $3) RETURNING ",
            show_columns!()
        ))
        .bind(draft.artist_id.get())
        .bind(draft.venue_id.get())
        .bind(draft.start_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e
                && db.is_foreign_key_violation()
                && let Some(err) = unknown_reference(db.constraint(), &draft)
            {
                return err;
            }
            persistence(e)
        })?;
        tx.commit().await.map_err(persistence)?;
        Ok(row.into())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    const MIGRATION: &str = include_str!("../../migrations/20240101000000_create_listings.sql");

    fn draft() -> ShowDraft {
        ShowDraft {
            artist_id: ArtistId::new(7),
            venue_id: VenueId::new(3),
            start_time: NaiveDateTime::default(),
        }
    }

    #[test]
    fn pattern_wraps_term() {
        assert_eq!(contains_pattern("hop"), "%hop%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("back\\slash"), "%back\\\\slash%");
    }

    #[test]
    fn artist_key_names_the_artist() {
        let err = unknown_reference(Some("shows_artist_id_fkey"), &draft());
        let Some(err) = err else {
            panic!("artist key not recognized");
        };
        assert_eq!(err.to_string(), "validation failed: unknown artist 7");
    }

    #[test]
    fn venue_key_names_the_venue() {
        let err = unknown_reference(Some("shows_venue_id_fkey"), &draft());
        let Some(err) = err else {
            panic!("venue key not recognized");
        };
        assert_eq!(err.to_string(), "validation failed: unknown venue 3");
    }

    #[test]
    fn other_constraints_are_not_references() {
        let lookalike = unknown_reference(Some("shows_artist_fkey_old"), &draft());
        assert!(lookalike.is_none());
        let unnamed = unknown_reference(None, &draft());
        assert!(unnamed.is_none());
    }

    #[test]
    fn key_names_match_the_schema() {
        let artist = format!("CONSTRAINT {SHOW_ARTIST_FK} FOREIGN KEY (artist_id)");
        let venue = format!("CONSTRAINT {SHOW_VENUE_FK} FOREIGN KEY (venue_id)");
        assert!(MIGRATION.contains(&artist));
        assert!(MIGRATION.contains(&venue));
    }
}
