//! [`SqliteStore`], the SQLite implementation of [`BookingStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension as _, functions::FunctionFlags};

use marquee_core::{
  artist::{Artist, NewArtist},
  show::{NewShow, Role, Show, ShowListing, whole_seconds},
  store::BookingStore,
  venue::{EntityRef, Location, NewVenue, Venue},
};

use crate::{
  Result,
  encode::{
    ARTIST_COLUMNS, RawArtist, RawShow, RawShowListing, RawVenue, SHOW_COLUMNS, VENUE_COLUMNS,
    decode_genres, encode_dt, encode_genres, like_pattern,
  },
  schema::SCHEMA,
};

/// Name of the `shows` column holding the foreign key for `role`.
fn owner_column(role: Role) -> &'static str {
  match role {
    Role::Venue => "venue_id",
    Role::Artist => "artist_id",
  }
}

/// Registers `fold(text)`, a Unicode lower-casing used for case-insensitive
/// name search. The built-in `LIKE` only folds ASCII letters.
fn register_fold(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    "fold",
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| Ok(ctx.get::<String>(0)?.to_lowercase()),
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A booking store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        register_fold(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn select_venues(&self, sql: String, limit: Option<i64>) -> Result<Vec<Venue>> {
    let raws: Vec<RawVenue> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = match limit {
          Some(n) => stmt.query_map(rusqlite::params![n], RawVenue::from_row)?,
          None => stmt.query_map([], RawVenue::from_row)?,
        }
        .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawVenue::into_venue).collect()
  }

  async fn select_artists(&self, sql: String, limit: Option<i64>) -> Result<Vec<Artist>> {
    let raws: Vec<RawArtist> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = match limit {
          Some(n) => stmt.query_map(rusqlite::params![n], RawArtist::from_row)?,
          None => stmt.query_map([], RawArtist::from_row)?,
        }
        .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawArtist::into_artist).collect()
  }

  /// Case-insensitive `LIKE` over `table.name`, folded with `fold`.
  async fn search_names(&self, table: &'static str, term: &str) -> Result<Vec<EntityRef>> {
    let pattern = like_pattern(term);

    let refs = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT id, name FROM {table} WHERE fold(name) LIKE fold(?1) ESCAPE '\\' ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![pattern], |row| {
            Ok(EntityRef { id: row.get(0)?, name: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(refs)
  }

  async fn genres_of(&self, table: &'static str, id: i64) -> Result<Option<Vec<String>>> {
    let raw: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT genres FROM {table} WHERE id = ?1"),
              rusqlite::params![id],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    raw.as_deref().map(decode_genres).transpose()
  }
}

// ─── BookingStore impl ───────────────────────────────────────────────────────

impl BookingStore for SqliteStore {
  type Error = crate::Error;

  // ── Venues ────────────────────────────────────────────────────────────────

  async fn create_venue(&self, input: NewVenue) -> Result<Venue> {
    let genres_str = encode_genres(&input.genres)?;
    let row = input.clone();

    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO venues (
             name, city, state, address, phone, image_link, facebook_link,
             seeking_talent, seeking_description, genres, website
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            row.name,
            row.city,
            row.state,
            row.address,
            row.phone,
            row.image_link,
            row.facebook_link,
            row.seeking_talent,
            row.seeking_description,
            genres_str,
            row.website,
          ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
      })
      .await?;

    Ok(input.into_venue(id))
  }

  async fn get_venue(&self, id: i64) -> Result<Option<Venue>> {
    let raw: Option<RawVenue> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = ?1"),
              rusqlite::params![id],
              RawVenue::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawVenue::into_venue).transpose()
  }

  async fn list_venues(&self) -> Result<Vec<Venue>> {
    self
      .select_venues(format!("SELECT {VENUE_COLUMNS} FROM venues ORDER BY id"), None)
      .await
  }

  async fn recent_venues(&self, limit: usize) -> Result<Vec<Venue>> {
    self
      .select_venues(
        format!("SELECT {VENUE_COLUMNS} FROM venues ORDER BY id DESC LIMIT ?1"),
        Some(limit as i64),
      )
      .await
  }

  async fn venue_locations(&self) -> Result<Vec<Location>> {
    let locations = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT city, state FROM venues
           GROUP BY city, state
           ORDER BY MIN(id)",
        )?;
        let rows = stmt
          .query_map([], |row| Ok(Location { city: row.get(0)?, state: row.get(1)? }))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(locations)
  }

  async fn search_venues(&self, term: &str) -> Result<Vec<EntityRef>> {
    self.search_names("venues", term).await
  }

  async fn update_venue(&self, id: i64, input: NewVenue) -> Result<Option<Venue>> {
    let genres_str = encode_genres(&input.genres)?;
    let row = input.clone();

    let changed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute(
          "UPDATE venues SET
             name = ?1, city = ?2, state = ?3, address = ?4, phone = ?5,
             image_link = ?6, facebook_link = ?7, seeking_talent = ?8,
             seeking_description = ?9, genres = ?10, website = ?11
           WHERE id = ?12",
          rusqlite::params![
            row.name,
            row.city,
            row.state,
            row.address,
            row.phone,
            row.image_link,
            row.facebook_link,
            row.seeking_talent,
            row.seeking_description,
            genres_str,
            row.website,
            id,
          ],
        )?;
        tx.commit()?;
        Ok(n)
      })
      .await?;

    Ok((changed > 0).then(|| input.into_venue(id)))
  }

  async fn delete_venue(&self, id: i64) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM shows WHERE venue_id = ?1", rusqlite::params![id])?;
        let n = tx.execute("DELETE FROM venues WHERE id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        Ok(n > 0)
      })
      .await?;
    Ok(deleted)
  }

  async fn venue_genres(&self, id: i64) -> Result<Option<Vec<String>>> {
    self.genres_of("venues", id).await
  }

  // ── Artists ───────────────────────────────────────────────────────────────

  async fn create_artist(&self, input: NewArtist) -> Result<Artist> {
    let genres_str = encode_genres(&input.genres)?;
    let row = input.clone();

    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO artists (
             name, city, state, phone, image_link, facebook_link,
             genres, seeking_venue, seeking_description, website
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            row.name,
            row.city,
            row.state,
            row.phone,
            row.image_link,
            row.facebook_link,
            genres_str,
            row.seeking_venue,
            row.seeking_description,
            row.website,
          ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
      })
      .await?;

    Ok(input.into_artist(id))
  }

  async fn get_artist(&self, id: i64) -> Result<Option<Artist>> {
    let raw: Option<RawArtist> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = ?1"),
              rusqlite::params![id],
              RawArtist::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawArtist::into_artist).transpose()
  }

  async fn list_artists(&self) -> Result<Vec<Artist>> {
    self
      .select_artists(format!("SELECT {ARTIST_COLUMNS} FROM artists ORDER BY id"), None)
      .await
  }

  async fn recent_artists(&self, limit: usize) -> Result<Vec<Artist>> {
    self
      .select_artists(
        format!("SELECT {ARTIST_COLUMNS} FROM artists ORDER BY id DESC LIMIT ?1"),
        Some(limit as i64),
      )
      .await
  }

  async fn search_artists(&self, term: &str) -> Result<Vec<EntityRef>> {
    self.search_names("artists", term).await
  }

  async fn update_artist(&self, id: i64, input: NewArtist) -> Result<Option<Artist>> {
    let genres_str = encode_genres(&input.genres)?;
    let row = input.clone();

    let changed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute(
          "UPDATE artists SET
             name = ?1, city = ?2, state = ?3, phone = ?4, image_link = ?5,
             facebook_link = ?6, genres = ?7, seeking_venue = ?8,
             seeking_description = ?9, website = ?10
           WHERE id = ?11",
          rusqlite::params![
            row.name,
            row.city,
            row.state,
            row.phone,
            row.image_link,
            row.facebook_link,
            genres_str,
            row.seeking_venue,
            row.seeking_description,
            row.website,
            id,
          ],
        )?;
        tx.commit()?;
        Ok(n)
      })
      .await?;

    Ok((changed > 0).then(|| input.into_artist(id)))
  }

  async fn artist_genres(&self, id: i64) -> Result<Option<Vec<String>>> {
    self.genres_of("artists", id).await
  }

  // ── Shows ─────────────────────────────────────────────────────────────────

  async fn create_show(&self, input: NewShow) -> Result<Show> {
    let start_time = whole_seconds(input.start_time);
    let start_str = encode_dt(start_time);
    let (venue_id, artist_id) = (input.venue_id, input.artist_id);

    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO shows (venue_id, artist_id, start_time) VALUES (?1, ?2, ?3)",
          rusqlite::params![venue_id, artist_id, start_str],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
      })
      .await?;

    Ok(Show { id, venue_id, artist_id, start_time })
  }

  async fn get_show(&self, id: i64) -> Result<Option<Show>> {
    let raw: Option<RawShow> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {SHOW_COLUMNS} FROM shows WHERE id = ?1"),
              rusqlite::params![id],
              RawShow::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawShow::into_show).transpose()
  }

  async fn list_shows(&self) -> Result<Vec<ShowListing>> {
    let raws: Vec<RawShowListing> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT s.id, v.id, v.name, a.id, a.name, a.image_link, s.start_time
           FROM shows s
           JOIN venues  v ON v.id = s.venue_id
           JOIN artists a ON a.id = s.artist_id
           ORDER BY s.id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawShowListing {
              show_id:           row.get(0)?,
              venue_id:          row.get(1)?,
              venue_name:        row.get(2)?,
              artist_id:         row.get(3)?,
              artist_name:       row.get(4)?,
              artist_image_link: row.get(5)?,
              start_time:        row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawShowListing::into_listing).collect()
  }

  async fn shows_for(&self, role: Role, id: i64) -> Result<Vec<Show>> {
    let column = owner_column(role);

    let raws: Vec<RawShow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SHOW_COLUMNS} FROM shows WHERE {column} = ?1 ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![id], RawShow::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawShow::into_show).collect()
  }

  async fn count_upcoming(
    &self,
    role: Role,
    id: i64,
    reference: DateTime<Utc>,
  ) -> Result<u64> {
    let column = owner_column(role);
    let reference_str = encode_dt(whole_seconds(reference));

    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!("SELECT COUNT(*) FROM shows WHERE {column} = ?1 AND start_time > ?2"),
          rusqlite::params![id, reference_str],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(count as u64)
  }
}
