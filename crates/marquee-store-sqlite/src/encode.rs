//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings (`...Z`, whole
//! seconds) so lexical comparison in SQL matches chronological order. Genre
//! lists are stored as compact JSON.

use chrono::{DateTime, SecondsFormat, Utc};
use marquee_core::{
  artist::Artist,
  show::{Show, ShowListing},
  venue::Venue,
};

use crate::{Error, Result};

// ─── Timestamps ──────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Secs, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Genres ──────────────────────────────────────────────────────────────────

pub fn encode_genres(genres: &[String]) -> Result<String> { Ok(serde_json::to_string(genres)?) }

pub fn decode_genres(s: &str) -> Result<Vec<String>> { Ok(serde_json::from_str(s)?) }

// ─── Search ──────────────────────────────────────────────────────────────────

/// `%term%` with LIKE wildcards in `term` escaped by `\`.
pub fn like_pattern(term: &str) -> String {
  let escaped = term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
  format!("%{escaped}%")
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, image_link, \
   facebook_link, seeking_talent, seeking_description, genres, website";

/// Raw values read directly from a `venues` row.
pub struct RawVenue {
  pub id:                  i64,
  pub name:                String,
  pub city:                String,
  pub state:               String,
  pub address:             String,
  pub phone:               String,
  pub image_link:          String,
  pub facebook_link:       String,
  pub seeking_talent:      bool,
  pub seeking_description: Option<String>,
  pub genres:              String,
  pub website:             Option<String>,
}

impl RawVenue {
  /// Map a row selected with [`VENUE_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                  row.get(0)?,
      name:                row.get(1)?,
      city:                row.get(2)?,
      state:               row.get(3)?,
      address:             row.get(4)?,
      phone:               row.get(5)?,
      image_link:          row.get(6)?,
      facebook_link:       row.get(7)?,
      seeking_talent:      row.get(8)?,
      seeking_description: row.get(9)?,
      genres:              row.get(10)?,
      website:             row.get(11)?,
    })
  }

  pub fn into_venue(self) -> Result<Venue> {
    Ok(Venue {
      id:                  self.id,
      name:                self.name,
      city:                self.city,
      state:               self.state,
      address:             self.address,
      phone:               self.phone,
      image_link:          self.image_link,
      facebook_link:       self.facebook_link,
      seeking_talent:      self.seeking_talent,
      seeking_description: self.seeking_description,
      genres:              decode_genres(&self.genres)?,
      website:             self.website,
    })
  }
}

pub const ARTIST_COLUMNS: &str = "id, name, city, state, phone, image_link, facebook_link, \
   genres, seeking_venue, seeking_description, website";

/// Raw values read directly from an `artists` row.
pub struct RawArtist {
  pub id:                  i64,
  pub name:                String,
  pub city:                String,
  pub state:               String,
  pub phone:               String,
  pub image_link:          String,
  pub facebook_link:       String,
  pub genres:              String,
  pub seeking_venue:       bool,
  pub seeking_description: Option<String>,
  pub website:             Option<String>,
}

impl RawArtist {
  /// Map a row selected with [`ARTIST_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                  row.get(0)?,
      name:                row.get(1)?,
      city:                row.get(2)?,
      state:               row.get(3)?,
      phone:               row.get(4)?,
      image_link:          row.get(5)?,
      facebook_link:       row.get(6)?,
      genres:              row.get(7)?,
      seeking_venue:       row.get(8)?,
      seeking_description: row.get(9)?,
      website:             row.get(10)?,
    })
  }

  pub fn into_artist(self) -> Result<Artist> {
    Ok(Artist {
      id:                  self.id,
      name:                self.name,
      city:                self.city,
      state:               self.state,
      phone:               self.phone,
      image_link:          self.image_link,
      facebook_link:       self.facebook_link,
      genres:              decode_genres(&self.genres)?,
      seeking_venue:       self.seeking_venue,
      seeking_description: self.seeking_description,
      website:             self.website,
    })
  }
}

pub const SHOW_COLUMNS: &str = "id, venue_id, artist_id, start_time";

/// Raw values read directly from a `shows` row.
pub struct RawShow {
  pub id:         i64,
  pub venue_id:   i64,
  pub artist_id:  i64,
  pub start_time: String,
}

impl RawShow {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      venue_id:   row.get(1)?,
      artist_id:  row.get(2)?,
      start_time: row.get(3)?,
    })
  }

  pub fn into_show(self) -> Result<Show> {
    Ok(Show {
      id:         self.id,
      venue_id:   self.venue_id,
      artist_id:  self.artist_id,
      start_time: decode_dt(&self.start_time)?,
    })
  }
}

/// A `shows` row joined with venue and artist names.
pub struct RawShowListing {
  pub show_id:           i64,
  pub venue_id:          i64,
  pub venue_name:        String,
  pub artist_id:         i64,
  pub artist_name:       String,
  pub artist_image_link: String,
  pub start_time:        String,
}

impl RawShowListing {
  pub fn into_listing(self) -> Result<ShowListing> {
    Ok(ShowListing {
      show_id:           self.show_id,
      venue_id:          self.venue_id,
      venue_name:        self.venue_name,
      artist_id:         self.artist_id,
      artist_name:       self.artist_name,
      artist_image_link: self.artist_image_link,
      start_time:        decode_dt(&self.start_time)?,
    })
  }
}
