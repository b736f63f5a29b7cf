//! SQL schema for the Marquee SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- AUTOINCREMENT keeps ids monotonic so 'most recent' is 'highest id'.
CREATE TABLE IF NOT EXISTS venues (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    name                TEXT    NOT NULL,
    city                TEXT    NOT NULL,
    state               TEXT    NOT NULL,
    address             TEXT    NOT NULL,
    phone               TEXT    NOT NULL,
    image_link          TEXT    NOT NULL,
    facebook_link       TEXT    NOT NULL,
    seeking_talent      INTEGER NOT NULL DEFAULT 0,
    seeking_description TEXT,
    genres              TEXT    NOT NULL DEFAULT '[]',   -- JSON array
    website             TEXT
);

CREATE TABLE IF NOT EXISTS artists (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    name                TEXT    NOT NULL,
    city                TEXT    NOT NULL,
    state               TEXT    NOT NULL,
    phone               TEXT    NOT NULL,
    image_link          TEXT    NOT NULL,
    facebook_link       TEXT    NOT NULL,
    genres              TEXT    NOT NULL DEFAULT '[]',   -- JSON array
    seeking_venue       INTEGER NOT NULL DEFAULT 0,
    seeking_description TEXT,
    website             TEXT
);

CREATE TABLE IF NOT EXISTS shows (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    venue_id   INTEGER NOT NULL REFERENCES venues(id)  ON DELETE CASCADE,
    artist_id  INTEGER NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
    start_time TEXT    NOT NULL   -- RFC 3339 UTC, whole seconds
);

CREATE INDEX IF NOT EXISTS shows_venue_idx  ON shows(venue_id);
CREATE INDEX IF NOT EXISTS shows_artist_idx ON shows(artist_id);
CREATE INDEX IF NOT EXISTS venues_location_idx ON venues(city, state);

PRAGMA user_version = 1;
";
