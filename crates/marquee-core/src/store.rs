//! The `BookingStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `marquee-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  Classify,
  artist::{Artist, NewArtist},
  show::{NewShow, Role, Show, ShowListing},
  venue::{EntityRef, Location, NewVenue, Venue},
};

/// Abstraction over the durable entity store.
///
/// Lookups of a single record return `Ok(None)` when the record does not
/// exist; `Err` is reserved for store failures, which classify into
/// [`crate::ErrorKind`]. Each write is committed atomically or not at all.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait BookingStore: Send + Sync {
  type Error: std::error::Error + Classify + Send + Sync + 'static;

  // ── Venues ────────────────────────────────────────────────────────────

  fn create_venue(
    &self,
    input: NewVenue,
  ) -> impl Future<Output = Result<Venue, Self::Error>> + Send + '_;

  fn get_venue(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Venue>, Self::Error>> + Send + '_;

  /// All venues in insertion order.
  fn list_venues(&self) -> impl Future<Output = Result<Vec<Venue>, Self::Error>> + Send + '_;

  /// The `limit` most recently created venues, newest first.
  fn recent_venues(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Venue>, Self::Error>> + Send + '_;

  /// Distinct (city, state) pairs in order of first insertion.
  fn venue_locations(
    &self,
  ) -> impl Future<Output = Result<Vec<Location>, Self::Error>> + Send + '_;

  /// Case-insensitive substring match on the venue name.
  fn search_venues<'a>(
    &'a self,
    term: &'a str,
  ) -> impl Future<Output = Result<Vec<EntityRef>, Self::Error>> + Send + 'a;

  /// Overwrite every editable field. Returns `None` if the venue is missing.
  fn update_venue(
    &self,
    id: i64,
    input: NewVenue,
  ) -> impl Future<Output = Result<Option<Venue>, Self::Error>> + Send + '_;

  /// Delete a venue and all of its shows. Returns `false` if the venue was
  /// missing.
  fn delete_venue(&self, id: i64) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn venue_genres(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Vec<String>>, Self::Error>> + Send + '_;

  // ── Artists ───────────────────────────────────────────────────────────

  fn create_artist(
    &self,
    input: NewArtist,
  ) -> impl Future<Output = Result<Artist, Self::Error>> + Send + '_;

  fn get_artist(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Artist>, Self::Error>> + Send + '_;

  /// All artists in insertion order.
  fn list_artists(&self) -> impl Future<Output = Result<Vec<Artist>, Self::Error>> + Send + '_;

  /// The `limit` most recently created artists, newest first.
  fn recent_artists(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Artist>, Self::Error>> + Send + '_;

  fn search_artists<'a>(
    &'a self,
    term: &'a str,
  ) -> impl Future<Output = Result<Vec<EntityRef>, Self::Error>> + Send + 'a;

  fn update_artist(
    &self,
    id: i64,
    input: NewArtist,
  ) -> impl Future<Output = Result<Option<Artist>, Self::Error>> + Send + '_;

  fn artist_genres(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Vec<String>>, Self::Error>> + Send + '_;

  // ── Shows ─────────────────────────────────────────────────────────────

  /// Persist a show. Fails with a write conflict if either foreign key does
  /// not reference an existing row.
  fn create_show(
    &self,
    input: NewShow,
  ) -> impl Future<Output = Result<Show, Self::Error>> + Send + '_;

  fn get_show(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Show>, Self::Error>> + Send + '_;

  /// Every show joined with its venue and artist, in insertion order.
  fn list_shows(
    &self,
  ) -> impl Future<Output = Result<Vec<ShowListing>, Self::Error>> + Send + '_;

  /// Shows owned by the entity `id` of `role`, in insertion order.
  fn shows_for(
    &self,
    role: Role,
    id: i64,
  ) -> impl Future<Output = Result<Vec<Show>, Self::Error>> + Send + '_;

  /// Number of shows owned by `id` in `role` starting strictly after
  /// `reference`. See [`crate::counter`].
  fn count_upcoming(
    &self,
    role: Role,
    id: i64,
    reference: DateTime<Utc>,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
