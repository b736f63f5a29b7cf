//! Handlers for `/shows` endpoints.
//!
//! | Method | Path            | Notes |
//! |--------|-----------------|-------|
//! | `GET`  | `/shows`        | Every show with venue and artist names |
//! | `GET`  | `/shows/create` | Blank form plus venue/artist choices |
//! | `POST` | `/shows/create` | Body: [`ShowForm`] |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use marquee_core::{
  artist::Artist,
  form::ShowForm,
  format::format_plain,
  show::ShowListing,
  store::BookingStore,
  venue::{EntityRef, Venue},
};
use serde::Serialize;

use crate::{AppState, error::ApiError, flash::Flashed};

const CREATE_FAILED: &str = "An error occurred. Show could not be listed.";

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowRow {
  pub venue_id:          i64,
  pub venue_name:        String,
  pub artist_id:         i64,
  pub artist_name:       String,
  pub artist_image_link: String,
  pub start_time:        String,
}

impl From<ShowListing> for ShowRow {
  fn from(l: ShowListing) -> Self {
    Self {
      venue_id:          l.venue_id,
      venue_name:        l.venue_name,
      artist_id:         l.artist_id,
      artist_name:       l.artist_name,
      artist_image_link: l.artist_image_link,
      start_time:        format_plain(l.start_time),
    }
  }
}

/// `GET /shows`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<ShowRow>>, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  let listings = state
    .store
    .list_shows()
    .await
    .map_err(|e| ApiError::store(e, "An error occurred. Shows could not be listed."))?;
  Ok(Json(listings.into_iter().map(ShowRow::from).collect()))
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ShowFormPage {
  pub form:    ShowForm,
  pub venues:  Vec<EntityRef>,
  pub artists: Vec<EntityRef>,
}

/// `GET /shows/create`
pub async fn create_form<S>(State(state): State<AppState<S>>) -> Result<Json<ShowFormPage>, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  const MESSAGE: &str = "An error occurred. The show form could not be loaded.";

  let venues = state
    .store
    .list_venues()
    .await
    .map_err(|e| ApiError::store(e, MESSAGE))?;
  let artists = state
    .store
    .list_artists()
    .await
    .map_err(|e| ApiError::store(e, MESSAGE))?;

  Ok(Json(ShowFormPage {
    form:    ShowForm::starting_at(state.clock.now()),
    venues:  venues.iter().map(Venue::to_ref).collect(),
    artists: artists.iter().map(Artist::to_ref).collect(),
  }))
}

/// `POST /shows/create`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(form): Json<ShowForm>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  let input = form
    .validate()
    .map_err(|errors| ApiError::validation(CREATE_FAILED, errors))?;

  let show = state
    .store
    .create_show(input)
    .await
    .map_err(|e| ApiError::store(e, CREATE_FAILED))?;

  tracing::info!(show_id = show.id, venue_id = show.venue_id, artist_id = show.artist_id, "show listed");
  Ok((StatusCode::CREATED, Json(Flashed::info(show, "Show was successfully listed!"))))
}
