//! Handlers for `/venues` endpoints.
//!
//! | Method   | Path                      | Notes |
//! |----------|---------------------------|-------|
//! | `GET`    | `/venues`                 | Areas with upcoming counts |
//! | `POST`   | `/venues/search`          | Form field `search_term` |
//! | `GET`    | `/venues/{id}`            | 404 if not found |
//! | `DELETE` | `/venues/{id}`            | Cascades to shows |
//! | `GET`    | `/venues/create`          | Blank form |
//! | `POST`   | `/venues/create`          | Body: [`VenueForm`] |
//! | `GET`    | `/venues/{id}/edit`       | Prefilled form |
//! | `POST`   | `/venues/{id}/edit`       | Full overwrite |
//! | `POST`   | `/get_venue_genres/{id}`  | `{"venue_genres": [...]}` |

use std::collections::HashMap;

use axum::{
  Form, Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use marquee_core::{
  directory::{Area, group_by_location},
  form::VenueForm,
  partition::Projection,
  show::Role,
  store::BookingStore,
  venue::Venue,
};
use serde::Serialize;

use crate::{
  AppState,
  error::ApiError,
  flash::Flashed,
  lookup::partitioned_shows,
  pages::{Deleted, FormPage},
  search::{SearchForm, SearchResults, with_counts},
};

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueRow {
  pub id:                 i64,
  pub name:               String,
  pub num_upcoming_shows: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VenuesPage {
  pub areas: Vec<Area<VenueRow>>,
}

/// `GET /venues`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Json<VenuesPage>, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  const MESSAGE: &str = "Due to an error from our end. We are unable to show you the venues page";

  let now = state.clock.now();
  let areas = state
    .store
    .venue_locations()
    .await
    .map_err(|e| ApiError::store(e, MESSAGE))?;
  let venues = state
    .store
    .list_venues()
    .await
    .map_err(|e| ApiError::store(e, MESSAGE))?;

  let mut counts = HashMap::with_capacity(venues.len());
  for venue in &venues {
    let n = state
      .store
      .count_upcoming(Role::Venue, venue.id, now)
      .await
      .map_err(|e| ApiError::store(e, MESSAGE))?;
    counts.insert(venue.id, n);
  }

  let areas = group_by_location(&areas, &venues, &state.settings.location_policy, |v| VenueRow {
    id:                 v.id,
    name:               v.name.clone(),
    num_upcoming_shows: counts.get(&v.id).copied().unwrap_or_default(),
  });

  Ok(Json(VenuesPage { areas }))
}

// ─── Search ──────────────────────────────────────────────────────────────────

/// `POST /venues/search`
pub async fn search<S>(
  State(state): State<AppState<S>>,
  Form(form): Form<SearchForm>,
) -> Result<Json<SearchResults>, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  let now = state.clock.now();
  let hits = state
    .store
    .search_venues(&form.search_term)
    .await
    .map_err(|e| ApiError::store(e, "An error occurred. Search could not be completed."))?;
  let results = with_counts(state.store.as_ref(), Role::Venue, hits, now, form.search_term).await?;
  Ok(Json(results))
}

// ─── Detail ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
  #[serde(flatten)]
  pub venue:                Venue,
  pub past_shows:           Vec<Projection>,
  pub upcoming_shows:       Vec<Projection>,
  pub past_shows_count:     usize,
  pub upcoming_shows_count: usize,
}

/// `GET /venues/{id}`
pub async fn detail<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<VenueDetail>, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  let message = format!("An error occurred. Venue {id} could not be shown.");
  let venue = state
    .store
    .get_venue(id)
    .await
    .map_err(|e| ApiError::store(e, message.as_str()))?
    .ok_or_else(|| ApiError::NotFound(format!("Venue {id} was not found.")))?;

  let shows = partitioned_shows(state.store.as_ref(), Role::Venue, id, state.clock.now(), &message).await?;

  Ok(Json(VenueDetail {
    venue,
    past_shows_count: shows.past.len(),
    upcoming_shows_count: shows.upcoming.len(),
    past_shows: shows.past,
    upcoming_shows: shows.upcoming,
  }))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `GET /venues/create`
pub async fn create_form() -> Json<FormPage<VenueForm>> { Json(FormPage::blank(VenueForm::default())) }

/// `POST /venues/create`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(form): Json<VenueForm>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  let message = format!("An error occurred. Venue {} could not be listed.", form.name);
  let input = form
    .validate()
    .map_err(|errors| ApiError::validation(message.as_str(), errors))?;

  let venue = state
    .store
    .create_venue(input)
    .await
    .map_err(|e| ApiError::store(e, message.as_str()))?;

  tracing::info!(venue_id = venue.id, "venue listed");
  let flash = format!("Venue {} was successfully listed!", venue.name);
  Ok((StatusCode::CREATED, Json(Flashed::info(venue, flash))))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /venues/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Flashed<Deleted>>, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  const MESSAGE: &str = "An error occurred. Venue could not be deleted.";

  let deleted = state
    .store
    .delete_venue(id)
    .await
    .map_err(|e| ApiError::store(e, MESSAGE))?;
  if !deleted {
    return Err(ApiError::NotFound(MESSAGE.to_string()));
  }

  tracing::info!(venue_id = id, "venue deleted");
  Ok(Json(Flashed::info(Deleted { id }, "Venue was successfully deleted!")))
}

// ─── Edit ────────────────────────────────────────────────────────────────────

/// `GET /venues/{id}/edit`
pub async fn edit_form<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<FormPage<VenueForm, Venue>>, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  let venue = state
    .store
    .get_venue(id)
    .await
    .map_err(|e| ApiError::store(e, format!("An error occurred. Venue {id} could not be loaded.")))?
    .ok_or_else(|| ApiError::NotFound(format!("Venue {id} was not found.")))?;

  Ok(Json(FormPage::edit(VenueForm::from(&venue), venue)))
}

/// `POST /venues/{id}/edit`
pub async fn edit<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(form): Json<VenueForm>,
) -> Result<Json<Flashed<Venue>>, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  let message = format!("An error occurred. Venue {} could not be edited.", form.name);
  let input = form
    .validate()
    .map_err(|errors| ApiError::validation(message.as_str(), errors))?;

  let venue = state
    .store
    .update_venue(id, input)
    .await
    .map_err(|e| ApiError::store(e, message.as_str()))?
    .ok_or_else(|| ApiError::NotFound(message.clone()))?;

  tracing::info!(venue_id = id, "venue edited");
  let flash = format!("Venue {} was successfully edited!", venue.name);
  Ok(Json(Flashed::info(venue, flash)))
}

// ─── Genres ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct VenueGenres {
  pub venue_genres: Vec<String>,
}

/// `POST /get_venue_genres/{id}`
pub async fn genres<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<VenueGenres>, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  let venue_genres = state
    .store
    .venue_genres(id)
    .await
    .map_err(|e| ApiError::store(e, format!("An error occurred. Venue {id} genres could not be loaded.")))?
    .ok_or_else(|| ApiError::NotFound(format!("Venue {id} was not found.")))?;
  Ok(Json(VenueGenres { venue_genres }))
}
