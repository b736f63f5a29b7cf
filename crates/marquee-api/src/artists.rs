//! Handlers for `/artists` endpoints.
//!
//! | Method | Path                       | Notes |
//! |--------|----------------------------|-------|
//! | `GET`  | `/artists`                 | `[{id, name}]` |
//! | `POST` | `/artists/search`          | Form field `search_term` |
//! | `GET`  | `/artists/{id}`            | 404 if not found |
//! | `GET`  | `/artists/create`          | Blank form |
//! | `POST` | `/artists/create`          | Body: [`ArtistForm`] |
//! | `GET`  | `/artists/{id}/edit`       | Prefilled form |
//! | `POST` | `/artists/{id}/edit`       | Full overwrite |
//! | `POST` | `/get_artist_genres/{id}`  | `{"artist_genres": [...]}` |

use axum::{
  Form, Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use marquee_core::{
  artist::Artist,
  form::ArtistForm,
  partition::Projection,
  show::Role,
  store::BookingStore,
  venue::EntityRef,
};
use serde::Serialize;

use crate::{
  AppState,
  error::ApiError,
  flash::Flashed,
  lookup::partitioned_shows,
  pages::FormPage,
  search::{SearchForm, SearchResults, with_counts},
};

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /artists`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<EntityRef>>, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  let artists = state
    .store
    .list_artists()
    .await
    .map_err(|e| ApiError::store(e, "An error occurred. Artists could not be listed."))?;
  Ok(Json(artists.iter().map(Artist::to_ref).collect()))
}

// ─── Search ──────────────────────────────────────────────────────────────────

/// `POST /artists/search`
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
    .search_artists(&form.search_term)
    .await
    .map_err(|e| ApiError::store(e, "An error occurred. Search could not be completed."))?;
  let results = with_counts(state.store.as_ref(), Role::Artist, hits, now, form.search_term).await?;
  Ok(Json(results))
}

// ─── Detail ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
  #[serde(flatten)]
  pub artist:               Artist,
  pub past_shows:           Vec<Projection>,
  pub upcoming_shows:       Vec<Projection>,
  pub past_shows_count:     usize,
  pub upcoming_shows_count: usize,
}

/// `GET /artists/{id}`
pub async fn detail<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<ArtistDetail>, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  let message = format!("An error occurred. Artist {id} could not be shown.");
  let artist = state
    .store
    .get_artist(id)
    .await
    .map_err(|e| ApiError::store(e, message.as_str()))?
    .ok_or_else(|| ApiError::NotFound(format!("Artist {id} was not found.")))?;

  let shows =
    partitioned_shows(state.store.as_ref(), Role::Artist, id, state.clock.now(), &message).await?;

  Ok(Json(ArtistDetail {
    artist,
    past_shows_count: shows.past.len(),
    upcoming_shows_count: shows.upcoming.len(),
    past_shows: shows.past,
    upcoming_shows: shows.upcoming,
  }))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `GET /artists/create`
pub async fn create_form() -> Json<FormPage<ArtistForm>> { Json(FormPage::blank(ArtistForm::default())) }

/// `POST /artists/create`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(form): Json<ArtistForm>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  let message = format!("An error occurred. Artist {} could not be listed.", form.name);
  let input = form
    .validate()
    .map_err(|errors| ApiError::validation(message.as_str(), errors))?;

  let artist = state
    .store
    .create_artist(input)
    .await
    .map_err(|e| ApiError::store(e, message.as_str()))?;

  tracing::info!(artist_id = artist.id, "artist listed");
  let flash = format!("Artist {} was successfully listed!", artist.name);
  Ok((StatusCode::CREATED, Json(Flashed::info(artist, flash))))
}

// ─── Edit ────────────────────────────────────────────────────────────────────

/// `GET /artists/{id}/edit`
pub async fn edit_form<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<FormPage<ArtistForm, Artist>>, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  let artist = state
    .store
    .get_artist(id)
    .await
    .map_err(|e| ApiError::store(e, format!("An error occurred. Artist {id} could not be loaded.")))?
    .ok_or_else(|| ApiError::NotFound(format!("Artist {id} was not found.")))?;

  Ok(Json(FormPage::edit(ArtistForm::from(&artist), artist)))
}

/// `POST /artists/{id}/edit`
pub async fn edit<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  Json(form): Json<ArtistForm>,
) -> Result<Json<Flashed<Artist>>, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  let message = format!("An error occurred. Artist {} could not be edited.", form.name);
  let input = form
    .validate()
    .map_err(|errors| ApiError::validation(message.as_str(), errors))?;

  let artist = state
    .store
    .update_artist(id, input)
    .await
    .map_err(|e| ApiError::store(e, message.as_str()))?
    .ok_or_else(|| ApiError::NotFound(message.clone()))?;

  tracing::info!(artist_id = id, "artist edited");
  let flash = format!("Artist {} was successfully edited!", artist.name);
  Ok(Json(Flashed::info(artist, flash)))
}

// ─── Genres ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ArtistGenres {
  pub artist_genres: Vec<String>,
}

/// `POST /get_artist_genres/{id}`
pub async fn genres<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<ArtistGenres>, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  let artist_genres = state
    .store
    .artist_genres(id)
    .await
    .map_err(|e| ApiError::store(e, format!("An error occurred. Artist {id} genres could not be loaded.")))?
    .ok_or_else(|| ApiError::NotFound(format!("Artist {id} was not found.")))?;
  Ok(Json(ArtistGenres { artist_genres }))
}
