//! Handler for `GET /`.

use axum::{Json, extract::State};
use marquee_core::{
  artist::Artist,
  directory::{Area, group_by_location},
  store::BookingStore,
  venue::{EntityRef, Venue},
};
use serde::Serialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
  pub recent_artists: Vec<EntityRef>,
  pub areas:          Vec<Area<EntityRef>>,
}

/// `GET /`: the most recent artists plus the most recent venues grouped by
/// area. Every known area is listed even when none of its venues are recent.
pub async fn index<S>(State(state): State<AppState<S>>) -> Result<Json<HomePage>, ApiError>
where
  S: BookingStore + Clone + Send + Sync + 'static,
{
  const MESSAGE: &str = "An error occurred. The home page could not be loaded.";
  let limit = state.settings.recent_limit;

  let artists = state
    .store
    .recent_artists(limit)
    .await
    .map_err(|e| ApiError::store(e, MESSAGE))?;
  let venues = state
    .store
    .recent_venues(limit)
    .await
    .map_err(|e| ApiError::store(e, MESSAGE))?;
  let areas = state
    .store
    .venue_locations()
    .await
    .map_err(|e| ApiError::store(e, MESSAGE))?;

  Ok(Json(HomePage {
    recent_artists: artists.iter().map(Artist::to_ref).collect(),
    areas:          group_by_location(&areas, &venues, &state.settings.location_policy, Venue::to_ref),
  }))
}
