//! Name search shared by `/venues/search` and `/artists/search`.

use chrono::{DateTime, Utc};
use marquee_core::{show::Role, store::BookingStore, venue::EntityRef};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// The urlencoded search form. A request without `search_term` is rejected
/// by the `Form` extractor.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
  pub search_term: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
  pub id:                 i64,
  pub name:               String,
  pub num_upcoming_shows: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
  pub count:       usize,
  pub data:        Vec<SearchHit>,
  pub search_term: String,
}

/// Attach the strict upcoming count to every hit.
pub async fn with_counts<S>(
  store: &S,
  role: Role,
  hits: Vec<EntityRef>,
  reference: DateTime<Utc>,
  search_term: String,
) -> Result<SearchResults, ApiError>
where
  S: BookingStore,
{
  let mut data = Vec::with_capacity(hits.len());
  for hit in hits {
    let num_upcoming_shows = store
      .count_upcoming(role, hit.id, reference)
      .await
      .map_err(|e| ApiError::store(e, "An error occurred. Search could not be completed."))?;
    data.push(SearchHit { id: hit.id, name: hit.name, num_upcoming_shows });
  }
  Ok(SearchResults { count: data.len(), data, search_term })
}
