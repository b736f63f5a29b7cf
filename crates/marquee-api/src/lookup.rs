//! Load the shows of one entity and split them around a reference instant.

use chrono::{DateTime, Utc};
use marquee_core::{
  partition::{Counterpart, CounterpartIndex, MissingCounterpart, Partition, partition},
  show::Role,
  store::BookingStore,
};

use crate::error::ApiError;

/// Shows owned by `id` in `role`, partitioned into past and upcoming.
///
/// Counterparts are fetched once per distinct id. Shows whose counterpart no
/// longer exists are left out and logged.
pub async fn partitioned_shows<S>(
  store: &S,
  role: Role,
  id: i64,
  reference: DateTime<Utc>,
  message: &str,
) -> Result<Partition, ApiError>
where
  S: BookingStore,
{
  let shows = store
    .shows_for(role, id)
    .await
    .map_err(|e| ApiError::store(e, message))?;

  let mut wanted: Vec<i64> = shows.iter().map(|s| s.counterpart_id(role)).collect();
  wanted.sort_unstable();
  wanted.dedup();

  let mut index = CounterpartIndex::new();
  for counterpart_id in wanted {
    let found = match role.counterpart() {
      Role::Venue => store
        .get_venue(counterpart_id)
        .await
        .map_err(|e| ApiError::store(e, message))?
        .map(|v| Counterpart::from(&v)),
      Role::Artist => store
        .get_artist(counterpart_id)
        .await
        .map_err(|e| ApiError::store(e, message))?
        .map(|a| Counterpart::from(&a)),
    };
    if let Some(c) = found {
      index.insert(c);
    }
  }

  let split = partition(&shows, reference, role, &index, MissingCounterpart::Skip)
    .map_err(|e| ApiError::store(e, message))?;

  for show_id in &split.unresolved {
    tracing::warn!(show_id, %role, owner_id = id, "show counterpart not found, omitted");
  }

  Ok(split)
}
