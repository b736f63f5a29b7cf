//! Counting an entity's upcoming shows for list and search pages.
//!
//! Unlike [`crate::partition`], the boundary here is strict: a show starting
//! exactly at the reference instant is not counted.

use chrono::{DateTime, Utc};

use crate::show::{Role, Show};

/// Strict boundary used by upcoming-show counts.
pub fn starts_strictly_after(show: &Show, reference: DateTime<Utc>) -> bool {
  show.start_time > reference
}

/// Number of `shows` owned by `entity_id` in `role` that start after
/// `reference`. Shows owned by other entities are ignored.
pub fn count_upcoming(
  shows: &[Show],
  role: Role,
  entity_id: i64,
  reference: DateTime<Utc>,
) -> u64 {
  shows
    .iter()
    .filter(|s| s.owner_id(role) == entity_id && starts_strictly_after(s, reference))
    .count() as u64
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone};

  use super::*;

  fn at(offset_minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2031, 1, 15, 19, 0, 0).unwrap() + Duration::minutes(offset_minutes)
  }

  fn show(id: i64, venue_id: i64, artist_id: i64, offset_minutes: i64) -> Show {
    Show { id, venue_id, artist_id, start_time: at(offset_minutes) }
  }

  #[test]
  fn counts_only_strictly_later_shows() {
    let shows = vec![show(1, 1, 5, -10), show(2, 1, 5, 0), show(3, 1, 5, 10)];
    assert_eq!(count_upcoming(&shows, Role::Venue, 1, at(0)), 1);
  }

  #[test]
  fn filters_by_role_foreign_key() {
    let shows = vec![show(1, 1, 5, 10), show(2, 2, 5, 10), show(3, 1, 6, 10)];
    assert_eq!(count_upcoming(&shows, Role::Venue, 1, at(0)), 2);
    assert_eq!(count_upcoming(&shows, Role::Artist, 5, at(0)), 2);
    assert_eq!(count_upcoming(&shows, Role::Artist, 6, at(0)), 1);
    assert_eq!(count_upcoming(&shows, Role::Artist, 7, at(0)), 0);
  }

  #[test]
  fn empty_input_counts_zero() {
    assert_eq!(count_upcoming(&[], Role::Artist, 1, at(0)), 0);
  }
}
