//! Splitting an entity's shows into past and upcoming projections.
//!
//! The boundary is inclusive on the upcoming side: a show starting exactly at
//! the reference instant is upcoming. [`crate::counter`] uses a strict
//! boundary instead and the two are kept apart on purpose.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  artist::Artist,
  format::format_start_time,
  show::{Role, Show},
  venue::Venue,
};

/// The identity and picture of the entity on the other side of a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterpart {
  pub id:         i64,
  pub name:       String,
  pub image_link: String,
}

impl From<&Venue> for Counterpart {
  fn from(v: &Venue) -> Self {
    Self { id: v.id, name: v.name.clone(), image_link: v.image_link.clone() }
  }
}

impl From<&Artist> for Counterpart {
  fn from(a: &Artist) -> Self {
    Self { id: a.id, name: a.name.clone(), image_link: a.image_link.clone() }
  }
}

/// Counterparts keyed by id, built by the caller from whatever lookups it
/// chose to perform.
#[derive(Debug, Clone, Default)]
pub struct CounterpartIndex {
  by_id: HashMap<i64, Counterpart>,
}

impl CounterpartIndex {
  pub fn new() -> Self { Self::default() }

  pub fn insert(&mut self, counterpart: Counterpart) {
    self.by_id.insert(counterpart.id, counterpart);
  }

  pub fn resolve(&self, id: i64) -> Option<&Counterpart> { self.by_id.get(&id) }

  pub fn len(&self) -> usize { self.by_id.len() }

  pub fn is_empty(&self) -> bool { self.by_id.is_empty() }
}

impl FromIterator<Counterpart> for CounterpartIndex {
  fn from_iter<I: IntoIterator<Item = Counterpart>>(iter: I) -> Self {
    let mut index = Self::new();
    for c in iter {
      index.insert(c);
    }
    index
  }
}

/// What to do with a show whose counterpart is not in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingCounterpart {
  /// Leave the show out and report its id in [`Partition::unresolved`].
  #[default]
  Skip,
  /// Abort with [`Error::CounterpartMissing`].
  Fail,
}

/// A reduced view of a show from one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
  pub show_id:                i64,
  pub counterpart_id:         i64,
  pub counterpart_name:       String,
  pub counterpart_image_link: String,
  pub start_time:             DateTime<Utc>,
  pub start_time_formatted:   String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
  pub past:       Vec<Projection>,
  pub upcoming:   Vec<Projection>,
  /// Ids of shows dropped under [`MissingCounterpart::Skip`].
  #[serde(skip)]
  pub unresolved: Vec<i64>,
}

/// Inclusive boundary used by [`partition`].
pub fn starts_at_or_after(show: &Show, reference: DateTime<Utc>) -> bool {
  show.start_time >= reference
}

/// Split `shows`, all owned by one entity of `role`, around `reference`.
///
/// Output order follows input order within each half.
pub fn partition(
  shows: &[Show],
  reference: DateTime<Utc>,
  role: Role,
  counterparts: &CounterpartIndex,
  policy: MissingCounterpart,
) -> Result<Partition> {
  let mut out = Partition::default();

  for show in shows {
    let Some(counterpart) = counterparts.resolve(show.counterpart_id(role)) else {
      match policy {
        MissingCounterpart::Skip => {
          out.unresolved.push(show.id);
          continue;
        }
        MissingCounterpart::Fail => {
          return Err(Error::CounterpartMissing { show_id: show.id, role });
        }
      }
    };

    let projection = Projection {
      show_id:                show.id,
      counterpart_id:         counterpart.id,
      counterpart_name:       counterpart.name.clone(),
      counterpart_image_link: counterpart.image_link.clone(),
      start_time:             show.start_time,
      start_time_formatted:   format_start_time(show.start_time),
    };

    if starts_at_or_after(show, reference) {
      out.upcoming.push(projection);
    } else {
      out.past.push(projection);
    }
  }

  Ok(out)
}
