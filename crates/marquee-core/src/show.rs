//! Shows: a scheduled pairing of one venue and one artist.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Which side of a show an entity sits on.
///
/// Operations that take a `Role` are asked about shows *owned* by an entity
/// of that role; the other side is the counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  Venue,
  Artist,
}

impl Role {
  pub fn counterpart(self) -> Role {
    match self {
      Role::Venue => Role::Artist,
      Role::Artist => Role::Venue,
    }
  }
}

/// A persisted show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
  pub id:         i64,
  pub venue_id:   i64,
  pub artist_id:  i64,
  pub start_time: DateTime<Utc>,
}

impl Show {
  /// The foreign key pointing at the owner of `role`.
  pub fn owner_id(&self, role: Role) -> i64 {
    match role {
      Role::Venue => self.venue_id,
      Role::Artist => self.artist_id,
    }
  }

  /// The foreign key pointing at the counterpart of `role`.
  pub fn counterpart_id(&self, role: Role) -> i64 {
    self.owner_id(role.counterpart())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShow {
  pub venue_id:   i64,
  pub artist_id:  i64,
  pub start_time: DateTime<Utc>,
}

/// A show joined with the names needed by the show listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowListing {
  pub show_id:           i64,
  pub venue_id:          i64,
  pub venue_name:        String,
  pub artist_id:         i64,
  pub artist_name:       String,
  pub artist_image_link: String,
  pub start_time:        DateTime<Utc>,
}

/// Drop sub-second precision. Stored start times and reference instants are
/// both truncated so boundary comparisons are exact.
pub fn whole_seconds(t: DateTime<Utc>) -> DateTime<Utc> {
  t.trunc_subsecs(0)
}
