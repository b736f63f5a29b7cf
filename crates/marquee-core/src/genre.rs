//! Fixed vocabularies offered by the entry forms.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// A selectable music genre. Stored on entities by its display name.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter,
  Serialize, Deserialize,
)]
pub enum Genre {
  Alternative,
  Blues,
  Classical,
  Country,
  Electronic,
  Folk,
  Funk,
  #[strum(serialize = "Hip-Hop")]
  #[serde(rename = "Hip-Hop")]
  HipHop,
  #[strum(serialize = "Heavy Metal")]
  #[serde(rename = "Heavy Metal")]
  HeavyMetal,
  Instrumental,
  Jazz,
  #[strum(serialize = "Musical Theatre")]
  #[serde(rename = "Musical Theatre")]
  MusicalTheatre,
  Pop,
  Punk,
  #[strum(serialize = "R&B")]
  #[serde(rename = "R&B")]
  RhythmAndBlues,
  Reggae,
  #[strum(serialize = "Rock n Roll")]
  #[serde(rename = "Rock n Roll")]
  RockNRoll,
  Soul,
  Other,
}

impl Genre {
  /// Display names of every genre, in menu order.
  pub fn choices() -> Vec<String> { Genre::iter().map(|g| g.to_string()).collect() }
}

/// US postal codes accepted in the `state` field.
pub const STATES: [&str; 51] = [
  "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID",
  "IL", "IN", "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM",
  "NY", "NC", "ND", "OH", "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA",
  "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY",
];

pub fn is_known_state(code: &str) -> bool { STATES.contains(&code) }
