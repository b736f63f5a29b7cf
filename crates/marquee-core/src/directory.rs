//! Grouping venues by area for the home and venue-list pages.
//!
//! Areas are the distinct (city, state) pairs among all venues. Members of
//! each area are drawn from a second, possibly limited, venue collection and
//! matched by a swappable [`LocationMatch`] policy.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::venue::{Location, Venue};

/// Decides whether `venue` belongs to the group for `area`.
pub trait LocationMatch {
  fn matches(&self, area: &Location, venue: &Venue) -> bool;
}

/// Compares the city string only; the state is ignored. Two areas sharing a
/// city name therefore list the same venues.
#[derive(Debug, Clone, Copy, Default)]
pub struct CityOnly;

impl LocationMatch for CityOnly {
  fn matches(&self, area: &Location, venue: &Venue) -> bool { area.city == venue.city }
}

/// Compares both city and state.
#[derive(Debug, Clone, Copy, Default)]
pub struct CityAndState;

impl LocationMatch for CityAndState {
  fn matches(&self, area: &Location, venue: &Venue) -> bool {
    area.city == venue.city && area.state == venue.state
  }
}

/// A configurable choice between the built-in policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPolicy {
  #[default]
  CityOnly,
  CityAndState,
}

impl LocationMatch for LocationPolicy {
  fn matches(&self, area: &Location, venue: &Venue) -> bool {
    match self {
      LocationPolicy::CityOnly => CityOnly.matches(area, venue),
      LocationPolicy::CityAndState => CityAndState.matches(area, venue),
    }
  }
}

/// One group of the directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area<E> {
  pub city:   String,
  pub state:  String,
  pub venues: Vec<E>,
}

/// Distinct locations of `venues` in order of first appearance.
pub fn distinct_locations(venues: &[Venue]) -> Vec<Location> {
  let mut seen = HashSet::new();
  venues
    .iter()
    .map(Venue::location)
    .filter(|loc| seen.insert(loc.clone()))
    .collect()
}

/// Build one [`Area`] per entry of `areas`, in the order given.
///
/// Members keep the order of `venues`; `entry` maps each member to the row
/// type of the page being built.
pub fn group_by_location<E, M, F>(
  areas: &[Location],
  venues: &[Venue],
  policy: &M,
  mut entry: F,
) -> Vec<Area<E>>
where
  M: LocationMatch + ?Sized,
  F: FnMut(&Venue) -> E,
{
  areas
    .iter()
    .map(|area| Area {
      city:   area.city.clone(),
      state:  area.state.clone(),
      venues: venues
        .iter()
        .filter(|v| policy.matches(area, v))
        .map(&mut entry)
        .collect(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::venue::EntityRef;

  fn venue(id: i64, name: &str, city: &str, state: &str) -> Venue {
    Venue {
      id,
      name: name.into(),
      city: city.into(),
      state: state.into(),
      address: "1 Main St".into(),
      phone: "415-000-0000".into(),
      image_link: "https://img".into(),
      facebook_link: "https://facebook.com/x".into(),
      seeking_talent: false,
      seeking_description: None,
      genres: vec![],
      website: None,
    }
  }

  fn refs(area: &Area<EntityRef>) -> Vec<i64> { area.venues.iter().map(|e| e.id).collect() }

  #[test]
  fn distinct_locations_keep_first_appearance() {
    let venues = vec![
      venue(1, "A", "San Francisco", "CA"),
      venue(2, "B", "New York", "NY"),
      venue(3, "C", "San Francisco", "CA"),
      venue(4, "D", "San Francisco", "NY"),
    ];
    assert_eq!(
      distinct_locations(&venues),
      vec![
        Location::new("San Francisco", "CA"),
        Location::new("New York", "NY"),
        Location::new("San Francisco", "NY"),
      ]
    );
  }

  #[test]
  fn one_group_per_distinct_pair() {
    let venues = vec![
      venue(1, "The Musical Hop", "San Francisco", "CA"),
      venue(2, "The Dueling Pianos Bar", "New York", "NY"),
      venue(3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
    ];
    let areas = distinct_locations(&venues);
    let groups = group_by_location(&areas, &venues, &CityOnly, Venue::to_ref);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].city, "San Francisco");
    assert_eq!(refs(&groups[0]), vec![1, 3]);
    assert_eq!(groups[1].city, "New York");
    assert_eq!(refs(&groups[1]), vec![2]);

    for group in &groups {
      for member in &group.venues {
        let v = venues.iter().find(|v| v.id == member.id).unwrap();
        assert_eq!(v.city, group.city);
      }
    }
  }

  #[test]
  fn city_only_policy_merges_same_city_across_states() {
    let venues = vec![venue(1, "West", "SF", "CA"), venue(2, "East", "SF", "NY")];
    let areas = distinct_locations(&venues);
    let groups = group_by_location(&areas, &venues, &CityOnly, Venue::to_ref);

    assert_eq!(groups.len(), 2);
    assert_eq!((groups[0].city.as_str(), groups[0].state.as_str()), ("SF", "CA"));
    assert_eq!(refs(&groups[0]), vec![1, 2]);
    // The second pair's group repeats the same members.
    assert_eq!(refs(&groups[1]), vec![1, 2]);
  }

  #[test]
  fn city_and_state_policy_separates_states() {
    let venues = vec![venue(1, "West", "SF", "CA"), venue(2, "East", "SF", "NY")];
    let areas = distinct_locations(&venues);
    let groups = group_by_location(&areas, &venues, &CityAndState, Venue::to_ref);

    assert_eq!(refs(&groups[0]), vec![1]);
    assert_eq!(refs(&groups[1]), vec![2]);
  }

  #[test]
  fn configurable_policy_delegates() {
    let venues = vec![venue(1, "West", "SF", "CA"), venue(2, "East", "SF", "NY")];
    let areas = distinct_locations(&venues);

    let merged = group_by_location(&areas, &venues, &LocationPolicy::default(), Venue::to_ref);
    assert_eq!(refs(&merged[1]), vec![1, 2]);

    let split = group_by_location(&areas, &venues, &LocationPolicy::CityAndState, Venue::to_ref);
    assert_eq!(refs(&split[1]), vec![2]);
  }

  #[test]
  fn members_come_from_the_limited_collection() {
    let all = vec![
      venue(1, "Old", "Austin", "TX"),
      venue(2, "Mid", "Denver", "CO"),
      venue(3, "New", "Austin", "TX"),
    ];
    // Most recent first, limited to two.
    let recent = vec![all[2].clone(), all[1].clone()];
    let groups =
      group_by_location(&distinct_locations(&all), &recent, &CityOnly, Venue::to_ref);

    assert_eq!(refs(&groups[0]), vec![3]);
    assert_eq!(refs(&groups[1]), vec![2]);
  }

  #[test]
  fn entry_mapper_shapes_rows() {
    let venues = vec![venue(1, "Hop", "SF", "CA")];
    let groups = group_by_location(
      &distinct_locations(&venues),
      &venues,
      &CityOnly,
      |v| (v.id, v.name.len()),
    );
    assert_eq!(groups[0].venues, vec![(1, 3)]);
  }
}
