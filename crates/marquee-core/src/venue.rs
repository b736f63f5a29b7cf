//! Venues: places that host shows.

use serde::{Deserialize, Serialize};

/// A persisted venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
  pub id:                  i64,
  pub name:                String,
  pub city:                String,
  pub state:               String,
  pub address:             String,
  pub phone:               String,
  pub image_link:          String,
  pub facebook_link:       String,
  #[serde(default)]
  pub seeking_talent:      bool,
  pub seeking_description: Option<String>,
  #[serde(default)]
  pub genres:              Vec<String>,
  pub website:             Option<String>,
}

impl Venue {
  pub fn location(&self) -> Location {
    Location { city: self.city.clone(), state: self.state.clone() }
  }

  pub fn to_ref(&self) -> EntityRef {
    EntityRef { id: self.id, name: self.name.clone() }
  }
}

/// Validated input for creating a venue or overwriting all of its editable
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVenue {
  pub name:                String,
  pub city:                String,
  pub state:               String,
  pub address:             String,
  pub phone:               String,
  pub image_link:          String,
  pub facebook_link:       String,
  pub seeking_talent:      bool,
  pub seeking_description: Option<String>,
  pub genres:              Vec<String>,
  pub website:             Option<String>,
}

impl NewVenue {
  /// Attach a store-assigned id.
  pub fn into_venue(self, id: i64) -> Venue {
    Venue {
      id,
      name: self.name,
      city: self.city,
      state: self.state,
      address: self.address,
      phone: self.phone,
      image_link: self.image_link,
      facebook_link: self.facebook_link,
      seeking_talent: self.seeking_talent,
      seeking_description: self.seeking_description,
      genres: self.genres,
      website: self.website,
    }
  }
}

/// A (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
  pub city:  String,
  pub state: String,
}

impl Location {
  pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
    Self { city: city.into(), state: state.into() }
  }
}

/// The id/name projection returned by searches and plain listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
  pub id:   i64,
  pub name: String,
}
