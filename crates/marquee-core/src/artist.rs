//! Artists: performers booked into venues.

use serde::{Deserialize, Serialize};

use crate::venue::EntityRef;

/// A persisted artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
  pub id:                  i64,
  pub name:                String,
  pub city:                String,
  pub state:               String,
  pub phone:               String,
  pub image_link:          String,
  pub facebook_link:       String,
  #[serde(default)]
  pub genres:              Vec<String>,
  #[serde(default)]
  pub seeking_venue:       bool,
  pub seeking_description: Option<String>,
  pub website:             Option<String>,
}

impl Artist {
  pub fn to_ref(&self) -> EntityRef {
    EntityRef { id: self.id, name: self.name.clone() }
  }
}

/// Validated input for creating an artist or overwriting all of its
/// editable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArtist {
  pub name:                String,
  pub city:                String,
  pub state:               String,
  pub phone:               String,
  pub image_link:          String,
  pub facebook_link:       String,
  pub genres:              Vec<String>,
  pub seeking_venue:       bool,
  pub seeking_description: Option<String>,
  pub website:             Option<String>,
}

impl NewArtist {
  pub fn into_artist(self, id: i64) -> Artist {
    Artist {
      id,
      name: self.name,
      city: self.city,
      state: self.state,
      phone: self.phone,
      image_link: self.image_link,
      facebook_link: self.facebook_link,
      genres: self.genres,
      seeking_venue: self.seeking_venue,
      seeking_description: self.seeking_description,
      website: self.website,
    }
  }
}
