//! Entry forms and their field-level validation.
//!
//! Forms hold raw submitted values. `validate` either produces the typed
//! input the store accepts or a [`FieldErrors`] listing every failing field in
//! form order.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize, ser::SerializeMap};
use url::Url;

use crate::{
  artist::{Artist, NewArtist},
  genre::{Genre, is_known_state},
  show::{NewShow, whole_seconds},
  venue::{NewVenue, Venue},
};

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Not a valid choice.";
pub const INVALID_PHONE: &str = "Invalid phone number.";
pub const INVALID_URL: &str = "Invalid URL.";
pub const INVALID_DATETIME: &str = "Not a valid datetime value.";

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Messages per failing field, in the order the fields appear on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
  fields: Vec<(String, Vec<String>)>,
}

impl FieldErrors {
  pub fn new() -> Self { Self::default() }

  pub fn add(&mut self, field: &str, message: impl Into<String>) {
    match self.fields.iter_mut().find(|(f, _)| f == field) {
      Some((_, messages)) => messages.push(message.into()),
      None => self.fields.push((field.to_owned(), vec![message.into()])),
    }
  }

  pub fn is_empty(&self) -> bool { self.fields.is_empty() }

  pub fn get(&self, field: &str) -> Option<&[String]> {
    self.fields.iter().find(|(f, _)| f == field).map(|(_, m)| m.as_slice())
  }

  pub fn fields(&self) -> impl Iterator<Item = &str> { self.fields.iter().map(|(f, _)| f.as_str()) }

  /// `(field, first message)` for every failing field.
  pub fn first_messages(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .fields
      .iter()
      .filter_map(|(f, m)| m.first().map(|first| (f.as_str(), first.as_str())))
  }

  fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
    if self.is_empty() { Ok(value()) } else { Err(self) }
  }
}

impl fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let parts: Vec<String> =
      self.first_messages().map(|(field, msg)| format!("{field}: {msg}")).collect();
    write!(f, "{}", parts.join("; "))
  }
}

impl Serialize for FieldErrors {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.fields.len()))?;
    for (field, messages) in &self.fields {
      map.serialize_entry(field, messages)?;
    }
    map.end()
  }
}

// ─── Field checks ────────────────────────────────────────────────────────────

fn required(errors: &mut FieldErrors, field: &str, value: &str) -> String {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    errors.add(field, REQUIRED);
  }
  trimmed.to_owned()
}

fn optional(value: &str) -> Option<String> {
  let trimmed = value.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn check_state(errors: &mut FieldErrors, value: &str) -> String {
  let state = required(errors, "state", value);
  if !state.is_empty() && !is_known_state(&state) {
    errors.add("state", INVALID_CHOICE);
  }
  state
}

/// Ten digits once common separators are removed.
pub fn is_valid_phone(value: &str) -> bool {
  let mut digits = 0;
  for c in value.chars() {
    match c {
      '0'..='9' => digits += 1,
      '-' | '.' | ' ' | '(' | ')' => {}
      _ => return false,
    }
  }
  digits == 10
}

fn check_phone(errors: &mut FieldErrors, value: &str) -> String {
  let phone = required(errors, "phone", value);
  if !phone.is_empty() && !is_valid_phone(&phone) {
    errors.add("phone", INVALID_PHONE);
  }
  phone
}

pub fn is_valid_url(value: &str) -> bool {
  Url::parse(value)
    .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
    .unwrap_or(false)
}

fn check_url(errors: &mut FieldErrors, field: &str, value: &str) -> String {
  let link = required(errors, field, value);
  if !link.is_empty() && !is_valid_url(&link) {
    errors.add(field, INVALID_URL);
  }
  link
}

fn check_optional_url(errors: &mut FieldErrors, field: &str, value: &str) -> Option<String> {
  let link = optional(value)?;
  if !is_valid_url(&link) {
    errors.add(field, INVALID_URL);
  }
  Some(link)
}

fn check_genres(errors: &mut FieldErrors, values: &[String]) -> Vec<String> {
  if values.is_empty() {
    errors.add("genres", REQUIRED);
    return vec![];
  }
  let mut genres = Vec::with_capacity(values.len());
  for value in values {
    match Genre::from_str(value.trim()) {
      Ok(g) => genres.push(g.to_string()),
      Err(_) => {
        errors.add("genres", INVALID_CHOICE);
        break;
      }
    }
  }
  genres
}

/// Accepts `YYYY-MM-DD HH:MM[:SS]`, the same with a `T` separator, or RFC
/// 3339. Naive values are taken as UTC.
pub fn parse_start_time(value: &str) -> Option<DateTime<Utc>> {
  let value = value.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
    return Some(whole_seconds(dt.with_timezone(&Utc)));
  }
  ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    .map(|naive| whole_seconds(naive.and_utc()))
}

// ─── Venue form ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueForm {
  pub name:                String,
  pub city:                String,
  pub state:               String,
  pub address:             String,
  pub phone:               String,
  pub image_link:          String,
  pub genres:              Vec<String>,
  pub facebook_link:       String,
  pub website_link:        String,
  pub seeking_talent:      bool,
  pub seeking_description: String,
}

impl VenueForm {
  pub fn validate(&self) -> Result<NewVenue, FieldErrors> {
    let mut errors = FieldErrors::new();
    let name = required(&mut errors, "name", &self.name);
    let city = required(&mut errors, "city", &self.city);
    let state = check_state(&mut errors, &self.state);
    let address = required(&mut errors, "address", &self.address);
    let phone = check_phone(&mut errors, &self.phone);
    let image_link = check_url(&mut errors, "image_link", &self.image_link);
    let genres = check_genres(&mut errors, &self.genres);
    let facebook_link = check_url(&mut errors, "facebook_link", &self.facebook_link);
    let website = check_optional_url(&mut errors, "website_link", &self.website_link);

    errors.into_result(|| NewVenue {
      name,
      city,
      state,
      address,
      phone,
      image_link,
      facebook_link,
      seeking_talent: self.seeking_talent,
      seeking_description: optional(&self.seeking_description),
      genres,
      website,
    })
  }
}

impl From<&Venue> for VenueForm {
  fn from(v: &Venue) -> Self {
    Self {
      name:                v.name.clone(),
      city:                v.city.clone(),
      state:               v.state.clone(),
      address:             v.address.clone(),
      phone:               v.phone.clone(),
      image_link:          v.image_link.clone(),
      genres:              v.genres.clone(),
      facebook_link:       v.facebook_link.clone(),
      website_link:        v.website.clone().unwrap_or_default(),
      seeking_talent:      v.seeking_talent,
      seeking_description: v.seeking_description.clone().unwrap_or_default(),
    }
  }
}

// ─── Artist form ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
  pub name:                String,
  pub city:                String,
  pub state:               String,
  pub phone:               String,
  pub image_link:          String,
  pub genres:              Vec<String>,
  pub facebook_link:       String,
  pub website_link:        String,
  pub seeking_venue:       bool,
  pub seeking_description: String,
}

impl ArtistForm {
  pub fn validate(&self) -> Result<NewArtist, FieldErrors> {
    let mut errors = FieldErrors::new();
    let name = required(&mut errors, "name", &self.name);
    let city = required(&mut errors, "city", &self.city);
    let state = check_state(&mut errors, &self.state);
    let phone = check_phone(&mut errors, &self.phone);
    let image_link = check_url(&mut errors, "image_link", &self.image_link);
    let genres = check_genres(&mut errors, &self.genres);
    let facebook_link = check_url(&mut errors, "facebook_link", &self.facebook_link);
    let website = check_optional_url(&mut errors, "website_link", &self.website_link);

    errors.into_result(|| NewArtist {
      name,
      city,
      state,
      phone,
      image_link,
      facebook_link,
      genres,
      seeking_venue: self.seeking_venue,
      seeking_description: optional(&self.seeking_description),
      website,
    })
  }
}

impl From<&Artist> for ArtistForm {
  fn from(a: &Artist) -> Self {
    Self {
      name:                a.name.clone(),
      city:                a.city.clone(),
      state:               a.state.clone(),
      phone:               a.phone.clone(),
      image_link:          a.image_link.clone(),
      genres:              a.genres.clone(),
      facebook_link:       a.facebook_link.clone(),
      website_link:        a.website.clone().unwrap_or_default(),
      seeking_venue:       a.seeking_venue,
      seeking_description: a.seeking_description.clone().unwrap_or_default(),
    }
  }
}

// ─── Show form ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowForm {
  pub artist_id:  Option<i64>,
  pub venue_id:   Option<i64>,
  pub start_time: String,
}

impl ShowForm {
  /// A blank form whose start time is prefilled with `now`.
  pub fn starting_at(now: DateTime<Utc>) -> Self {
    Self {
      start_time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
      ..Self::default()
    }
  }

  pub fn validate(&self) -> Result<NewShow, FieldErrors> {
    let mut errors = FieldErrors::new();
    if self.artist_id.is_none() {
      errors.add("artist_id", REQUIRED);
    }
    if self.venue_id.is_none() {
      errors.add("venue_id", REQUIRED);
    }
    let start_time = if self.start_time.trim().is_empty() {
      errors.add("start_time", REQUIRED);
      None
    } else {
      let parsed = parse_start_time(&self.start_time);
      if parsed.is_none() {
        errors.add("start_time", INVALID_DATETIME);
      }
      parsed
    };

    match (self.artist_id, self.venue_id, start_time) {
      (Some(artist_id), Some(venue_id), Some(start_time)) if errors.is_empty() => {
        Ok(NewShow { venue_id, artist_id, start_time })
      }
      _ => Err(errors),
    }
  }
}
