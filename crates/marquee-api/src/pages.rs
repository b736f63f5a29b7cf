//! View models shared by several handlers.

use marquee_core::genre::{Genre, STATES};
use serde::Serialize;

/// A blank or prefilled entry form together with its menu choices.
#[derive(Debug, Clone, Serialize)]
pub struct FormPage<F, R = ()> {
  pub form:   F,
  /// The record being edited; absent on create pages.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub record: Option<R>,
  pub genres: Vec<String>,
  pub states: Vec<&'static str>,
}

impl<F> FormPage<F> {
  pub fn blank(form: F) -> Self {
    Self { form, record: None, genres: Genre::choices(), states: STATES.to_vec() }
  }
}

impl<F, R> FormPage<F, R> {
  pub fn edit(form: F, record: R) -> Self {
    Self { form, record: Some(record), genres: Genre::choices(), states: STATES.to_vec() }
  }
}

/// Acknowledges a deletion.
#[derive(Debug, Clone, Serialize)]
pub struct Deleted {
  pub id: i64,
}
