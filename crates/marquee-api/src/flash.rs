//! One-shot user messages returned alongside a page's data.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlashCategory {
  AlertInfo,
  AlertDanger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
  pub category: FlashCategory,
  pub message:  String,
}

impl Flash {
  pub fn info(message: impl Into<String>) -> Self {
    Self { category: FlashCategory::AlertInfo, message: message.into() }
  }

  pub fn danger(message: impl Into<String>) -> Self {
    Self { category: FlashCategory::AlertDanger, message: message.into() }
  }
}

/// Page data plus the flashes to show with it.
#[derive(Debug, Clone, Serialize)]
pub struct Flashed<T> {
  pub flashes: Vec<Flash>,
  pub data:    T,
}

impl<T> Flashed<T> {
  pub fn info(data: T, message: impl Into<String>) -> Self {
    Self { flashes: vec![Flash::info(message)], data }
  }
}
