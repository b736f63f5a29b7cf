//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every variant carries the user-facing flash message only. Underlying
//! causes are logged when the error is built and never reach the response.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use marquee_core::{Classify, ErrorKind, form::FieldErrors};
use serde::Serialize;
use thiserror::Error;

use crate::flash::Flash;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("validation failed: {errors}")]
  Validation { message: String, errors: FieldErrors },

  #[error("write conflict: {0}")]
  WriteConflict(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("unavailable: {0}")]
  Unavailable(String),
}

impl ApiError {
  /// Classify a store failure, log its cause, and keep only `message` for
  /// the user.
  pub fn store<E>(err: E, message: impl Into<String>) -> Self
  where
    E: std::error::Error + Classify,
  {
    let message = message.into();
    let kind = err.kind();
    tracing::error!(error = %err, ?kind, "store operation failed");
    match kind {
      ErrorKind::Validation => ApiError::Validation { message, errors: FieldErrors::new() },
      ErrorKind::WriteConflict => ApiError::WriteConflict(message),
      ErrorKind::NotFound => ApiError::NotFound(message),
      ErrorKind::Unavailable => ApiError::Unavailable(message),
    }
  }

  pub fn validation(message: impl Into<String>, errors: FieldErrors) -> Self {
    ApiError::Validation { message: message.into(), errors }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      ApiError::Validation { .. } => ErrorKind::Validation,
      ApiError::WriteConflict(_) => ErrorKind::WriteConflict,
      ApiError::NotFound(_) => ErrorKind::NotFound,
      ApiError::Unavailable(_) => ErrorKind::Unavailable,
    }
  }
}

#[derive(Serialize)]
struct ErrorBody {
  flashes: Vec<Flash>,
  #[serde(skip_serializing_if = "Option::is_none")]
  errors:  Option<FieldErrors>,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match self.kind() {
      ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
      ErrorKind::WriteConflict => StatusCode::CONFLICT,
      ErrorKind::NotFound => StatusCode::NOT_FOUND,
      ErrorKind::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let body = match self {
      ApiError::Validation { message, errors } => {
        let mut flashes = vec![Flash::danger(message)];
        flashes.extend(
          errors
            .first_messages()
            .map(|(field, first)| Flash::danger(format!("{field}: {first}"))),
        );
        ErrorBody { flashes, errors: (!errors.is_empty()).then_some(errors) }
      }
      ApiError::WriteConflict(message)
      | ApiError::NotFound(message)
      | ApiError::Unavailable(message) => {
        ErrorBody { flashes: vec![Flash::danger(message)], errors: None }
      }
    };

    (status, Json(body)).into_response()
  }
}
