//! Error type for `marquee-store-sqlite`.

use marquee_core::{Classify, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::Database(tokio_rusqlite::Error::Rusqlite(e)) => classify_sqlite(e),
      Error::Database(_) => ErrorKind::Unavailable,
      Error::Json(_) | Error::DateParse(_) => ErrorKind::Unavailable,
    }
  }
}

fn classify_sqlite(e: &rusqlite::Error) -> ErrorKind {
  match e {
    rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
      rusqlite::ErrorCode::ConstraintViolation => ErrorKind::WriteConflict,
      _ => ErrorKind::Unavailable,
    },
    rusqlite::Error::QueryReturnedNoRows => ErrorKind::NotFound,
    _ => ErrorKind::Unavailable,
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
