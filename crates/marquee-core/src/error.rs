//! Error types for `marquee-core`, plus the closed error-kind set that every
//! layer classifies its failures into.

use thiserror::Error;

use crate::show::Role;

/// The policy-relevant category of a failure.
///
/// Handlers decide status codes and user messages from the kind alone; the
/// underlying cause is only ever logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Submitted values failed field-level checks.
  Validation,
  /// The store refused a write (constraint or foreign-key violation).
  WriteConflict,
  /// The addressed record does not exist.
  NotFound,
  /// The store could not be reached or failed for any other reason.
  Unavailable,
}

/// Implemented by every error type that can reach a request handler.
pub trait Classify {
  fn kind(&self) -> ErrorKind;
}

#[derive(Debug, Error)]
pub enum Error {
  /// A show points at a counterpart that could not be resolved.
  #[error("show {show_id} has no resolvable {} counterpart", role.counterpart())]
  CounterpartMissing { show_id: i64, role: Role },
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::CounterpartMissing { .. } => ErrorKind::NotFound,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
