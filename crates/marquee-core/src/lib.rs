//! Core types and trait definitions for the Marquee booking directory.
//!
//! Nothing here touches HTTP or a database; every other crate depends on it.

#![allow(async_fn_in_trait)]

pub mod artist;
pub mod counter;
pub mod directory;
pub mod error;
pub mod form;
pub mod format;
pub mod genre;
pub mod partition;
pub mod show;
pub mod store;
pub mod venue;

pub use error::{Classify, Error, ErrorKind, Result};
