//! Error types for `leadline-core`.
//!
//! One enum covers the whole taxonomy: validation failures (missing fields,
//! bad phone pattern, uniqueness collisions), missing leads, and opaque
//! backend failures. Store backends convert their internal errors into this
//! type at the trait boundary so callers can classify without knowing the
//! backend.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("lead not found: {0}")]
  LeadNotFound(Uuid),

  #[error("missing required field: {0}")]
  MissingField(&'static str),

  #[error("{0:?} is not a valid phone number")]
  InvalidPhone(String),

  #[error("a lead with email {0:?} already exists")]
  DuplicateEmail(String),

  #[error("a lead with phone {0:?} already exists")]
  DuplicatePhone(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  /// Unexpected persistence failure, reported by a store backend.
  #[error("store error: {0}")]
  Store(String),
}

impl Error {
  /// True for errors the caller can fix by changing their input.
  pub fn is_validation(&self) -> bool {
    matches!(
      self,
      Self::MissingField(_)
        | Self::InvalidPhone(_)
        | Self::DuplicateEmail(_)
        | Self::DuplicatePhone(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
