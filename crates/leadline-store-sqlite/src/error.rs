//! Error type for `leadline-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] leadline_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("column decode error: {0}")]
  Decode(String),

  #[error("lead not found: {0}")]
  LeadNotFound(Uuid),

  #[error("a lead with email {0:?} already exists")]
  DuplicateEmail(String),

  #[error("a lead with phone {0:?} already exists")]
  DuplicatePhone(String),
}

/// Collapse into the core taxonomy at the trait boundary so API callers can
/// classify failures without depending on this crate.
impl From<Error> for leadline_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Core(e) => e,
      Error::Json(e) => Self::Serialization(e),
      Error::LeadNotFound(id) => Self::LeadNotFound(id),
      Error::DuplicateEmail(email) => Self::DuplicateEmail(email),
      Error::DuplicatePhone(phone) => Self::DuplicatePhone(phone),
      e => Self::Store(e.to_string()),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
