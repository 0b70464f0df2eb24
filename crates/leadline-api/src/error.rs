//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use leadline_mailer::DispatchError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("email dispatch failed: {0}")]
  Dispatch(#[from] DispatchError),

  #[error("internal error: {0}")]
  Internal(String),
}

impl ApiError {
  /// Classify a store failure into the wire taxonomy: validation problems
  /// are the client's fault (400), a missing lead is 404, anything else is
  /// an opaque 500.
  pub fn store<E: Into<leadline_core::Error>>(e: E) -> Self {
    match e.into() {
      leadline_core::Error::LeadNotFound(id) => {
        Self::NotFound(format!("lead {id} not found"))
      }
      e if e.is_validation() => Self::BadRequest(e.to_string()),
      e => Self::Internal(e.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match &self {
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response()
      }
      ApiError::BadRequest(m) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": m }))).into_response()
      }
      // Provider failures surface their detail rather than being swallowed.
      ApiError::Dispatch(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
          "error":   "failed to send email",
          "details": e.to_string(),
          "code":    e.provider_status(),
        })),
      )
        .into_response(),
      ApiError::Internal(m) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": m })),
      )
        .into_response(),
    }
  }
}
