//! Handler for `POST /leads/:id/emails` — dispatch, then record.
//!
//! Ordering matters here: the historical record is persisted only after the
//! provider accepted the message, so a failed send never leaves a ghost
//! email on the lead.

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use leadline_core::{lead::NewEmail, store::LeadStore};
use leadline_mailer::{Mailer, OutboundMessage};
use uuid::Uuid;

use crate::{AppState, error::ApiError, leads::require_json};

/// `POST /leads/:id/emails` — body: `{"to","subject","text"}`; returns 201 +
/// the persisted email record. Provider failures come back as 500 with the
/// provider's detail attached.
pub async fn create<S, M>(
  State(state): State<AppState<S, M>>,
  Path(id): Path<Uuid>,
  body: Result<Json<NewEmail>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LeadStore,
  M: Mailer,
{
  let input = require_json(body)?;
  input.validate().map_err(ApiError::store)?;

  // Confirm the lead exists before touching the provider.
  state
    .store
    .get_lead(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("lead {id} not found")))?;

  let message = OutboundMessage {
    to:      input.to.clone(),
    subject: input.subject.clone(),
    text:    input.text.clone(),
  };
  state.mailer.send(&message).await?;

  let record = state
    .store
    .append_email(id, input)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(record)))
}
