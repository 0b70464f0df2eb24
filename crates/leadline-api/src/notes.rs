//! Handler for `POST /leads/:id/notes`.

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use leadline_core::{lead::NewNote, store::LeadStore};
use leadline_mailer::Mailer;
use uuid::Uuid;

use crate::{AppState, error::ApiError, leads::require_json};

/// `POST /leads/:id/notes` — body: [`NewNote`]; returns 201 + the stored
/// note with its `date` defaulted to the append time.
pub async fn create<S, M>(
  State(state): State<AppState<S, M>>,
  Path(id): Path<Uuid>,
  body: Result<Json<NewNote>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LeadStore,
  M: Mailer,
{
  let input = require_json(body)?;
  let note = state
    .store
    .append_note(id, input)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(note)))
}
