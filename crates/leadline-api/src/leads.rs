//! Handlers for the `/leads` collection and item endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/leads` | Optional `?status=`, `?tags=a,b`, `?search=` |
//! | `POST`   | `/leads` | Body: [`NewLead`]; returns 201 + stored lead |
//! | `GET`    | `/leads/:id` | 404 if not found |
//! | `PUT`    | `/leads/:id/status` | Body: `{"status":"qualified"}` |
//! | `DELETE` | `/leads/:id` | Always 200 on a well-formed request |

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use leadline_core::{
  lead::{Lead, LeadStatus, NewLead},
  query::LeadFilter,
  store::LeadStore,
};
use leadline_mailer::Mailer;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// Unwrap a JSON body, converting axum's rejection into a 400 with the
/// parse error as the message (the default rejection is a bare 422).
pub(crate) fn require_json<T>(
  body: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
  match body {
    Ok(Json(value)) => Ok(value),
    Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
  }
}

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Exact status match.
  pub status: Option<LeadStatus>,
  /// Comma-separated tags; a lead matches if it carries at least one.
  pub tags:   Option<String>,
  /// Case-insensitive substring match over name or email.
  pub search: Option<String>,
}

impl From<ListParams> for LeadFilter {
  fn from(p: ListParams) -> Self {
    LeadFilter {
      status: p.status,
      tags:   p
        .tags
        .map(|s| {
          s.split(',')
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .collect()
        })
        .unwrap_or_default(),
      search: p.search,
    }
  }
}

/// `GET /leads[?status=...][&tags=a,b][&search=...]`
pub async fn list<S, M>(
  State(state): State<AppState<S, M>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Lead>>, ApiError>
where
  S: LeadStore,
  M: Mailer,
{
  let filter = LeadFilter::from(params);
  let leads = state
    .store
    .list_leads(&filter)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(leads))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /leads` — returns 201 + the stored lead.
pub async fn create<S, M>(
  State(state): State<AppState<S, M>>,
  body: Result<Json<NewLead>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LeadStore,
  M: Mailer,
{
  let input = require_json(body)?;
  let lead = state
    .store
    .create_lead(input)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(lead)))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /leads/:id`
pub async fn get_one<S, M>(
  State(state): State<AppState<S, M>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Lead>, ApiError>
where
  S: LeadStore,
  M: Mailer,
{
  let lead = state
    .store
    .get_lead(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("lead {id} not found")))?;
  Ok(Json(lead))
}

// ─── Status update ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: LeadStatus,
}

/// `PUT /leads/:id/status` — body: `{"status":"qualified"}`; returns the
/// updated lead. A status outside the enumeration never reaches the store.
pub async fn update_status<S, M>(
  State(state): State<AppState<S, M>>,
  Path(id): Path<Uuid>,
  body: Result<Json<StatusBody>, JsonRejection>,
) -> Result<Json<Lead>, ApiError>
where
  S: LeadStore,
  M: Mailer,
{
  let body = require_json(body)?;
  let lead = state
    .store
    .update_status(id, body.status)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(lead))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /leads/:id`
///
/// Deletion is idempotent at the transport boundary: the store's not-found
/// signal is swallowed and the caller gets the same success message either
/// way. Other store failures still surface as 500.
pub async fn delete_one<S, M>(
  State(state): State<AppState<S, M>>,
  Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: LeadStore,
  M: Mailer,
{
  let deleted: Result<(), leadline_core::Error> =
    state.store.delete_lead(id).await.map_err(Into::into);
  match deleted {
    Ok(()) | Err(leadline_core::Error::LeadNotFound(_)) => {}
    Err(e) => return Err(ApiError::store(e)),
  }
  Ok(Json(json!({ "message": "Lead deleted" })))
}
