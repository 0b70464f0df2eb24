//! Handler for `GET /followups`.
//!
//! Recomputed from the full lead set on every request — there is no cache
//! and no freshness contract to honour.

use axum::{Json, extract::State};
use leadline_core::{
  followup::{self, FollowUp},
  query::LeadFilter,
  store::LeadStore,
};
use leadline_mailer::Mailer;
use serde::Serialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Serialize)]
pub struct FollowUpBuckets {
  /// Follow-ups due today (server-local), ascending by time.
  pub today: Vec<FollowUp>,
  /// Every follow-up-bearing note, in lead order × note order.
  pub all:   Vec<FollowUp>,
}

/// `GET /followups`
pub async fn list<S, M>(
  State(state): State<AppState<S, M>>,
) -> Result<Json<FollowUpBuckets>, ApiError>
where
  S: LeadStore,
  M: Mailer,
{
  let leads = state
    .store
    .list_leads(&LeadFilter::default())
    .await
    .map_err(ApiError::store)?;

  let all = followup::collect(&leads);
  let today = followup::due_today(&all);

  Ok(Json(FollowUpBuckets { today, all }))
}
