//! JSON REST API for Leadline.
//!
//! Exposes an axum [`Router`] backed by any [`leadline_core::store::LeadStore`]
//! and any [`leadline_mailer::Mailer`]. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", leadline_api::api_router(state.clone()))
//! ```

pub mod emails;
pub mod error;
pub mod followups;
pub mod leads;
pub mod notes;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use leadline_core::store::LeadStore;
use leadline_mailer::Mailer;

pub use error::ApiError;

/// Shared state threaded through all handlers: the lead store and the email
/// dispatch provider.
pub struct AppState<S, M> {
  pub store:  Arc<S>,
  pub mailer: Arc<M>,
}

// Manual impl: `S`/`M` themselves need not be `Clone` behind the `Arc`s.
impl<S, M> Clone for AppState<S, M> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      mailer: Arc::clone(&self.mailer),
    }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, M>(state: AppState<S, M>) -> Router<()>
where
  S: LeadStore + 'static,
  M: Mailer + 'static,
{
  Router::new()
    // Leads
    .route("/leads", get(leads::list::<S, M>).post(leads::create::<S, M>))
    .route(
      "/leads/{id}",
      get(leads::get_one::<S, M>).delete(leads::delete_one::<S, M>),
    )
    .route("/leads/{id}/status", put(leads::update_status::<S, M>))
    // Embedded sub-ledgers
    .route("/leads/{id}/notes", post(notes::create::<S, M>))
    .route("/leads/{id}/emails", post(emails::create::<S, M>))
    // Derived views
    .route("/followups", get(followups::list::<S, M>))
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────
