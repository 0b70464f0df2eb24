//! The `LeadStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `leadline-store-sqlite`). Higher layers (`leadline-api`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  lead::{EmailRecord, Lead, LeadStatus, NewEmail, NewLead, NewNote, Note},
  query::LeadFilter,
};

/// Abstraction over a lead store backend.
///
/// The store is the validation gate: creates and appends reject invalid
/// input, and creates reject `email`/`phone` collisions. Notes and emails
/// are append-only — no operation reorders or removes them individually.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`). Backend error
/// types must convert into [`crate::Error`] so callers can classify
/// failures without knowing the backend.
pub trait LeadStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  /// Validate and persist a new lead. The id is generated, `status`
  /// defaults to `new`, and both timestamps are set to now.
  fn create_lead(
    &self,
    input: NewLead,
  ) -> impl Future<Output = Result<Lead, Self::Error>> + Send + '_;

  /// Retrieve a lead with its embedded notes/emails. `None` if not found.
  fn get_lead(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Lead>, Self::Error>> + Send + '_;

  /// All leads matching `filter`, ordered by `created_at` descending.
  fn list_leads<'a>(
    &'a self,
    filter: &'a LeadFilter,
  ) -> impl Future<Output = Result<Vec<Lead>, Self::Error>> + Send + 'a;

  /// Replace `status` and bump `updated_at`. Errors if the lead is absent.
  fn update_status(
    &self,
    id: Uuid,
    status: LeadStatus,
  ) -> impl Future<Output = Result<Lead, Self::Error>> + Send + '_;

  /// Validate and append a note, defaulting its `date` to now. Returns the
  /// stored note.
  fn append_note(
    &self,
    id: Uuid,
    note: NewNote,
  ) -> impl Future<Output = Result<Note, Self::Error>> + Send + '_;

  /// Append an email record with `sent_at` set to now. Dispatching the
  /// email through the external provider is the caller's concern and must
  /// happen *before* this call; the store only keeps the history.
  fn append_email(
    &self,
    id: Uuid,
    email: NewEmail,
  ) -> impl Future<Output = Result<EmailRecord, Self::Error>> + Send + '_;

  /// Remove the lead and its embedded sub-resources atomically. Errors if
  /// the lead is absent; the transport layer may still treat that as
  /// success.
  fn delete_lead(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
