//! Lead — the central CRM entity, with its embedded interaction history.
//!
//! A lead owns two append-only sub-ledgers: free-text notes (optionally
//! carrying a follow-up reminder) and a log of outbound emails. Neither has
//! independent identity or lifecycle; both live and die with the lead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Pipeline position of a lead. Assigned `New` at creation unless the caller
/// overrides it; mutable thereafter only through the status-update operation.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
  #[default]
  New,
  Open,
  InProgress,
  Qualified,
  Unqualified,
  ClosedLost,
  ClosedWon,
}

// ─── Notes ───────────────────────────────────────────────────────────────────

/// The kind of interaction a note records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
  Email,
  Call,
  Meeting,
  Other,
}

/// A timestamped free-text interaction record. `follow_up`, when set, marks
/// when the user intends to revisit the lead; notes without one never appear
/// in follow-up views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
  pub content:   String,
  #[serde(rename = "type")]
  pub kind:      NoteKind,
  pub date:      DateTime<Utc>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub follow_up: Option<DateTime<Utc>>,
}

// ─── Email log ───────────────────────────────────────────────────────────────

/// The historical record of one outbound email. Persisted only after the
/// dispatch provider confirmed the send.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRecord {
  pub to:      String,
  pub subject: String,
  pub text:    String,
  pub sent_at: DateTime<Utc>,
}

// ─── Lead ────────────────────────────────────────────────────────────────────

/// A prospective customer record. `lead_id`, `created_at`, and `updated_at`
/// are store-assigned; everything else comes from the caller, gated by
/// [`NewLead::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
  #[serde(rename = "id")]
  pub lead_id:    Uuid,
  pub name:       String,
  pub email:      String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone:      Option<String>,
  pub company:    String,
  pub linked_in:  String,
  pub status:     LeadStatus,
  pub tags:       Vec<String>,
  pub notes:      Vec<Note>,
  pub emails:     Vec<EmailRecord>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

// ─── Phone validation ────────────────────────────────────────────────────────

/// A phone value is accepted if it contains a run of 10 consecutive ASCII
/// digits anywhere in the string — "+1 (555) 867-5309 x12" fails, but
/// "5558675309 x12" passes. The whole field is deliberately not required to
/// be exactly 10 digits.
pub fn phone_has_digit_run(phone: &str) -> bool {
  phone
    .as_bytes()
    .windows(10)
    .any(|w| w.iter().all(u8::is_ascii_digit))
}

// ─── Input types ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::LeadStore::create_lead`]. The id and timestamps
/// are always set by the store; they are not accepted from callers.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
  pub name:      String,
  pub email:     String,
  #[serde(default)]
  pub phone:     Option<String>,
  pub company:   String,
  pub linked_in: String,
  #[serde(default)]
  pub status:    Option<LeadStatus>,
  #[serde(default)]
  pub tags:      Vec<String>,
  /// Optional seed notes, e.g. a single free-text note from a create form.
  #[serde(default)]
  pub notes:     Vec<NewNote>,
}

impl NewLead {
  /// The phone value with empty/whitespace-only input normalised to absent.
  pub fn normalized_phone(&self) -> Option<&str> {
    self
      .phone
      .as_deref()
      .map(str::trim)
      .filter(|p| !p.is_empty())
  }

  /// Field-level validation. Uniqueness of `email`/`phone` is the store's
  /// responsibility; everything checkable without a lookup happens here.
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::MissingField("name"));
    }
    if self.email.trim().is_empty() {
      return Err(Error::MissingField("email"));
    }
    if self.company.trim().is_empty() {
      return Err(Error::MissingField("company"));
    }
    if self.linked_in.trim().is_empty() {
      return Err(Error::MissingField("linkedIn"));
    }
    if let Some(phone) = self.normalized_phone()
      && !phone_has_digit_run(phone)
    {
      return Err(Error::InvalidPhone(phone.to_owned()));
    }
    for note in &self.notes {
      note.validate()?;
    }
    Ok(())
  }
}

/// Input to [`crate::store::LeadStore::append_note`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
  pub content:   String,
  #[serde(rename = "type")]
  pub kind:      NoteKind,
  #[serde(default)]
  pub date:      Option<DateTime<Utc>>,
  #[serde(default)]
  pub follow_up: Option<DateTime<Utc>>,
}

impl NewNote {
  pub fn validate(&self) -> Result<()> {
    if self.content.trim().is_empty() {
      return Err(Error::MissingField("content"));
    }
    Ok(())
  }

  /// Build the stored note, defaulting an absent `date` to `now`.
  pub fn into_note(self, now: DateTime<Utc>) -> Note {
    Note {
      content:   self.content,
      kind:      self.kind,
      date:      self.date.unwrap_or(now),
      follow_up: self.follow_up,
    }
  }
}

/// Input to [`crate::store::LeadStore::append_email`] — the record persisted
/// after a successful dispatch. `sent_at` is assigned by the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmail {
  pub to:      String,
  pub subject: String,
  pub text:    String,
}

impl NewEmail {
  pub fn validate(&self) -> Result<()> {
    if self.to.trim().is_empty() {
      return Err(Error::MissingField("to"));
    }
    if self.subject.trim().is_empty() {
      return Err(Error::MissingField("subject"));
    }
    if self.text.trim().is_empty() {
      return Err(Error::MissingField("text"));
    }
    Ok(())
  }

  pub fn into_record(self, now: DateTime<Utc>) -> EmailRecord {
    EmailRecord {
      to:      self.to,
      subject: self.subject,
      text:    self.text,
      sent_at: now,
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
