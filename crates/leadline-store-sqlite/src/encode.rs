//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Structured fields (tags,
//! notes, emails) are stored as compact JSON arrays. UUIDs are stored as
//! hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use leadline_core::lead::{EmailRecord, Lead, LeadStatus, Note};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(e.to_string()))
}

// ─── LeadStatus ──────────────────────────────────────────────────────────────

pub fn encode_status(status: LeadStatus) -> &'static str {
  match status {
    LeadStatus::New => "new",
    LeadStatus::Open => "open",
    LeadStatus::InProgress => "inprogress",
    LeadStatus::Qualified => "qualified",
    LeadStatus::Unqualified => "unqualified",
    LeadStatus::ClosedLost => "closedlost",
    LeadStatus::ClosedWon => "closedwon",
  }
}

pub fn decode_status(s: &str) -> Result<LeadStatus> {
  match s {
    "new" => Ok(LeadStatus::New),
    "open" => Ok(LeadStatus::Open),
    "inprogress" => Ok(LeadStatus::InProgress),
    "qualified" => Ok(LeadStatus::Qualified),
    "unqualified" => Ok(LeadStatus::Unqualified),
    "closedlost" => Ok(LeadStatus::ClosedLost),
    "closedwon" => Ok(LeadStatus::ClosedWon),
    other => Err(Error::Decode(format!("unknown lead status: {other:?}"))),
  }
}

// ─── JSON array columns ──────────────────────────────────────────────────────

pub fn encode_tags(tags: &[String]) -> Result<String> {
  Ok(serde_json::to_string(tags)?)
}

pub fn decode_tags(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_notes(notes: &[Note]) -> Result<String> {
  Ok(serde_json::to_string(notes)?)
}

pub fn decode_notes(s: &str) -> Result<Vec<Note>> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_emails(emails: &[EmailRecord]) -> Result<String> {
  Ok(serde_json::to_string(emails)?)
}

pub fn decode_emails(s: &str) -> Result<Vec<EmailRecord>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw strings read directly from a `leads` row.
pub struct RawLead {
  pub lead_id:    String,
  pub name:       String,
  pub email:      String,
  pub phone:      Option<String>,
  pub company:    String,
  pub linked_in:  String,
  pub status:     String,
  pub tags:       String,
  pub notes:      String,
  pub emails:     String,
  pub created_at: String,
  pub updated_at: String,
}

impl RawLead {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      lead_id:    row.get(0)?,
      name:       row.get(1)?,
      email:      row.get(2)?,
      phone:      row.get(3)?,
      company:    row.get(4)?,
      linked_in:  row.get(5)?,
      status:     row.get(6)?,
      tags:       row.get(7)?,
      notes:      row.get(8)?,
      emails:     row.get(9)?,
      created_at: row.get(10)?,
      updated_at: row.get(11)?,
    })
  }

  pub fn into_lead(self) -> Result<Lead> {
    Ok(Lead {
      lead_id:    decode_uuid(&self.lead_id)?,
      name:       self.name,
      email:      self.email,
      phone:      self.phone,
      company:    self.company,
      linked_in:  self.linked_in,
      status:     decode_status(&self.status)?,
      tags:       decode_tags(&self.tags)?,
      notes:      decode_notes(&self.notes)?,
      emails:     decode_emails(&self.emails)?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
