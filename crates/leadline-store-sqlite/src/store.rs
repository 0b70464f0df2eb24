//! [`SqliteStore`] — the SQLite implementation of [`LeadStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use leadline_core::{
  lead::{EmailRecord, Lead, LeadStatus, NewEmail, NewLead, NewNote, Note},
  query::LeadFilter,
  store::LeadStore,
};

use crate::{
  Error, Result,
  encode::{
    RawLead, encode_dt, encode_emails, encode_notes, encode_status,
    encode_tags, encode_uuid,
  },
  schema::SCHEMA,
};

const LEAD_COLUMNS: &str = "lead_id, name, email, phone, company, linked_in, \
                            status, tags, notes, emails, created_at, updated_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A lead store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Check that neither `email` nor `phone` is already taken by another
  /// lead. The UNIQUE constraints in the schema are the backstop; this
  /// pre-check exists to produce typed errors with the offending value.
  async fn check_unique(&self, email: &str, phone: Option<&str>) -> Result<()> {
    let email_owned = email.to_owned();
    let phone_owned = phone.map(str::to_owned);

    let (email_taken, phone_taken): (bool, bool) = self
      .conn
      .call(move |conn| {
        let email_taken: bool = conn
          .query_row(
            "SELECT 1 FROM leads WHERE email = ?1",
            rusqlite::params![email_owned],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        let phone_taken: bool = match &phone_owned {
          Some(p) => conn
            .query_row(
              "SELECT 1 FROM leads WHERE phone = ?1",
              rusqlite::params![p],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
          None => false,
        };

        Ok((email_taken, phone_taken))
      })
      .await?;

    if email_taken {
      return Err(Error::DuplicateEmail(email.to_owned()));
    }
    if phone_taken {
      return Err(Error::DuplicatePhone(phone.unwrap_or_default().to_owned()));
    }
    Ok(())
  }

  /// Insert a fully-built [`Lead`] into the `leads` table.
  async fn insert_lead(&self, lead: &Lead) -> Result<()> {
    let lead_id_str    = encode_uuid(lead.lead_id);
    let name           = lead.name.clone();
    let email          = lead.email.clone();
    let phone          = lead.phone.clone();
    let company        = lead.company.clone();
    let linked_in      = lead.linked_in.clone();
    let status_str     = encode_status(lead.status).to_owned();
    let tags_str       = encode_tags(&lead.tags)?;
    let notes_str      = encode_notes(&lead.notes)?;
    let emails_str     = encode_emails(&lead.emails)?;
    let created_at_str = encode_dt(lead.created_at);
    let updated_at_str = encode_dt(lead.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO leads (
             lead_id, name, email, phone, company, linked_in,
             status, tags, notes, emails, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
          rusqlite::params![
            lead_id_str,
            name,
            email,
            phone,
            company,
            linked_in,
            status_str,
            tags_str,
            notes_str,
            emails_str,
            created_at_str,
            updated_at_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn fetch_lead(&self, id: Uuid) -> Result<Option<Lead>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawLead> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {LEAD_COLUMNS} FROM leads WHERE lead_id = ?1"),
              rusqlite::params![id_str],
              RawLead::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawLead::into_lead).transpose()
  }

  /// Append one JSON-encoded item to an embedded array column in a single
  /// UPDATE, so concurrent appends never lose each other's writes. Returns
  /// the number of rows changed (0 when the lead is absent).
  async fn append_json_item(
    &self,
    id: Uuid,
    column: &'static str,
    item_json: String,
  ) -> Result<usize> {
    let id_str  = encode_uuid(id);
    let now_str = encode_dt(Utc::now());
    let sql = format!(
      "UPDATE leads
          SET {column} = json_insert({column}, '$[#]', json(?2)),
              updated_at = ?3
        WHERE lead_id = ?1"
    );

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(&sql, rusqlite::params![id_str, item_json, now_str])?)
      })
      .await?;

    Ok(changed)
  }
}

// ─── LeadStore impl ──────────────────────────────────────────────────────────

impl LeadStore for SqliteStore {
  type Error = Error;

  async fn create_lead(&self, input: NewLead) -> Result<Lead> {
    input.validate()?;

    let phone = input.normalized_phone().map(str::to_owned);
    self.check_unique(&input.email, phone.as_deref()).await?;

    let now = Utc::now();
    let lead = Lead {
      lead_id: Uuid::new_v4(),
      name: input.name,
      email: input.email,
      phone,
      company: input.company,
      linked_in: input.linked_in,
      status: input.status.unwrap_or_default(),
      tags: input.tags,
      notes: input
        .notes
        .into_iter()
        .map(|note| note.into_note(now))
        .collect(),
      emails: Vec::new(),
      created_at: now,
      updated_at: now,
    };

    self.insert_lead(&lead).await?;
    Ok(lead)
  }

  async fn get_lead(&self, id: Uuid) -> Result<Option<Lead>> {
    self.fetch_lead(id).await
  }

  async fn list_leads(&self, filter: &LeadFilter) -> Result<Vec<Lead>> {
    let raws: Vec<RawLead> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {LEAD_COLUMNS} FROM leads ORDER BY created_at DESC"
        ))?;
        let rows = stmt
          .query_map([], RawLead::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut leads: Vec<Lead> = raws
      .into_iter()
      .map(RawLead::into_lead)
      .collect::<Result<_>>()?;

    if !filter.is_empty() {
      leads.retain(|lead| filter.matches(lead));
    }

    Ok(leads)
  }

  async fn update_status(&self, id: Uuid, status: LeadStatus) -> Result<Lead> {
    let id_str     = encode_uuid(id);
    let status_str = encode_status(status).to_owned();
    let now_str    = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE leads SET status = ?2, updated_at = ?3 WHERE lead_id = ?1",
          rusqlite::params![id_str, status_str, now_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::LeadNotFound(id));
    }

    self.fetch_lead(id).await?.ok_or(Error::LeadNotFound(id))
  }

  async fn append_note(&self, id: Uuid, note: NewNote) -> Result<Note> {
    note.validate()?;

    let stored = note.into_note(Utc::now());
    let item_json = serde_json::to_string(&stored)?;

    let changed = self.append_json_item(id, "notes", item_json).await?;
    if changed == 0 {
      return Err(Error::LeadNotFound(id));
    }

    Ok(stored)
  }

  async fn append_email(&self, id: Uuid, email: NewEmail) -> Result<EmailRecord> {
    email.validate()?;

    let record = email.into_record(Utc::now());
    let item_json = serde_json::to_string(&record)?;

    let changed = self.append_json_item(id, "emails", item_json).await?;
    if changed == 0 {
      return Err(Error::LeadNotFound(id));
    }

    Ok(record)
  }

  async fn delete_lead(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM leads WHERE lead_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::LeadNotFound(id));
    }
    Ok(())
  }
}
