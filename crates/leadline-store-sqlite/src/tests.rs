//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::Utc;
use leadline_core::{
  lead::{LeadStatus, NewEmail, NewLead, NewNote, NoteKind},
  query::LeadFilter,
  store::LeadStore,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_lead(name: &str, email: &str) -> NewLead {
  NewLead {
    name:      name.to_owned(),
    email:     email.to_owned(),
    phone:     None,
    company:   "Acme".to_owned(),
    linked_in: "https://linkedin.com/company/acme".to_owned(),
    status:    None,
    tags:      Vec::new(),
    notes:     Vec::new(),
  }
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_get_round_trips_required_fields() {
  let s = store().await;

  let created = s.create_lead(new_lead("Ada", "ada@acme.test")).await.unwrap();
  assert_eq!(created.status, LeadStatus::New);
  assert_eq!(created.created_at, created.updated_at);

  let fetched = s.get_lead(created.lead_id).await.unwrap().unwrap();
  assert_eq!(fetched.lead_id, created.lead_id);
  assert_eq!(fetched.name, "Ada");
  assert_eq!(fetched.email, "ada@acme.test");
  assert_eq!(fetched.company, "Acme");
  assert_eq!(fetched.linked_in, "https://linkedin.com/company/acme");
  assert_eq!(fetched.status, LeadStatus::New);
  assert!(fetched.notes.is_empty());
  assert!(fetched.emails.is_empty());
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get_lead(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn create_seeds_notes_and_defaults_their_dates() {
  let s = store().await;

  let mut input = new_lead("Ada", "ada@acme.test");
  input.notes = vec![NewNote {
    content:   "met at the conference".to_owned(),
    kind:      NoteKind::Other,
    date:      None,
    follow_up: None,
  }];

  let before = Utc::now();
  let created = s.create_lead(input).await.unwrap();
  let after = Utc::now();

  assert_eq!(created.notes.len(), 1);
  let date = created.notes[0].date;
  assert!(date >= before && date <= after);
}

#[tokio::test]
async fn create_with_explicit_status_keeps_it() {
  let s = store().await;

  let mut input = new_lead("Ada", "ada@acme.test");
  input.status = Some(LeadStatus::Qualified);

  let created = s.create_lead(input).await.unwrap();
  assert_eq!(created.status, LeadStatus::Qualified);
}

// ─── Validation / uniqueness ─────────────────────────────────────────────────

#[tokio::test]
async fn create_with_empty_name_is_rejected() {
  let s = store().await;
  let err = s
    .create_lead(new_lead("  ", "ada@acme.test"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(_)), "got {err:?}");
}

#[tokio::test]
async fn duplicate_email_is_rejected_regardless_of_other_fields() {
  let s = store().await;
  s.create_lead(new_lead("Ada", "shared@acme.test")).await.unwrap();

  let mut second = new_lead("Grace", "shared@acme.test");
  second.company = "Globex".to_owned();

  let err = s.create_lead(second).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateEmail(e) if e == "shared@acme.test"));
}

#[tokio::test]
async fn duplicate_phone_is_rejected() {
  let s = store().await;

  let mut first = new_lead("Ada", "ada@acme.test");
  first.phone = Some("5558675309".to_owned());
  s.create_lead(first).await.unwrap();

  let mut second = new_lead("Grace", "grace@acme.test");
  second.phone = Some("5558675309".to_owned());

  let err = s.create_lead(second).await.unwrap_err();
  assert!(matches!(err, Error::DuplicatePhone(p) if p == "5558675309"));
}

#[tokio::test]
async fn phone_needs_a_ten_digit_run() {
  let s = store().await;

  let mut ok = new_lead("Ada", "ada@acme.test");
  ok.phone = Some("ext. 5558675309 (office)".to_owned());
  let created = s.create_lead(ok).await.unwrap();
  assert_eq!(created.phone.as_deref(), Some("ext. 5558675309 (office)"));

  let mut bad = new_lead("Grace", "grace@acme.test");
  bad.phone = Some("555-867-5309".to_owned());
  let err = s.create_lead(bad).await.unwrap_err();
  assert!(
    matches!(&err, Error::Core(leadline_core::Error::InvalidPhone(_))),
    "got {err:?}"
  );
}

// ─── List / filter ───────────────────────────────────────────────────────────

#[tokio::test]
async fn list_orders_by_created_at_descending() {
  let s = store().await;
  s.create_lead(new_lead("first", "first@x.test")).await.unwrap();
  s.create_lead(new_lead("second", "second@x.test")).await.unwrap();
  s.create_lead(new_lead("third", "third@x.test")).await.unwrap();

  let all = s.list_leads(&LeadFilter::default()).await.unwrap();
  let names: Vec<&str> = all.iter().map(|l| l.name.as_str()).collect();
  assert_eq!(names, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn list_filters_by_status() {
  let s = store().await;
  let qualified = s.create_lead(new_lead("A", "a@x.test")).await.unwrap();
  s.create_lead(new_lead("B", "b@x.test")).await.unwrap();
  s.update_status(qualified.lead_id, LeadStatus::Qualified)
    .await
    .unwrap();

  let filter = LeadFilter {
    status: Some(LeadStatus::Qualified),
    ..Default::default()
  };
  let hits = s.list_leads(&filter).await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].lead_id, qualified.lead_id);
}

#[tokio::test]
async fn list_searches_name_and_email_case_insensitively() {
  let s = store().await;
  s.create_lead(new_lead("Acme Industries", "info@corp.test")).await.unwrap();
  s.create_lead(new_lead("Contact", "sales@ACME.test")).await.unwrap();
  s.create_lead(new_lead("Globex", "info@globex.test")).await.unwrap();

  let filter = LeadFilter {
    search: Some("acme".to_owned()),
    ..Default::default()
  };
  let hits = s.list_leads(&filter).await.unwrap();
  assert_eq!(hits.len(), 2);
  assert!(hits.iter().all(|l| l.name != "Globex"));
}

#[tokio::test]
async fn list_matches_any_of_the_given_tags() {
  let s = store().await;

  let mut tagged = new_lead("A", "a@x.test");
  tagged.tags = vec!["vip".to_owned(), "conference".to_owned()];
  s.create_lead(tagged).await.unwrap();
  s.create_lead(new_lead("B", "b@x.test")).await.unwrap();

  let filter = LeadFilter {
    tags: vec!["vip".to_owned(), "webinar".to_owned()],
    ..Default::default()
  };
  let hits = s.list_leads(&filter).await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "A");
}

// ─── Status updates ──────────────────────────────────────────────────────────

#[tokio::test]
async fn update_status_replaces_and_bumps_updated_at() {
  let s = store().await;
  let created = s.create_lead(new_lead("Ada", "ada@acme.test")).await.unwrap();

  let updated = s
    .update_status(created.lead_id, LeadStatus::InProgress)
    .await
    .unwrap();
  assert_eq!(updated.status, LeadStatus::InProgress);
  assert!(updated.updated_at > created.updated_at);
  assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn update_status_of_missing_lead_errors() {
  let s = store().await;
  let err = s
    .update_status(Uuid::new_v4(), LeadStatus::Open)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::LeadNotFound(_)));
}

// ─── Note / email appends ────────────────────────────────────────────────────

#[tokio::test]
async fn append_note_grows_the_ledger_in_order() {
  let s = store().await;
  let created = s.create_lead(new_lead("Ada", "ada@acme.test")).await.unwrap();

  for content in ["first call", "second call"] {
    s.append_note(created.lead_id, NewNote {
      content:   content.to_owned(),
      kind:      NoteKind::Call,
      date:      None,
      follow_up: None,
    })
    .await
    .unwrap();
  }

  let lead = s.get_lead(created.lead_id).await.unwrap().unwrap();
  assert_eq!(lead.notes.len(), 2);
  assert_eq!(lead.notes[0].content, "first call");
  assert_eq!(lead.notes[1].content, "second call");
  assert_eq!(lead.notes[0].kind, NoteKind::Call);
  assert!(lead.updated_at > created.updated_at);
}

#[tokio::test]
async fn append_note_with_empty_content_is_rejected() {
  let s = store().await;
  let created = s.create_lead(new_lead("Ada", "ada@acme.test")).await.unwrap();

  let err = s
    .append_note(created.lead_id, NewNote {
      content:   String::new(),
      kind:      NoteKind::Meeting,
      date:      None,
      follow_up: None,
    })
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Core(leadline_core::Error::MissingField("content"))
  ));

  let lead = s.get_lead(created.lead_id).await.unwrap().unwrap();
  assert!(lead.notes.is_empty());
}

#[tokio::test]
async fn append_note_to_missing_lead_errors() {
  let s = store().await;
  let err = s
    .append_note(Uuid::new_v4(), NewNote {
      content:   "hello".to_owned(),
      kind:      NoteKind::Email,
      date:      None,
      follow_up: None,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::LeadNotFound(_)));
}

#[tokio::test]
async fn append_note_keeps_follow_up_timestamp() {
  let s = store().await;
  let created = s.create_lead(new_lead("Ada", "ada@acme.test")).await.unwrap();

  let follow_up = Utc::now();
  let stored = s
    .append_note(created.lead_id, NewNote {
      content:   "check back".to_owned(),
      kind:      NoteKind::Call,
      date:      None,
      follow_up: Some(follow_up),
    })
    .await
    .unwrap();
  assert_eq!(stored.follow_up, Some(follow_up));

  let lead = s.get_lead(created.lead_id).await.unwrap().unwrap();
  assert_eq!(lead.notes[0].follow_up, Some(follow_up));
}

#[tokio::test]
async fn append_email_records_history_with_sent_at() {
  let s = store().await;
  let created = s.create_lead(new_lead("Ada", "ada@acme.test")).await.unwrap();

  let before = Utc::now();
  let record = s
    .append_email(created.lead_id, NewEmail {
      to:      "ada@acme.test".to_owned(),
      subject: "hello".to_owned(),
      text:    "following up on our call".to_owned(),
    })
    .await
    .unwrap();
  assert!(record.sent_at >= before);

  let lead = s.get_lead(created.lead_id).await.unwrap().unwrap();
  assert_eq!(lead.emails.len(), 1);
  assert_eq!(lead.emails[0].subject, "hello");
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_the_lead_and_its_sub_resources() {
  let s = store().await;
  let created = s.create_lead(new_lead("Ada", "ada@acme.test")).await.unwrap();
  s.append_note(created.lead_id, NewNote {
    content:   "to be deleted".to_owned(),
    kind:      NoteKind::Other,
    date:      None,
    follow_up: None,
  })
  .await
  .unwrap();

  s.delete_lead(created.lead_id).await.unwrap();
  assert!(s.get_lead(created.lead_id).await.unwrap().is_none());

  // The email/phone become free for reuse once the lead is gone.
  s.create_lead(new_lead("Ada again", "ada@acme.test")).await.unwrap();
}

#[tokio::test]
async fn delete_missing_lead_signals_not_found() {
  let s = store().await;
  let err = s.delete_lead(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::LeadNotFound(_)));
}
