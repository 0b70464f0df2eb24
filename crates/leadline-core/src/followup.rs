//! Follow-up derivation — a stateless, read-time computation.
//!
//! Notes carrying a `follow_up` timestamp are flattened across all leads into
//! a single sequence, then bucketed into "due today" using a half-open local
//! calendar-day interval. Nothing here is cached; the caller recomputes from
//! the current lead set on every read.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::lead::{Lead, Note};

/// One follow-up-bearing note, annotated with enough of its lead to render a
/// reminder list without a second lookup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
  pub lead_id:      Uuid,
  pub lead_name:    String,
  pub lead_company: String,
  #[serde(flatten)]
  pub note:         Note,
}

/// Flatten every note with a `follow_up` into a single sequence, in lead
/// order × note order. Leads without notes contribute nothing. The result is
/// the "all follow-ups" view and is not independently sorted.
pub fn collect(leads: &[Lead]) -> Vec<FollowUp> {
  leads
    .iter()
    .flat_map(|lead| {
      lead
        .notes
        .iter()
        .filter(|note| note.follow_up.is_some())
        .map(|note| FollowUp {
          lead_id:      lead.lead_id,
          lead_name:    lead.name.clone(),
          lead_company: lead.company.clone(),
          note:         note.clone(),
        })
    })
    .collect()
}

/// The subset of `all` due today (server-local time), sorted ascending by
/// `follow_up`. The sort is stable, so ties keep their flattening order.
pub fn due_today(all: &[FollowUp]) -> Vec<FollowUp> {
  due_on(all, Local::now().date_naive())
}

/// "Due on `date`" means `follow_up` falls in the half-open interval
/// `[midnight of date, midnight of date + 1)` in local time — equivalently,
/// its local calendar date equals `date`.
pub fn due_on(all: &[FollowUp], date: NaiveDate) -> Vec<FollowUp> {
  let mut due: Vec<FollowUp> = all
    .iter()
    .filter(|f| {
      f.note
        .follow_up
        .is_some_and(|at| at.with_timezone(&Local).date_naive() == date)
    })
    .cloned()
    .collect();
  due.sort_by_key(|f| f.note.follow_up);
  due
}

#[cfg(test)]
mod tests {
  use chrono::{DateTime, Days, TimeZone, Utc};

  use super::*;
  use crate::lead::{EmailRecord, LeadStatus, NoteKind};

  fn note(follow_up: Option<DateTime<Local>>) -> Note {
    Note {
      content:   "ping them".into(),
      kind:      NoteKind::Call,
      date:      Utc::now(),
      follow_up: follow_up.map(|at| at.with_timezone(&Utc)),
    }
  }

  fn lead_with_notes(name: &str, notes: Vec<Note>) -> Lead {
    let now = Utc::now();
    Lead {
      lead_id:    Uuid::new_v4(),
      name:       name.into(),
      email:      format!("{name}@test.test"),
      phone:      None,
      company:    "Hooli".into(),
      linked_in:  "https://linkedin.com/company/hooli".into(),
      status:     LeadStatus::New,
      tags:       vec![],
      notes,
      emails:     Vec::<EmailRecord>::new(),
      created_at: now,
      updated_at: now,
    }
  }

  #[test]
  fn leads_without_follow_ups_contribute_nothing() {
    let leads = vec![
      lead_with_notes("a", vec![]),
      lead_with_notes("b", vec![note(None)]),
    ];
    assert!(collect(&leads).is_empty());
  }

  #[test]
  fn only_todays_notes_are_due_and_all_are_collected() {
    let now = Local::now();
    let yesterday = now.checked_sub_days(Days::new(1)).unwrap();
    let tomorrow = now.checked_add_days(Days::new(1)).unwrap();

    let leads = vec![
      lead_with_notes("past", vec![note(Some(yesterday))]),
      lead_with_notes("today", vec![note(Some(now))]),
      lead_with_notes("future", vec![note(Some(tomorrow))]),
    ];

    let all = collect(&leads);
    assert_eq!(all.len(), 3);

    let due = due_on(&all, now.date_naive());
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].lead_name, "today");
    assert_eq!(due[0].lead_company, "Hooli");
  }

  #[test]
  fn start_of_tomorrow_is_excluded() {
    let today = Local::now().date_naive();
    let next_midnight = Local
      .from_local_datetime(
        &today
          .checked_add_days(Days::new(1))
          .unwrap()
          .and_hms_opt(0, 0, 0)
          .unwrap(),
      )
      .single()
      .unwrap();

    let leads = vec![lead_with_notes("edge", vec![note(Some(next_midnight))])];
    let all = collect(&leads);
    assert_eq!(all.len(), 1);
    assert!(due_on(&all, today).is_empty());
  }

  #[test]
  fn due_list_is_sorted_ascending_by_follow_up() {
    let today = Local::now().date_naive();
    let at = |h| {
      Local
        .from_local_datetime(&today.and_hms_opt(h, 0, 0).unwrap())
        .single()
        .unwrap()
    };

    let leads = vec![
      lead_with_notes("late", vec![note(Some(at(15)))]),
      lead_with_notes("early", vec![note(Some(at(9)))]),
      lead_with_notes("noon", vec![note(Some(at(12)))]),
    ];

    let due = due_on(&collect(&leads), today);
    let order: Vec<&str> =
      due.iter().map(|f| f.lead_name.as_str()).collect();
    assert_eq!(order, vec!["early", "noon", "late"]);
  }

  #[test]
  fn flattening_preserves_lead_then_note_order() {
    let now = Local::now();
    let leads = vec![
      lead_with_notes("first", vec![note(Some(now)), note(Some(now))]),
      lead_with_notes("second", vec![note(Some(now))]),
    ];
    let all = collect(&leads);
    let order: Vec<&str> =
      all.iter().map(|f| f.lead_name.as_str()).collect();
    assert_eq!(order, vec!["first", "first", "second"]);
  }
}
