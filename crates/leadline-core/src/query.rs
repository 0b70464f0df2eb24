//! The lead list filter — zero or more optional criteria ANDed together.

use crate::lead::{Lead, LeadStatus};

/// Parameters for [`crate::store::LeadStore::list_leads`].
///
/// Criteria combine with logical AND; within `search` the match is `name` OR
/// `email`. An empty filter matches every lead.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
  /// Exact status match.
  pub status: Option<LeadStatus>,
  /// Lead matches if its tag list contains at least one of these.
  pub tags:   Vec<String>,
  /// Case-insensitive substring match against `name` or `email`.
  pub search: Option<String>,
}

impl LeadFilter {
  pub fn is_empty(&self) -> bool {
    self.status.is_none() && self.tags.is_empty() && self.search.is_none()
  }

  /// Evaluate the whole predicate against one lead.
  pub fn matches(&self, lead: &Lead) -> bool {
    if let Some(status) = self.status
      && lead.status != status
    {
      return false;
    }

    if !self.tags.is_empty()
      && !self.tags.iter().any(|t| lead.tags.contains(t))
    {
      return false;
    }

    if let Some(search) = &self.search {
      let needle = search.to_lowercase();
      let in_name = lead.name.to_lowercase().contains(&needle);
      let in_email = lead.email.to_lowercase().contains(&needle);
      if !in_name && !in_email {
        return false;
      }
    }

    true
  }
}
