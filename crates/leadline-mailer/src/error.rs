//! Error type for `leadline-mailer`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
  #[error("email provider API key is not configured")]
  MissingApiKey,

  #[error("sender email address is not configured")]
  MissingSender,

  #[error("could not reach the email provider: {0}")]
  Transport(#[from] reqwest::Error),

  /// The provider answered with a non-success status; `body` carries the
  /// provider's own error detail verbatim.
  #[error("email provider rejected the message ({status}): {body}")]
  Rejected { status: u16, body: String },
}

impl DispatchError {
  /// The provider's HTTP status code, when one was received.
  pub fn provider_status(&self) -> Option<u16> {
    match self {
      Self::Rejected { status, .. } => Some(*status),
      _ => None,
    }
  }
}
