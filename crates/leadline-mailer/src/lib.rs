//! Email dispatch for Leadline.
//!
//! The store only keeps the historical record of an outbound email; actually
//! delivering it is this crate's job. The core contract is deliberately thin:
//! a [`Mailer`] either succeeds or reports a [`DispatchError`] with enough
//! provider detail to surface to the caller. No retries, no queueing.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
#![allow(async_fn_in_trait)]

pub mod error;
pub mod sendgrid;

pub use error::DispatchError;
pub use sendgrid::SendGridMailer;

use std::future::Future;

use serde::Serialize;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Dispatch provider credentials, usually environment-supplied.
///
/// Validated eagerly at mailer construction so a missing key or sender is a
/// startup failure, not a surprise on the first send.
#[derive(Debug, Clone)]
pub struct MailerConfig {
  /// Provider API key.
  pub api_key:    String,
  /// Verified sender address used as the `from` on every message.
  pub from_email: String,
}

impl MailerConfig {
  pub fn validate(&self) -> Result<(), DispatchError> {
    if self.api_key.trim().is_empty() {
      return Err(DispatchError::MissingApiKey);
    }
    if self.from_email.trim().is_empty() {
      return Err(DispatchError::MissingSender);
    }
    Ok(())
  }
}

// ─── Message ─────────────────────────────────────────────────────────────────

/// One outbound message. The sender address comes from [`MailerConfig`], not
/// from the caller.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMessage {
  pub to:      String,
  pub subject: String,
  pub text:    String,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an email dispatch provider.
///
/// Implementations must treat a returned `Ok(())` as "the provider accepted
/// the message" — callers persist the email record only after that signal.
pub trait Mailer: Send + Sync {
  fn send<'a>(
    &'a self,
    message: &'a OutboundMessage,
  ) -> impl Future<Output = Result<(), DispatchError>> + Send + 'a;
}
