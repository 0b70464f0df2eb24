//! [`SendGridMailer`] — dispatch through the SendGrid v3 mail-send API.

use std::time::Duration;

use serde_json::json;

use crate::{DispatchError, Mailer, MailerConfig, OutboundMessage};

const SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// A [`Mailer`] backed by SendGrid.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct SendGridMailer {
  client: reqwest::Client,
  config: MailerConfig,
}

impl SendGridMailer {
  /// Build a mailer, validating the configuration up front. A missing API
  /// key or sender address fails here, before any send is attempted.
  pub fn new(config: MailerConfig) -> Result<Self, DispatchError> {
    config.validate()?;
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }
}

impl Mailer for SendGridMailer {
  async fn send(&self, message: &OutboundMessage) -> Result<(), DispatchError> {
    let body = json!({
      "personalizations": [{ "to": [{ "email": message.to }] }],
      "from": { "email": self.config.from_email },
      "subject": message.subject,
      "content": [{ "type": "text/plain", "value": message.text }],
    });

    let resp = self
      .client
      .post(SEND_URL)
      .bearer_auth(&self.config.api_key)
      .json(&body)
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(DispatchError::Rejected {
        status: status.as_u16(),
        body,
      });
    }

    Ok(())
  }
}
