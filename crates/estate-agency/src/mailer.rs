//! [`Mailer`], the production [`Notifier`].
//!
//! Messages are handed to an HTTP mail relay as JSON. With no relay
//! configured they are only logged, which keeps a fresh install usable
//! before mail is set up.

use std::time::Duration;

use estate_core::notify::{Email, Notifier};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum MailError {
  #[error("mail relay request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("mail relay rejected the message ({status}): {body}")]
  Rejected { status: u16, body: String },
}

/// Connection settings for the mail relay.
#[derive(Debug, Clone, Deserialize)]
pub struct RelaySettings {
  /// URL the message is POSTed to.
  pub endpoint:     String,
  /// Sent as a bearer token when present.
  #[serde(default)]
  pub api_key:      Option<String>,
  /// The `from` address.
  pub sender:       String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 { 10 }

/// The JSON body the relay receives.
#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
  from:    &'a str,
  to:      &'a str,
  subject: &'a str,
  html:    &'a str,
}

/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct Mailer {
  relay: Option<Relay>,
}

#[derive(Clone)]
struct Relay {
  client:   Client,
  settings: RelaySettings,
}

impl Mailer {
  /// A mailer that only logs what it would have sent.
  pub fn log_only() -> Self { Self { relay: None } }

  pub fn relay(settings: RelaySettings) -> Result<Self, MailError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(settings.timeout_secs))
      .build()?;
    Ok(Self { relay: Some(Relay { client, settings }) })
  }

  pub fn is_configured(&self) -> bool { self.relay.is_some() }
}

impl Notifier for Mailer {
  type Error = MailError;

  async fn send(&self, email: Email) -> Result<(), MailError> {
    let Some(relay) = &self.relay else {
      info!(
        to = %email.to,
        subject = %email.subject,
        "mail relay not configured; notification not sent"
      );
      return Ok(());
    };

    let message = RelayMessage {
      from:    &relay.settings.sender,
      to:      &email.to,
      subject: &email.subject,
      html:    &email.html_body,
    };
    let mut request = relay
      .client
      .post(&relay.settings.endpoint)
      .header("Idempotency-Key", Uuid::new_v4().to_string())
      .json(&message);
    if let Some(key) = &relay.settings.api_key {
      request = request.bearer_auth(key);
    }

    let resp = request.send().await?;
    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(MailError::Rejected { status: status.as_u16(), body });
    }

    debug!(to = %email.to, %status, "mail relay accepted message");
    Ok(())
  }
}
