// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Email notifications
//!
//! Each notification opens its own SMTP session (STARTTLS, then AUTH),
//! sends one plain-text message and closes the session when dropped.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::{debug, info};

use super::config::{parse_mailbox, ConfigError, EmailConfig};

/// Subject line of change alerts
pub const CHANGE_SUBJECT: &str = "Website Change Detected";

/// Body of a change alert carrying the new region text
pub fn change_body(text: &str) -> String {
    format!("The specific section of the website has changed:\n\n{}", text)
}

/// Email delivery errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// Sender or receiver address rejected
    #[error("Invalid address: {0}")]
    Address(String),

    /// Message could not be assembled
    #[error("Could not build message: {0}")]
    Message(String),

    /// Connection, STARTTLS, authentication or submission failed
    #[error("SMTP transport error: {0}")]
    Transport(String),
}

/// A plain-text email, built fresh for every notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub sender: String,
    pub receiver: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    /// Render as a MIME message with `From`, `To` and `Subject` headers
    pub fn to_message(&self) -> Result<Message, NotifyError> {
        let from: Mailbox = self
            .sender
            .parse()
            .map_err(|e: lettre::address::AddressError| NotifyError::Address(e.to_string()))?;
        let to: Mailbox = self
            .receiver
            .parse()
            .map_err(|e: lettre::address::AddressError| NotifyError::Address(e.to_string()))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(self.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(self.body.clone())
            .map_err(|e| NotifyError::Message(e.to_string()))
    }
}

/// Delivers change alerts
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send one message with `subject` and plain-text `body`
    async fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// `Notifier` that submits mail to an SMTP relay over STARTTLS
pub struct SmtpNotifier {
    sender: String,
    receiver: String,
    credentials: Credentials,
    host: String,
    port: u16,
}

impl SmtpNotifier {
    /// Build a notifier from email settings already checked by
    /// `EmailConfig::validate`
    ///
    /// Only unpacks the credentials; a missing one still surfaces as
    /// `MissingVar`. Opens no connection.
    pub fn new(config: &EmailConfig) -> Result<Self, ConfigError> {
        let sender = config
            .sender
            .clone()
            .ok_or(ConfigError::MissingVar("EMAIL_SENDER"))?;
        let password = config
            .password
            .clone()
            .ok_or(ConfigError::MissingVar("EMAIL_PASSWORD"))?;
        let receiver = config
            .receiver
            .clone()
            .ok_or(ConfigError::MissingVar("EMAIL_RECEIVER"))?;

        // Login uses the bare address even if the sender carries a display name
        let login = parse_mailbox(&sender, "EMAIL_SENDER")?.email.to_string();

        Ok(Self {
            sender: sender.trim().to_string(),
            receiver: receiver.trim().to_string(),
            credentials: Credentials::new(login, password),
            host: config.smtp_host.trim().to_string(),
            port: config.smtp_port,
        })
    }

    /// Assemble the message for one notification
    pub fn compose(&self, subject: &str, body: &str) -> EmailMessage {
        EmailMessage {
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
            subject: subject.to_string(),
            body: body.to_string(),
        }
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        let message = self.compose(subject, body).to_message()?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(|e| NotifyError::Transport(e.to_string()))?
            .port(self.port)
            .credentials(self.credentials.clone())
            .build();

        debug!("Submitting alert via {}:{}", self.host, self.port);
        mailer
            .send(message)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        info!("Alert email sent to {}", self.receiver);
        Ok(())
    }
}
