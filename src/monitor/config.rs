// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the change monitor
//!
//! Loaded once per run from the environment (optionally overridden by CLI
//! flags), validated before any network client is built, never mutated after.

use std::env;
use std::path::PathBuf;

use lettre::message::Mailbox;
use thiserror::Error;
use url::Url;

use super::extractor::TargetSelector;

/// Page watched when `WATCH_URL` is unset
pub const DEFAULT_URL: &str = "https://www.ufmg.br/copeve/site_novo/?pagina=1";
/// Region watched when `WATCH_TARGET` is unset
pub const DEFAULT_TARGET: &str = "div#home";
/// State file used when `WATCH_STATE_FILE` is unset
pub const DEFAULT_STATE_FILE: &str = "webpage_checksum.txt";
/// Mail submission relay
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
/// STARTTLS submission port
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Configuration errors, all detected before any I/O
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is absent or empty
    #[error("Missing email configuration: {0} is not set")]
    MissingVar(&'static str),

    /// An email address does not parse
    #[error("Invalid address in {var}: {reason}")]
    InvalidAddress {
        /// Variable holding the address
        var: &'static str,
        /// Parser message
        reason: String,
    },

    /// The watched URL is not an absolute http(s) URL
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl {
        /// Offending URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The target selector does not parse
    #[error("Invalid target selector {selector}: {reason}")]
    InvalidSelector {
        /// Offending selector
        selector: String,
        /// Parser message
        reason: String,
    },

    /// SMTP relay host or port unusable
    #[error("Invalid SMTP relay: {0}")]
    InvalidRelay(String),
}

/// Email credentials and relay settings
#[derive(Clone, Default)]
pub struct EmailConfig {
    /// `EMAIL_SENDER`: From address, also the SMTP login
    pub sender: Option<String>,
    /// `EMAIL_PASSWORD`: SMTP password or app token
    pub password: Option<String>,
    /// `EMAIL_RECEIVER`: To address
    pub receiver: Option<String>,
    /// `SMTP_HOST` (default: smtp.gmail.com)
    pub smtp_host: String,
    /// `SMTP_PORT` (default: 587)
    pub smtp_port: u16,
}

// Hand-written so the password never reaches the logs
impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("sender", &self.sender)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("receiver", &self.receiver)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}

impl EmailConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            sender: non_empty("EMAIL_SENDER"),
            password: non_empty("EMAIL_PASSWORD"),
            receiver: non_empty("EMAIL_RECEIVER"),
            smtp_host: non_empty("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port: lookup("SMTP_PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
        }
    }

    /// Check that every credential is present and both addresses parse
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sender = require(&self.sender, "EMAIL_SENDER")?;
        require(&self.password, "EMAIL_PASSWORD")?;
        let receiver = require(&self.receiver, "EMAIL_RECEIVER")?;

        parse_mailbox(sender, "EMAIL_SENDER")?;
        parse_mailbox(receiver, "EMAIL_RECEIVER")?;

        if self.smtp_host.trim().is_empty() {
            return Err(ConfigError::InvalidRelay("host is empty".to_string()));
        }
        if self.smtp_port == 0 {
            return Err(ConfigError::InvalidRelay("port must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Configuration for one monitoring run
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// `WATCH_URL`: page to fetch
    pub url: String,
    /// `WATCH_TARGET`: CSS selector of the watched region
    pub target: String,
    /// `WATCH_STATE_FILE`: where the last fingerprint lives
    pub state_file: PathBuf,
    /// Notification settings
    pub email: EmailConfig,
}

impl WatchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            url: non_empty("WATCH_URL").unwrap_or_else(|| DEFAULT_URL.to_string()),
            target: non_empty("WATCH_TARGET").unwrap_or_else(|| DEFAULT_TARGET.to_string()),
            state_file: non_empty("WATCH_STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE)),
            email: EmailConfig::from_lookup(&lookup),
        }
    }

    /// Validate configuration values
    ///
    /// Credentials are checked first so a missing secret is always the
    /// reported error, whatever else is wrong.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.email.validate()?;

        let parsed = Url::parse(&self.url).map_err(|e| ConfigError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;
        if !["http", "https"].contains(&parsed.scheme()) {
            return Err(ConfigError::InvalidUrl {
                url: self.url.clone(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        TargetSelector::parse(&self.target)?;
        Ok(())
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            target: DEFAULT_TARGET.to_string(),
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            email: EmailConfig {
                smtp_host: DEFAULT_SMTP_HOST.to_string(),
                smtp_port: DEFAULT_SMTP_PORT,
                ..EmailConfig::default()
            },
        }
    }
}

fn require<'a>(value: &'a Option<String>, var: &'static str) -> Result<&'a str, ConfigError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingVar(var))
}

pub(crate) fn parse_mailbox(value: &str, var: &'static str) -> Result<Mailbox, ConfigError> {
    value
        .trim()
        .parse::<Mailbox>()
        .map_err(|e| ConfigError::InvalidAddress {
            var,
            reason: e.to_string(),
        })
}
