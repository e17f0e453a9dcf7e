// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for the change monitor

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use super::config::ConfigError;
use super::fetcher::FetchError;
use super::fingerprint::Fingerprint;

/// Text of the watched region, recomputed on every run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    /// URL the snapshot was taken from
    pub url: String,
    /// Visible text of the target element, whitespace collapsed
    pub text: String,
}

/// Which branch a completed run took
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No previous fingerprint existed; the current one was stored
    Baseline {
        /// Fingerprint that became the baseline
        fingerprint: Fingerprint,
    },

    /// Content differs from the stored fingerprint; state was updated
    Changed {
        /// Fingerprint stored before this run
        previous: Fingerprint,
        /// Fingerprint stored by this run
        current: Fingerprint,
        /// Whether the notification email went out
        notified: bool,
    },

    /// Content matches the stored fingerprint; nothing was touched
    Unchanged {
        /// The matching fingerprint
        fingerprint: Fingerprint,
    },
}

impl RunOutcome {
    /// Whether the state file was written during the run
    pub fn state_written(&self) -> bool {
        !matches!(self, Self::Unchanged { .. })
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baseline { fingerprint } => write!(f, "baseline stored ({})", fingerprint),
            Self::Changed {
                current, notified, ..
            } => {
                let delivery = if *notified { "sent" } else { "failed" };
                write!(f, "change recorded ({}), notification {}", current, delivery)
            }
            Self::Unchanged { fingerprint } => write!(f, "unchanged ({})", fingerprint),
        }
    }
}

/// Errors that can stop a monitoring run
///
/// Notification failures are absent: they never stop a run.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Required configuration is missing or malformed
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The page could not be fetched
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The target element is not present in the page
    #[error("Target element not found on the webpage: {selector}")]
    ContentNotFound {
        /// Selector that matched nothing
        selector: String,
    },

    /// The state file could not be read or written
    #[error("State file error at {}: {source}", .path.display())]
    Storage {
        /// Path of the state file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
