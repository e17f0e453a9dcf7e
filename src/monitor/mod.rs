// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Single-page change monitor
//!
//! Checks one region of one webpage and emails when its text changes.
//!
//! ## Architecture
//!
//! ```text
//! WatchConfig ─validate─→ Monitor::run
//!     URL → PageFetcher → HTML → extract_target_text → text → Fingerprint
//!                                                               ↓
//!                          FileStateStore::load ─compare─→ Baseline | Changed | Unchanged
//!                                                               ↓ (Changed)
//!                                                    Notifier::send, then save
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let config = WatchConfig::from_env();
//! let monitor = Monitor::from_config(config)?;
//! let outcome = monitor.run().await?;
//! ```

pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod fingerprint;
pub mod notifier;
pub mod service;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use config::{ConfigError, EmailConfig, WatchConfig};
pub use extractor::{extract_target_text, TargetSelector};
pub use fetcher::{FetchError, HttpFetcher, PageFetcher};
pub use fingerprint::Fingerprint;
pub use notifier::{EmailMessage, Notifier, NotifyError, SmtpNotifier, CHANGE_SUBJECT};
pub use service::Monitor;
pub use state::FileStateStore;
pub use types::{MonitorError, PageSnapshot, RunOutcome};
