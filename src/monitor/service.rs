// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Monitoring run orchestration
//!
//! Sequences fetch, extract, fingerprint and compare, then decides whether to
//! notify and persist. Fetch, extraction and storage failures stop the run
//! before any state is written; notification failures are logged and the run
//! carries on.

use tracing::{debug, error, info, warn};

use super::config::WatchConfig;
use super::extractor::{extract_target_text, TargetSelector};
use super::fetcher::{HttpFetcher, PageFetcher};
use super::fingerprint::Fingerprint;
use super::notifier::{change_body, Notifier, SmtpNotifier, CHANGE_SUBJECT};
use super::state::FileStateStore;
use super::types::{MonitorError, PageSnapshot, RunOutcome};

/// Watches one page region and alerts when it changes
pub struct Monitor {
    config: WatchConfig,
    target: TargetSelector,
    fetcher: Box<dyn PageFetcher>,
    notifier: Box<dyn Notifier>,
    store: FileStateStore,
}

impl Monitor {
    /// Create a monitor from explicit collaborators
    ///
    /// Validates `config` first; a missing credential fails here, before
    /// the fetcher is ever used.
    pub fn new(
        config: WatchConfig,
        fetcher: Box<dyn PageFetcher>,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self, MonitorError> {
        config.validate()?;
        Self::assemble(config, fetcher, notifier)
    }

    /// Create a monitor wired to HTTP and SMTP
    pub fn from_config(config: WatchConfig) -> Result<Self, MonitorError> {
        config.validate()?;
        let notifier = SmtpNotifier::new(&config.email)?;
        let fetcher = HttpFetcher::new()?;
        Self::assemble(config, Box::new(fetcher), Box::new(notifier))
    }

    /// Wire an already validated `config` to its collaborators
    fn assemble(
        config: WatchConfig,
        fetcher: Box<dyn PageFetcher>,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self, MonitorError> {
        let target = TargetSelector::parse(&config.target)?;
        let store = FileStateStore::new(config.state_file.clone());

        Ok(Self {
            config,
            target,
            fetcher,
            notifier,
            store,
        })
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    pub fn store(&self) -> &FileStateStore {
        &self.store
    }

    /// Run the pipeline once
    pub async fn run(&self) -> Result<RunOutcome, MonitorError> {
        info!("Fetching the webpage {}", self.config.url);
        let html = self.fetcher.fetch(&self.config.url).await?;

        info!("Extracting target content ({})", self.target);
        let snapshot = match extract_target_text(&html, &self.target) {
            Ok(text) => PageSnapshot {
                url: self.config.url.clone(),
                text,
            },
            Err(e) => {
                warn!("{}", e);
                return Err(e);
            }
        };
        debug!("Extracted {} chars", snapshot.text.chars().count());

        let current = Fingerprint::of(&snapshot.text);
        debug!("Current fingerprint {}", current);

        match self.store.load().await? {
            None => {
                info!("No previous checksum found. Saving current state...");
                self.store.save(&current).await?;
                Ok(RunOutcome::Baseline {
                    fingerprint: current,
                })
            }
            Some(previous) if previous != current => {
                info!("Change detected! Sending alert...");
                let notified = self.notify_change(&snapshot).await;
                self.store.save(&current).await?;
                Ok(RunOutcome::Changed {
                    previous,
                    current,
                    notified,
                })
            }
            Some(previous) => {
                info!("No changes detected.");
                Ok(RunOutcome::Unchanged {
                    fingerprint: previous,
                })
            }
        }
    }

    /// Send the change alert; delivery failures are logged, never returned
    async fn notify_change(&self, snapshot: &PageSnapshot) -> bool {
        let body = change_body(&snapshot.text);
        match self.notifier.send(CHANGE_SUBJECT, &body).await {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to send email for {}: {}", snapshot.url, e);
                false
            }
        }
    }
}
