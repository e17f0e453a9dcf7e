// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Persisted fingerprint state
//!
//! A single local text file holding exactly one hex digest. Absence of the
//! file means no baseline has been recorded yet.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::fingerprint::Fingerprint;
use super::types::MonitorError;

/// File-backed store for the last recorded fingerprint
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the previously persisted fingerprint
    ///
    /// Returns `Ok(None)` when the file does not exist or holds nothing but
    /// whitespace. Any other I/O failure is a `MonitorError::Storage`.
    pub async fn load(&self) -> Result<Option<Fingerprint>, MonitorError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => {
                warn!(
                    "State file {} is empty, treating as no baseline",
                    self.path.display()
                );
                Ok(None)
            }
            Ok(contents) => {
                let fingerprint = Fingerprint::from_stored(&contents);
                debug!("Loaded fingerprint {} from {}", fingerprint, self.path.display());
                Ok(Some(fingerprint))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No state file at {}", self.path.display());
                Ok(None)
            }
            Err(e) => Err(self.storage_error(e)),
        }
    }

    /// Overwrite the state file with `fingerprint`, replacing prior content
    pub async fn save(&self, fingerprint: &Fingerprint) -> Result<(), MonitorError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.storage_error(e))?;
            }
        }

        tokio::fs::write(&self.path, fingerprint.as_str())
            .await
            .map_err(|e| self.storage_error(e))?;

        debug!("Saved fingerprint {} to {}", fingerprint, self.path.display());
        Ok(())
    }

    fn storage_error(&self, source: std::io::Error) -> MonitorError {
        MonitorError::Storage {
            path: self.path.clone(),
            source,
        }
    }
}
