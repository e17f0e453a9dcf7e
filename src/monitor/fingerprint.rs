// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Content fingerprints used to detect changes between runs

use std::fmt;

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of a page snapshot's text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Hex length of a SHA-256 digest
    pub const HEX_LEN: usize = 64;

    /// Fingerprint the UTF-8 bytes of `text`
    pub fn of(text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Wrap a digest read back from the state file
    pub fn from_stored(digest: &str) -> Self {
        Self(digest.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
