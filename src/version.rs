// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for pagewatch

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Package name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "css-target-selector",
    "sha256-fingerprint",
    "smtp-starttls-alerts",
    "dotenv-config",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("{} {}", NAME, VERSION_NUMBER)
}

/// User-Agent header sent with page fetches
pub fn user_agent() -> String {
    format!("{}/{}", NAME, VERSION_NUMBER)
}
