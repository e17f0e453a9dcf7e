// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod monitor;
pub mod version;

// Re-export main types
pub use monitor::{
    ConfigError, EmailConfig, Fingerprint, Monitor, MonitorError, RunOutcome, WatchConfig,
};
