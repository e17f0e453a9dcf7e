// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::monitor::{Monitor, RunOutcome, WatchConfig};

/// pagewatch CLI
///
/// Runs one check and exits; schedule it with cron or a systemd timer.
/// Credentials come from EMAIL_SENDER, EMAIL_PASSWORD and EMAIL_RECEIVER
/// (a `.env` file in the working directory is read first).
#[derive(Parser, Debug, Default)]
#[command(name = "pagewatch")]
#[command(version)]
#[command(about = "Emails you when one region of a webpage changes", long_about = None)]
pub struct Cli {
    /// Page to watch
    #[arg(long, env = "WATCH_URL")]
    pub url: Option<String>,

    /// CSS selector of the watched region, e.g. "div#home"
    #[arg(long, env = "WATCH_TARGET")]
    pub target: Option<String>,

    /// File holding the last fingerprint
    #[arg(long, env = "WATCH_STATE_FILE")]
    pub state_file: Option<PathBuf>,

    /// SMTP relay host
    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: Option<String>,

    /// SMTP relay port (STARTTLS)
    #[arg(long, env = "SMTP_PORT")]
    pub smtp_port: Option<u16>,
}

impl Cli {
    /// Apply flags (or their environment fallbacks) on top of `base`
    pub fn into_config(self, mut base: WatchConfig) -> WatchConfig {
        if let Some(url) = self.url {
            base.url = url;
        }
        if let Some(target) = self.target {
            base.target = target;
        }
        if let Some(state_file) = self.state_file {
            base.state_file = state_file;
        }
        if let Some(host) = self.smtp_host {
            base.email.smtp_host = host;
        }
        if let Some(port) = self.smtp_port {
            base.email.smtp_port = port;
        }
        base
    }
}

/// Execute one monitoring run
pub async fn execute(cli: Cli) -> Result<RunOutcome> {
    let config = cli.into_config(WatchConfig::from_env());
    let monitor = Monitor::from_config(config)?;

    let outcome = monitor.run().await?;
    let state = if outcome.state_written() {
        "state file updated"
    } else {
        "state file untouched"
    };
    info!("Run complete: {}; {}", outcome, state);
    Ok(outcome)
}
