// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fakes for driving `Monitor` without network access

use async_trait::async_trait;
use pagewatch::monitor::{FetchError, Monitor, Notifier, NotifyError, PageFetcher, WatchConfig};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const STATE_FILE: &str = "webpage_checksum.txt";

/// Fetcher returning canned HTML (or an error) and counting calls
#[derive(Clone)]
pub struct FakeFetcher {
    response: Result<String, FetchError>,
    pub calls: Arc<AtomicUsize>,
}

impl FakeFetcher {
    pub fn serving(html: impl Into<String>) -> Self {
        Self {
            response: Ok(html.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(err: FetchError) -> Self {
        Self {
            response: Err(err),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

/// Notifier that records every message and can simulate SMTP failure
#[derive(Clone, Default)]
pub struct FakeNotifier {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub fail_with: Option<NotifyError>,
}

impl FakeNotifier {
    pub fn failing(err: NotifyError) -> Self {
        Self {
            fail_with: Some(err),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((subject.to_string(), body.to_string()));
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Fully populated configuration with its state file inside `dir`
pub fn test_config(dir: &TempDir) -> WatchConfig {
    let mut config = WatchConfig::default();
    config.url = "https://example.com/copeve".to_string();
    config.email.sender = Some("watcher@example.com".to_string());
    config.email.password = Some("app-token".to_string());
    config.email.receiver = Some("me@example.com".to_string());
    config.state_file = state_path(dir);
    config
}

pub fn state_path(dir: &TempDir) -> PathBuf {
    dir.path().join(STATE_FILE)
}

/// Page with the watched `div#home` holding `text`
pub fn page_with(text: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>COPEVE</title></head>
<body>
  <nav>Início | Concursos | Contato</nav>
  <div id="home">
    {}
  </div>
  <footer>Rodapé</footer>
</body>
</html>"#,
        text
    )
}

pub fn build_monitor(
    config: WatchConfig,
    fetcher: &FakeFetcher,
    notifier: &FakeNotifier,
) -> Monitor {
    Monitor::new(config, Box::new(fetcher.clone()), Box::new(notifier.clone()))
        .expect("valid test configuration")
}
