// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use pagewatch::monitor::{ConfigError, Monitor, MonitorError};
use tempfile::TempDir;

use super::support::{page_with, state_path, test_config, FakeFetcher, FakeNotifier};

#[test]
fn test_each_missing_credential_blocks_before_fetch() {
    for var in ["EMAIL_SENDER", "EMAIL_PASSWORD", "EMAIL_RECEIVER"] {
        let dir = TempDir::new().unwrap();
        let mut config = test_config(&dir);
        match var {
            "EMAIL_SENDER" => config.email.sender = None,
            "EMAIL_PASSWORD" => config.email.password = None,
            _ => config.email.receiver = None,
        }

        let fetcher = FakeFetcher::serving(page_with("anything"));
        let notifier = FakeNotifier::default();
        let result = Monitor::new(config, Box::new(fetcher.clone()), Box::new(notifier.clone()));

        match result {
            Err(MonitorError::Configuration(ConfigError::MissingVar(missing))) => {
                assert_eq!(missing, var)
            }
            Err(other) => panic!("unexpected error for {}: {}", var, other),
            Ok(_) => panic!("monitor built without {}", var),
        }
        assert_eq!(fetcher.call_count(), 0);
        assert!(notifier.sent().is_empty());
        assert!(!state_path(&dir).exists());
    }
}

#[test]
fn test_from_config_reports_missing_credentials() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    config.email.password = Some(String::new());

    assert!(matches!(
        Monitor::from_config(config),
        Err(MonitorError::Configuration(ConfigError::MissingVar(
            "EMAIL_PASSWORD"
        )))
    ));
}

#[test]
fn test_invalid_selector_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    config.target = "div[".to_string();

    let result = Monitor::new(
        config,
        Box::new(FakeFetcher::serving("")),
        Box::new(FakeNotifier::default()),
    );
    assert!(matches!(
        result,
        Err(MonitorError::Configuration(ConfigError::InvalidSelector { .. }))
    ));
}

#[test]
fn test_valid_config_builds_production_monitor() {
    let dir = TempDir::new().unwrap();
    let monitor = Monitor::from_config(test_config(&dir)).unwrap();
    assert_eq!(monitor.store().path(), state_path(&dir).as_path());
    assert_eq!(monitor.config().target, "div#home");
}

#[test]
fn test_from_config_validates_url_and_selector() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    config.url = "ftp://example.org/".to_string();
    assert!(matches!(
        Monitor::from_config(config),
        Err(MonitorError::Configuration(ConfigError::InvalidUrl { .. }))
    ));

    let mut config = test_config(&dir);
    config.target = "div[".to_string();
    assert!(matches!(
        Monitor::from_config(config),
        Err(MonitorError::Configuration(ConfigError::InvalidSelector { .. }))
    ));
    assert!(!state_path(&dir).exists());
}
