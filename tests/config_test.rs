// ABOUTME: Integration tests for environment configuration
// ABOUTME: Covers history backend selection, path overrides, and logging settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, missing_docs)]

use std::env;
use std::path::PathBuf;

use mobility_age::config::{AppConfig, HistoryBackend};
use mobility_age::logging::{LogFormat, LoggingConfig};
use serial_test::serial;

fn clear_env() {
    for key in [
        "MOBILITY_HISTORY_PATH",
        "MOBILITY_HISTORY_BACKEND",
        "LOG_FORMAT",
        "ENVIRONMENT",
        "SERVICE_NAME",
    ] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.history_backend, HistoryBackend::File);
    assert!(config.history_path.ends_with("mobility-age/history.json"));
    assert_eq!(config.logging.service_name, "mobility-age");
}

#[test]
#[serial]
fn test_history_overrides() {
    clear_env();
    env::set_var("MOBILITY_HISTORY_BACKEND", "Memory");
    env::set_var("MOBILITY_HISTORY_PATH", "/tmp/mobility/history.json");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.history_backend, HistoryBackend::Memory);
    assert_eq!(
        config.history_path,
        PathBuf::from("/tmp/mobility/history.json")
    );
    clear_env();
}

#[test]
#[serial]
fn test_unknown_backend_is_rejected() {
    clear_env();
    env::set_var("MOBILITY_HISTORY_BACKEND", "postgres");
    let error = AppConfig::from_env().unwrap_err();
    assert!(format!("{error:#}").contains("postgres"));
    clear_env();
}

#[test]
#[serial]
fn test_empty_history_path_is_rejected() {
    clear_env();
    env::set_var("MOBILITY_HISTORY_PATH", "  ");
    assert!(AppConfig::from_env().is_err());
    clear_env();
}

#[test]
#[serial]
fn test_logging_from_environment() {
    clear_env();
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SERVICE_NAME", "mobility-test");

    let logging = LoggingConfig::from_env();
    assert_eq!(logging.format, LogFormat::Json);
    assert!(logging.include_location);
    assert!(logging.include_spans);
    assert_eq!(logging.service_name, "mobility-test");
    clear_env();
}

#[test]
#[serial]
fn test_cli_logging_defaults_to_compact() {
    clear_env();
    let logging = LoggingConfig::for_cli();
    assert_eq!(logging.format, LogFormat::Compact);
    assert_eq!(logging.service_name, "mobility-cli");
}

#[test]
fn test_backend_parsing() {
    assert_eq!("file".parse::<HistoryBackend>().unwrap(), HistoryBackend::File);
    assert_eq!(" MEMORY ".parse::<HistoryBackend>().unwrap(), HistoryBackend::Memory);
    assert!("sqlite".parse::<HistoryBackend>().is_err());
    assert_eq!(HistoryBackend::Memory.to_string(), "memory");
}
