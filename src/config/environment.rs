// ABOUTME: Environment configuration for history storage and logging
// ABOUTME: Parses MOBILITY_* variables into a typed AppConfig with platform defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::{env_config, storage};
use crate::logging::LoggingConfig;

/// Where completed sessions are recorded
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    /// JSON array file on disk
    #[default]
    File,
    /// Process memory, lost on exit
    Memory,
}

impl HistoryBackend {
    /// Backend name used in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Memory => "memory",
        }
    }
}

impl FromStr for HistoryBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "file" | "json" => Ok(Self::File),
            "memory" | "mem" => Ok(Self::Memory),
            other => bail!("unknown history backend '{other}', expected 'file' or 'memory'"),
        }
    }
}

impl fmt::Display for HistoryBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// History backend selection
    pub history_backend: HistoryBackend,
    /// History file path, used by the file backend
    pub history_path: PathBuf,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_backend: HistoryBackend::default(),
            history_path: default_history_path(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `MOBILITY_HISTORY_BACKEND` names an unknown backend
    /// or `MOBILITY_HISTORY_PATH` is set but empty
    pub fn from_env() -> Result<Self> {
        let history_backend = match env::var(env_config::HISTORY_BACKEND) {
            Ok(value) => value
                .parse()
                .with_context(|| format!("Invalid {} value", env_config::HISTORY_BACKEND))?,
            Err(_) => HistoryBackend::default(),
        };

        let history_path = match env::var(env_config::HISTORY_PATH) {
            Ok(value) if value.trim().is_empty() => {
                bail!("{} is set but empty", env_config::HISTORY_PATH)
            }
            Ok(value) => PathBuf::from(value),
            Err(_) => default_history_path(),
        };

        let config = Self {
            history_backend,
            history_path,
            logging: LoggingConfig::from_env(),
        };
        info!(
            history.backend = %config.history_backend,
            history.path = %config.history_path.display(),
            "Configuration loaded from environment"
        );
        Ok(config)
    }
}

/// `<data_dir>/mobility-age/history.json`, or the working directory when the
/// platform has no data directory
#[must_use]
pub fn default_history_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(storage::DATA_DIR_NAME)
        .join(storage::HISTORY_FILE_NAME)
}
