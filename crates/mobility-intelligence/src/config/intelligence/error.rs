// ABOUTME: Configuration error types for scoring engine validation
// ABOUTME: Defines error variants for invalid ranges, missing tables, and parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for scoring engine validation.

use std::env;
use thiserror::Error;

use mobility_core::errors::{AppError, ErrorCode};

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Bounds in the wrong order (e.g., clinical min above clinical max)
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Required configuration entry is missing
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Environment variable access or parse error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] env::VarError),

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Blend weights unusable
    #[error("Invalid weights: {0}")]
    InvalidWeights(&'static str),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::new(ErrorCode::ConfigInvalid, error.to_string()).with_source(error)
    }
}
