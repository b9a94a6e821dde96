// ABOUTME: Configuration module for the assessment service and command-line front end
// ABOUTME: Re-exports environment configuration and the scoring engine configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: history storage and logging settings from environment variables
//! - **Intelligence**: reference ranges, penalties, and blend weights (from `mobility-intelligence`)

/// Environment and storage configuration
pub mod environment;

pub use environment::{AppConfig, HistoryBackend};
pub use mobility_intelligence::config::intelligence::{ConfigError, IntelligenceConfig};
