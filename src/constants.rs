// ABOUTME: Application constants re-exported from the core crate
// ABOUTME: Adds environment variable names read by the root configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module

pub use mobility_core::constants::*;

/// Environment variable names read by [`crate::config::AppConfig`]
pub mod env_config {
    /// Path of the JSON history file
    pub const HISTORY_PATH: &str = "MOBILITY_HISTORY_PATH";
    /// History backend selector (`file` or `memory`)
    pub const HISTORY_BACKEND: &str = "MOBILITY_HISTORY_BACKEND";
}
