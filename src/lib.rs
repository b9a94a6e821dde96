// ABOUTME: Main library entry point for the mobility age assessment service
// ABOUTME: Wires the scoring engine to logging, configuration, and session history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Mobility Age
//!
//! Turns pose reports produced by a vision model into a functional "mobility
//! age", and keeps a history of completed assessment sessions.
//!
//! ## Features
//!
//! - **Four pose tests**: deep squat, forward fold, Apley scratch, knee-to-wall
//! - **Report parsing**: tolerant free-text parser plus a structured JSON parser
//! - **Explainable scores**: every outcome carries its deficiencies and blend weights
//! - **Sessions**: overall mobility age across poses, recorded to a history store
//!
//! ## Architecture
//!
//! - **`mobility-core`**: errors, constants, and models
//! - **`mobility-intelligence`**: the score engine, report parsers, and sessions
//! - **This crate**: logging, environment configuration, history storage, and
//!   the [`services::AssessmentService`] used by the `mobility-cli` binary
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mobility_age::config::AppConfig;
//! use mobility_age::history::HistoryStorage;
//! use mobility_age::services::AssessmentService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::from_env()?;
//!     let service = AssessmentService::with_default_engine(HistoryStorage::from_config(&config));
//!
//!     let mut session = service.start_session(40);
//!     let report = "Measurements:\nHip: 90°\nEstimated Mobility Age: 45\nConfidence Level: 0.7\nForm: good";
//!     session.record(service.analyze_pose(report, "forward_fold", 40)?);
//!
//!     let summary = service.complete_session(&session).await?;
//!     println!("Mobility age: {}", summary.record.overall_mobility_age);
//!     Ok(())
//! }
//! ```

/// Environment configuration for storage and logging
pub mod config;

/// Application constants
pub mod constants;

/// Unified error handling
pub mod errors;

/// Session history storage
pub mod history;

/// Structured logging setup and domain log helpers
pub mod logging;

/// Assessment orchestration
pub mod services;

pub use mobility_core::models;
pub use mobility_intelligence as intelligence;
pub use mobility_intelligence::{
    MobilityScoreEngine, MobilitySession, ReportParser, StructuredReportParser, TextReportParser,
};
