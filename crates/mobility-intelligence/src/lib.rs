// ABOUTME: Mobility scoring engine crate: report parsing, deficiency scoring, and blending
// ABOUTME: Turns vision-model pose reports into mobility ages and multi-pose sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Mobility Intelligence
//!
//! The scoring core of the mobility age workspace. Reports are parsed behind
//! the [`parsing::ReportParser`] trait, scored against per-pose reference
//! tables, and blended with the report's own estimate.
//!
//! ```
//! use mobility_intelligence::{IntelligenceConfig, MobilityScoreEngine};
//! use mobility_core::models::PoseKind;
//!
//! let config = IntelligenceConfig::<false>::default().validate()?;
//! let engine = MobilityScoreEngine::with_config(config);
//! let outcome = engine.parse_report(
//!     "Measurements:\nHip Angle: 95\nForm: good\nEstimated Mobility Age: 30\nConfidence Level: 0.8",
//!     PoseKind::ForwardFold,
//!     30,
//! )?;
//! assert_eq!(outcome.mobility_age, 30);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Scoring configuration with environment overrides
pub mod config;

/// Deficiency detection against reference ranges
pub mod deficiency;

/// Report parsers
pub mod parsing;

/// The score engine
pub mod scoring_engine;

/// Multi-pose session aggregation
pub mod session;

pub use config::IntelligenceConfig;
pub use deficiency::{DeficiencyScorer, PenaltySummary};
pub use parsing::{ParsedReport, ReportParser, StructuredReportParser, TextReportParser};
pub use scoring_engine::{measurement_reliability, MobilityScoreEngine};
pub use session::MobilitySession;
