// ABOUTME: Domain service layer wiring the scoring engine to history storage
// ABOUTME: Front-end agnostic so the CLI and any future API share the same rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer

/// Pose analysis, session completion, and history queries
pub mod assessment;

pub use assessment::{AssessmentService, SessionSummary};
