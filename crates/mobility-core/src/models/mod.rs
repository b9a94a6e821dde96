// ABOUTME: Core data models for mobility assessment
// ABOUTME: Re-exports pose, measurement, outcome, and history types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Assessment outcome, deficiencies, and parse warnings
pub mod assessment;
/// Session history records
pub mod history;
/// Observed measurement values
pub mod measurement;
/// Pose and measurement identities
pub mod pose;

pub use assessment::{
    AssessmentOutcome, Deficiency, DeficiencySeverity, DeficiencySource, DifficultyTier, Exercise,
    FormQuality, MalformedSectionWarning, ReportSection, ScoreBreakdown,
};
pub use history::HistoryRecord;
pub use measurement::MeasurementSet;
pub use pose::{MeasurementKind, MeasurementUnit, PoseKind};
