// ABOUTME: Assessment outcome types produced by the mobility score engine
// ABOUTME: Form quality, deficiencies, score breakdown, exercises, and parse warnings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

use super::measurement::MeasurementSet;
use super::pose::{MeasurementKind, PoseKind};

/// Form classification stated by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormQuality {
    /// Movement performed with acceptable form
    Good,
    /// Compensations or faults observed, or form not reported
    Poor,
}

impl FormQuality {
    /// Map the `isGoodForm` flag onto a quality
    #[must_use]
    pub const fn from_good_flag(is_good: bool) -> Self {
        if is_good {
            Self::Good
        } else {
            Self::Poor
        }
    }

    /// Whether form was good
    #[must_use]
    pub const fn is_good(&self) -> bool {
        matches!(self, Self::Good)
    }
}

/// Difficulty tier for a recommended exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    /// Suitable for anyone
    #[default]
    Beginner,
    /// Requires some baseline mobility
    Intermediate,
    /// For already mobile users
    Advanced,
}

impl DifficultyTier {
    /// Lowercase identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse a stated difficulty; `None` when unrecognized
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "easy" => Some(Self::Beginner),
            "intermediate" | "moderate" | "medium" => Some(Self::Intermediate),
            "advanced" | "hard" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// Exercise recommended by the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name
    pub name: String,
    /// How to perform it
    pub description: String,
    /// Difficulty tier
    pub difficulty: DifficultyTier,
    /// Number of sets, if stated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    /// Repetitions or hold time as stated (e.g. `10`, `30 seconds`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
    /// Muscles the exercise targets
    #[serde(default)]
    pub target_muscles: Vec<String>,
}

/// Severity of a single deficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeficiencySeverity {
    /// Near-threshold finding
    Mild,
    /// Below the clinical bound but within the athlete edge
    Moderate,
    /// Below both the clinical bound and the athlete edge
    Severe,
}

impl fmt::Display for DeficiencySeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        })
    }
}

/// What triggered a deficiency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeficiencySource {
    /// A measurement fell outside its clinical bound
    Measurement {
        /// Which measurement
        measurement: MeasurementKind,
        /// Observed value
        observed: f64,
        /// Clinical bound it was compared against
        clinical_bound: f64,
    },
    /// Form was poor or not reported
    PoorForm,
}

/// A scored deficiency with the age penalty it contributed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deficiency {
    /// Trigger
    pub source: DeficiencySource,
    /// Severity classification
    pub severity: DeficiencySeverity,
    /// Penalty in years after the form multiplier
    pub penalty_years: f64,
}

/// Intermediate values of a scoring run, for explanation and diagnosis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Individual deficiencies found
    pub deficiencies: Vec<Deficiency>,
    /// Multiplier applied to every penalty
    pub form_multiplier: f64,
    /// Sum of all penalties before capping
    pub total_penalty: f64,
    /// Penalty actually applied
    pub capped_penalty: f64,
    /// Biological age plus capped penalty
    pub measurement_age: f64,
    /// Normalized weight of the measurement-based age
    pub measurement_weight: f64,
    /// Normalized weight of the stated estimate
    pub estimate_weight: f64,
    /// Weighted blend before rounding and clamping
    pub blended_age: f64,
    /// Whether the poor-form floor raised a measurement-free blend to the biological age
    pub poor_form_floor_applied: bool,
}

/// Report section a warning refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSection {
    /// `Measurements:` block
    Measurements,
    /// `Mobility Assessment:` block
    MobilityAssessment,
    /// `Estimated Mobility Age:` line
    EstimatedAge,
    /// `Confidence Level:` line
    Confidence,
    /// `Form:` line
    Form,
    /// `Feedback:` block
    Feedback,
    /// `Recommendations:` block
    Recommendations,
    /// `Exercise N:` block
    Exercise,
}

/// Non-fatal note that a section was missing or malformed and a default was used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedSectionWarning {
    /// Section concerned
    pub section: ReportSection,
    /// What was wrong and which default applied
    pub message: String,
}

impl MalformedSectionWarning {
    /// Create a warning
    #[must_use]
    pub fn new(section: ReportSection, message: impl Into<String>) -> Self {
        Self {
            section,
            message: message.into(),
        }
    }
}

/// Structured result of analysing one pose report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentOutcome {
    /// Pose that was scored
    pub pose: PoseKind,
    /// Biological age the score is anchored on
    pub biological_age: u32,
    /// Final mobility age, clamped to the reportable range
    pub mobility_age: u32,
    /// Observed over expected measurements for the pose
    pub measurement_reliability: f64,
    /// Age stated by the report (or the biological age if absent)
    pub physiotherapist_estimate: u32,
    /// Stated confidence in the estimate (0-1)
    pub confidence: f64,
    /// Measurements extracted, `None` if no measurements section was parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurements: Option<MeasurementSet>,
    /// Whether form was reported as good
    pub is_good_form: bool,
    /// Free-text feedback passed through from the report
    pub feedback: String,
    /// Recommendations passed through from the report
    pub recommendations: Vec<String>,
    /// Recommended exercises
    pub exercises: Vec<Exercise>,
    /// How the score was reached
    pub breakdown: ScoreBreakdown,
    /// Sections that fell back to defaults
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<MalformedSectionWarning>,
}
