// ABOUTME: Deficiency penalty configuration for mobility age scoring
// ABOUTME: Configures per-severity age penalties, the penalty cap, and form multipliers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Scoring Configuration
//!
//! Penalties are expressed in years added to the biological age. Every
//! penalty is multiplied once by the form-quality multiplier, then the sum
//! is capped before it is added to the biological age.

use mobility_core::models::{DeficiencySeverity, FormQuality};
use serde::{Deserialize, Serialize};

/// Scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Age penalty per deficiency severity
    pub penalties: PenaltyTable,
    /// Form-quality handling
    pub form: FormQualityConfig,
    /// Upper limit on the summed penalty (years)
    pub penalty_cap_years: f64,
}

impl ScoringConfig {
    /// Sum of penalties after the cap
    #[must_use]
    pub fn cap(&self, total_penalty: f64) -> f64 {
        total_penalty.min(self.penalty_cap_years)
    }
}

/// Age penalty (years) per severity, before the form multiplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyTable {
    /// Below both the clinical bound and the athlete edge
    pub severe_years: f64,
    /// Below the clinical bound only
    pub moderate_years: f64,
    /// Near-threshold finding
    pub mild_years: f64,
}

impl PenaltyTable {
    /// Base penalty for a severity
    #[must_use]
    pub const fn years_for(&self, severity: DeficiencySeverity) -> f64 {
        match severity {
            DeficiencySeverity::Severe => self.severe_years,
            DeficiencySeverity::Moderate => self.moderate_years,
            DeficiencySeverity::Mild => self.mild_years,
        }
    }
}

/// How form quality affects the score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormQualityConfig {
    /// Multiplier applied to penalties when form is good
    pub good_multiplier: f64,
    /// Multiplier applied to penalties when form is poor
    pub poor_multiplier: f64,
    /// Severity of the flat penalty added when form is poor
    pub poor_form_severity: DeficiencySeverity,
    /// Keep the blended age at or above the biological age when form is poor
    /// and no measurement carries weight
    pub floor_at_biological_age: bool,
}

impl FormQualityConfig {
    /// Multiplier for a form quality
    #[must_use]
    pub const fn multiplier(&self, form: FormQuality) -> f64 {
        match form {
            FormQuality::Good => self.good_multiplier,
            FormQuality::Poor => self.poor_multiplier,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            penalties: PenaltyTable::default(),
            form: FormQualityConfig::default(),
            penalty_cap_years: 25.0,
        }
    }
}

impl Default for PenaltyTable {
    fn default() -> Self {
        Self {
            severe_years: 15.0,
            moderate_years: 10.0,
            mild_years: 5.0,
        }
    }
}

impl Default for FormQualityConfig {
    fn default() -> Self {
        Self {
            good_multiplier: 1.0,
            poor_multiplier: 2.0,
            poor_form_severity: DeficiencySeverity::Moderate,
            floor_at_biological_age: true,
        }
    }
}
