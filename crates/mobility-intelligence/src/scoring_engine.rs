// ABOUTME: Mobility score engine turning a pose report into a mobility age
// ABOUTME: Parses, applies defaults, scores deficiencies, and blends with the stated estimate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Mobility Score Engine
//!
//! `parse_report` is a pure function of `(report, pose, biological_age)` and
//! the engine's configuration:
//!
//! 1. Detect the retry sentinel and parse the report
//! 2. Apply defaults (estimate = biological age, confidence = 0.5, form = poor)
//! 3. Reliability = observed / expected measurements for the pose
//! 4. Penalties per deficiency, multiplied once by the form multiplier
//! 5. Measurement age = biological age + capped penalty
//! 6. Blend with the stated estimate, weighted by reliability and confidence
//! 7. Poor-form floor (only without measurement weight), round, and clamp

use mobility_core::constants::age_bounds::{MAX_BIOLOGICAL_AGE, MIN_BIOLOGICAL_AGE};
use mobility_core::errors::AssessmentError;
use mobility_core::models::{
    AssessmentOutcome, FormQuality, MeasurementSet, PoseKind, ScoreBreakdown,
};
use tracing::{debug, warn};

use crate::config::intelligence::IntelligenceConfig;
use crate::deficiency::DeficiencyScorer;
use crate::parsing::{ParsedReport, ReportParser, TextReportParser};

/// Fraction of the pose's expected measurements that were observed
///
/// Zero when no measurements section was parsed.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Safe: counts are single digits
pub fn measurement_reliability(pose: PoseKind, measurements: Option<&MeasurementSet>) -> f64 {
    let expected = pose.expected_measurements().len();
    match measurements {
        Some(set) if expected > 0 => set.observed_for(pose) as f64 / expected as f64,
        _ => 0.0,
    }
}

/// Scores pose reports into mobility ages
#[derive(Debug, Clone)]
pub struct MobilityScoreEngine<P: ReportParser = TextReportParser> {
    parser: P,
    config: IntelligenceConfig<true>,
}

impl MobilityScoreEngine<TextReportParser> {
    /// Engine over the global configuration and the text parser
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(IntelligenceConfig::global().clone())
    }

    /// Engine over an explicit configuration and the text parser
    #[must_use]
    pub fn with_config(config: IntelligenceConfig<true>) -> Self {
        let parser = TextReportParser::new(config.parser.clone());
        Self { parser, config }
    }
}

impl Default for MobilityScoreEngine<TextReportParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ReportParser> MobilityScoreEngine<P> {
    /// Engine with a custom parser, e.g. [`crate::parsing::StructuredReportParser`]
    #[must_use]
    pub const fn with_parser(parser: P, config: IntelligenceConfig<true>) -> Self {
        Self { parser, config }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &IntelligenceConfig<true> {
        &self.config
    }

    /// Parser in use
    #[must_use]
    pub const fn parser(&self) -> &P {
        &self.parser
    }

    /// Parse and score one pose report
    ///
    /// # Errors
    ///
    /// - [`AssessmentError::InvalidBiologicalAge`] if the age is outside 1..=120
    /// - [`AssessmentError::RetryableInput`] if the report carries the retry sentinel
    /// - [`AssessmentError::Unparseable`] if the parser cannot interpret the input
    /// - [`AssessmentError::BlendUndefined`] if both blend weights are zero
    pub fn parse_report(
        &self,
        report: &str,
        pose: PoseKind,
        biological_age: u32,
    ) -> Result<AssessmentOutcome, AssessmentError> {
        Self::validate_biological_age(biological_age)?;
        let parsed = self.parser.parse(report, pose)?;
        debug!(
            parser = self.parser.name(),
            pose = pose.as_str(),
            warnings = parsed.warnings.len(),
            "report parsed"
        );
        self.score(pose, biological_age, parsed)
    }

    /// Parse a pose identity string, then parse and score the report
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentError::UnknownPose`] for an unsupported pose, plus
    /// everything [`Self::parse_report`] can return
    pub fn analyze(
        &self,
        report: &str,
        pose: &str,
        biological_age: u32,
    ) -> Result<AssessmentOutcome, AssessmentError> {
        let pose: PoseKind = pose.parse()?;
        self.parse_report(report, pose, biological_age)
    }

    /// Score an already parsed report
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentError::InvalidBiologicalAge`] or
    /// [`AssessmentError::BlendUndefined`]
    pub fn score(
        &self,
        pose: PoseKind,
        biological_age: u32,
        parsed: ParsedReport,
    ) -> Result<AssessmentOutcome, AssessmentError> {
        Self::validate_biological_age(biological_age)?;

        for warning in &parsed.warnings {
            warn!(
                pose = pose.as_str(),
                section = ?warning.section,
                "{}", warning.message
            );
        }

        let reliability = measurement_reliability(pose, parsed.measurements.as_ref());
        let estimate = parsed.physiotherapist_estimate.unwrap_or(biological_age);
        let confidence = parsed
            .confidence
            .unwrap_or(self.config.parser.default_confidence);
        let form = parsed.form.unwrap_or(FormQuality::Poor);

        let penalties = DeficiencyScorer::new(&self.config.reference_ranges, &self.config.scoring)
            .score(pose, parsed.measurements.as_ref(), form);
        let measurement_age = f64::from(biological_age) + penalties.capped_penalty;

        let blending = &self.config.blending;
        let measurement_weight = blending.measurement_weight * reliability;
        let estimate_weight = blending.estimate_weight * confidence;
        let total_weight = measurement_weight + estimate_weight;
        if !(total_weight.is_finite() && total_weight > 0.0) {
            return Err(AssessmentError::BlendUndefined {
                measurement_weight,
                estimate_weight,
            });
        }

        let mut blended_age = measurement_age.mul_add(
            measurement_weight,
            f64::from(estimate) * estimate_weight,
        ) / total_weight;

        // Without measurement weight the flat poor-form penalty never reaches the blend
        let poor_form_floor_applied = !form.is_good()
            && self.config.scoring.form.floor_at_biological_age
            && measurement_weight <= 0.0
            && blended_age < f64::from(biological_age);
        if poor_form_floor_applied {
            blended_age = f64::from(biological_age);
        }

        let mobility_age = self.clamp_age(blended_age);
        debug!(
            pose = pose.as_str(),
            biological_age,
            reliability,
            confidence,
            measurement_age,
            blended_age,
            mobility_age,
            "pose scored"
        );

        Ok(AssessmentOutcome {
            pose,
            biological_age,
            mobility_age,
            measurement_reliability: reliability,
            physiotherapist_estimate: estimate,
            confidence,
            measurements: parsed.measurements,
            is_good_form: form.is_good(),
            feedback: parsed.feedback,
            recommendations: parsed.recommendations,
            exercises: parsed.exercises,
            breakdown: ScoreBreakdown {
                deficiencies: penalties.deficiencies,
                form_multiplier: penalties.form_multiplier,
                total_penalty: penalties.total_penalty,
                capped_penalty: penalties.capped_penalty,
                measurement_age,
                measurement_weight: measurement_weight / total_weight,
                estimate_weight: estimate_weight / total_weight,
                blended_age,
                poor_form_floor_applied,
            },
            warnings: parsed.warnings,
        })
    }

    /// Round then clamp into the reportable range
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Safe: clamped to u32 bounds
    fn clamp_age(&self, age: f64) -> u32 {
        let min = f64::from(self.config.blending.min_mobility_age);
        let max = f64::from(self.config.blending.max_mobility_age);
        age.round().clamp(min, max) as u32
    }

    const fn validate_biological_age(age: u32) -> Result<(), AssessmentError> {
        if age < MIN_BIOLOGICAL_AGE || age > MAX_BIOLOGICAL_AGE {
            return Err(AssessmentError::InvalidBiologicalAge {
                age,
                min: MIN_BIOLOGICAL_AGE,
                max: MAX_BIOLOGICAL_AGE,
            });
        }
        Ok(())
    }
}
