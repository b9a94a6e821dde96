// ABOUTME: Deficiency detection against per-pose reference ranges
// ABOUTME: Classifies measurements, applies the form multiplier, and caps the summed penalty
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use mobility_core::models::{
    Deficiency, DeficiencySource, FormQuality, MeasurementSet, PoseKind,
};
use tracing::debug;

use crate::config::intelligence::{ReferenceRangeConfig, ScoringConfig};

/// Penalties found for one pose
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltySummary {
    /// Deficiencies in measurement order, poor form last
    pub deficiencies: Vec<Deficiency>,
    /// Multiplier applied to every penalty
    pub form_multiplier: f64,
    /// Sum before the cap
    pub total_penalty: f64,
    /// Sum after the cap
    pub capped_penalty: f64,
}

/// Scores deficiencies for a pose from reference tables
#[derive(Debug, Clone, Copy)]
pub struct DeficiencyScorer<'a> {
    ranges: &'a ReferenceRangeConfig,
    scoring: &'a ScoringConfig,
}

impl<'a> DeficiencyScorer<'a> {
    /// Create a scorer over borrowed configuration
    #[must_use]
    pub const fn new(ranges: &'a ReferenceRangeConfig, scoring: &'a ScoringConfig) -> Self {
        Self { ranges, scoring }
    }

    /// Deficiencies for the pose's expected measurements plus the poor-form penalty
    ///
    /// Measurements outside the pose's expected set are ignored, as are
    /// expected measurements with no reference range.
    #[must_use]
    pub fn score(
        &self,
        pose: PoseKind,
        measurements: Option<&MeasurementSet>,
        form: FormQuality,
    ) -> PenaltySummary {
        let form_multiplier = self.scoring.form.multiplier(form);
        let mut deficiencies = Vec::new();

        if let Some(measurements) = measurements {
            for &kind in pose.expected_measurements() {
                let (Some(observed), Some(range)) =
                    (measurements.get(kind), self.ranges.get(pose, kind))
                else {
                    continue;
                };
                let Some(severity) = range.classify(observed) else {
                    continue;
                };
                let penalty_years = self.scoring.penalties.years_for(severity) * form_multiplier;
                debug!(
                    pose = pose.as_str(),
                    measurement = %kind,
                    observed,
                    clinical_bound = range.clinical_bound(),
                    severity = %severity,
                    penalty_years,
                    "measurement deficiency"
                );
                deficiencies.push(Deficiency {
                    source: DeficiencySource::Measurement {
                        measurement: kind,
                        observed,
                        clinical_bound: range.clinical_bound(),
                    },
                    severity,
                    penalty_years,
                });
            }
        }

        if !form.is_good() {
            let severity = self.scoring.form.poor_form_severity;
            deficiencies.push(Deficiency {
                source: DeficiencySource::PoorForm,
                severity,
                penalty_years: self.scoring.penalties.years_for(severity) * form_multiplier,
            });
        }

        let total_penalty: f64 = deficiencies.iter().map(|d| d.penalty_years).sum();
        PenaltySummary {
            deficiencies,
            form_multiplier,
            total_penalty,
            capped_penalty: self.scoring.cap(total_penalty),
        }
    }
}
