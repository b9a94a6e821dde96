// ABOUTME: Per-pose reference ranges for joint angles and distances
// ABOUTME: Athlete and clinical tiers used to classify measurement deficiencies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Reference Range Configuration
//!
//! Static lookup tables with one entry per (pose, measurement) pair. Each
//! entry has two tiers:
//! - **athlete** - the edge of excellent mobility and the ideal value
//! - **clinical** - the band of normal function; a reading on the deficient
//!   side of it indicates a limitation
//!
//! # References
//!
//! - Kendall, F.P., et al. (2005). *Muscles: Testing and Function with Posture and Pain*.
//! - Bennell, K., et al. (1998). Intra-rater and inter-rater reliability of a
//!   weight-bearing lunge measure of ankle dorsiflexion. *Australian Journal of Physiotherapy*, 44(3).

use std::collections::BTreeMap;

use mobility_core::models::{DeficiencySeverity, MeasurementKind, PoseKind};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Which side of a range indicates a limitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeDirection {
    /// Larger readings are better (joint angles, wall distance)
    HigherIsBetter,
    /// Smaller readings are better (finger gap)
    LowerIsBetter,
}

/// Athlete tier: excellent mobility
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AthleteTier {
    /// Athlete minimum: edge of the tier on the deficient side
    /// (a maximum when lower readings are better)
    pub threshold: f64,
    /// Ideal reading
    pub ideal: f64,
}

/// Clinical tier: boundary of normal function
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClinicalTier {
    /// Lower bound of normal function
    pub min: f64,
    /// Upper bound of normal function
    pub max: f64,
}

/// Reference thresholds for one measurement of one pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    /// Which side is deficient
    pub direction: RangeDirection,
    /// Athlete tier
    pub athlete: AthleteTier,
    /// Clinical tier
    pub clinical: ClinicalTier,
}

impl ReferenceRange {
    /// Range where larger readings are better
    #[must_use]
    pub const fn higher_is_better(
        athlete_min: f64,
        athlete_ideal: f64,
        clinical_min: f64,
        clinical_max: f64,
    ) -> Self {
        Self {
            direction: RangeDirection::HigherIsBetter,
            athlete: AthleteTier {
                threshold: athlete_min,
                ideal: athlete_ideal,
            },
            clinical: ClinicalTier {
                min: clinical_min,
                max: clinical_max,
            },
        }
    }

    /// Range where smaller readings are better
    #[must_use]
    pub const fn lower_is_better(
        athlete_max: f64,
        athlete_ideal: f64,
        clinical_min: f64,
        clinical_max: f64,
    ) -> Self {
        Self {
            direction: RangeDirection::LowerIsBetter,
            athlete: AthleteTier {
                threshold: athlete_max,
                ideal: athlete_ideal,
            },
            clinical: ClinicalTier {
                min: clinical_min,
                max: clinical_max,
            },
        }
    }

    /// Clinical bound a reading is compared against
    #[must_use]
    pub const fn clinical_bound(&self) -> f64 {
        match self.direction {
            RangeDirection::HigherIsBetter => self.clinical.min,
            RangeDirection::LowerIsBetter => self.clinical.max,
        }
    }

    /// Whether a reading lies strictly on the deficient side of `bound`
    fn short_of(&self, value: f64, bound: f64) -> bool {
        match self.direction {
            RangeDirection::HigherIsBetter => value < bound,
            RangeDirection::LowerIsBetter => value > bound,
        }
    }

    /// Classify a reading; `None` when it is within normal function.
    ///
    /// Readings exactly at the clinical bound are not deficient.
    #[must_use]
    pub fn classify(&self, value: f64) -> Option<DeficiencySeverity> {
        if !self.short_of(value, self.clinical_bound()) {
            return None;
        }
        if self.short_of(value, self.athlete.threshold) {
            Some(DeficiencySeverity::Severe)
        } else {
            Some(DeficiencySeverity::Moderate)
        }
    }

    fn validate(&self, label: &str) -> Result<(), ConfigError> {
        let bounds = [
            self.athlete.threshold,
            self.athlete.ideal,
            self.clinical.min,
            self.clinical.max,
        ];
        if !bounds.iter().all(|bound| bound.is_finite()) {
            return Err(ConfigError::InvalidRange(format!(
                "{label}: range bounds must be finite"
            )));
        }
        if self.clinical.min > self.clinical.max {
            return Err(ConfigError::InvalidRange(format!(
                "{label}: clinical min must be <= clinical max"
            )));
        }
        let ideal_on_good_side = match self.direction {
            RangeDirection::HigherIsBetter => self.athlete.ideal >= self.athlete.threshold,
            RangeDirection::LowerIsBetter => self.athlete.ideal <= self.athlete.threshold,
        };
        if !ideal_on_good_side {
            return Err(ConfigError::InvalidRange(format!(
                "{label}: athlete ideal must not be on the deficient side of the athlete threshold"
            )));
        }
        Ok(())
    }
}

/// Reference tables for every pose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceRangeConfig {
    ranges: BTreeMap<PoseKind, BTreeMap<MeasurementKind, ReferenceRange>>,
}

impl ReferenceRangeConfig {
    /// Table with no entries
    #[must_use]
    pub fn empty() -> Self {
        Self {
            ranges: BTreeMap::new(),
        }
    }

    /// Range for a pose measurement
    #[must_use]
    pub fn get(&self, pose: PoseKind, measurement: MeasurementKind) -> Option<&ReferenceRange> {
        self.ranges.get(&pose).and_then(|m| m.get(&measurement))
    }

    /// Insert or replace a range
    pub fn insert(&mut self, pose: PoseKind, measurement: MeasurementKind, range: ReferenceRange) {
        self.ranges.entry(pose).or_default().insert(measurement, range);
    }

    /// Builder-style insert, handy for substituting alternate clinical tables
    #[must_use]
    pub fn with_range(
        mut self,
        pose: PoseKind,
        measurement: MeasurementKind,
        range: ReferenceRange,
    ) -> Self {
        self.insert(pose, measurement, range);
        self
    }

    /// Check every expected measurement has a well-formed range
    ///
    /// # Errors
    ///
    /// Returns an error if a range is missing or its bounds are inconsistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pose in PoseKind::ALL {
            for measurement in pose.expected_measurements() {
                let label = format!("{}.{}", pose.as_str(), measurement.as_str());
                let range = self
                    .get(pose, *measurement)
                    .ok_or_else(|| ConfigError::MissingField(format!("reference range {label}")))?;
                range.validate(&label)?;
            }
        }
        Ok(())
    }
}

impl Default for ReferenceRangeConfig {
    fn default() -> Self {
        Self::empty()
            // Deep squat
            .with_range(
                PoseKind::DeepSquat,
                MeasurementKind::Hip,
                ReferenceRange::higher_is_better(110.0, 125.0, 95.0, 150.0),
            )
            .with_range(
                PoseKind::DeepSquat,
                MeasurementKind::Knee,
                ReferenceRange::higher_is_better(135.0, 150.0, 120.0, 165.0),
            )
            .with_range(
                PoseKind::DeepSquat,
                MeasurementKind::Ankle,
                ReferenceRange::higher_is_better(40.0, 45.0, 35.0, 60.0),
            )
            // Forward fold
            .with_range(
                PoseKind::ForwardFold,
                MeasurementKind::Hip,
                ReferenceRange::higher_is_better(110.0, 130.0, 95.0, 160.0),
            )
            // Apley scratch test: fingertip gap behind the back
            .with_range(
                PoseKind::ApleyScratchTest,
                MeasurementKind::FingerGap,
                ReferenceRange::lower_is_better(5.0, 0.0, 0.0, 10.0),
            )
            // Knee to wall test
            .with_range(
                PoseKind::KneeToWallTest,
                MeasurementKind::Ankle,
                ReferenceRange::higher_is_better(40.0, 45.0, 35.0, 60.0),
            )
            .with_range(
                PoseKind::KneeToWallTest,
                MeasurementKind::WallDistance,
                ReferenceRange::higher_is_better(12.0, 15.0, 9.0, 20.0),
            )
    }
}
