// ABOUTME: Measurement set extracted from a pose report
// ABOUTME: Stores only values the report stated unambiguously; absence means not observed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::pose::{MeasurementKind, PoseKind};

/// Joint angles (degrees) and distances (centimeters) stated by a report
///
/// Missing entries are "not observed" and are never treated as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementSet {
    values: BTreeMap<MeasurementKind, f64>,
}

impl MeasurementSet {
    /// Empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value, replacing any previous one
    pub fn insert(&mut self, kind: MeasurementKind, value: f64) {
        self.values.insert(kind, value);
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, kind: MeasurementKind, value: f64) -> Self {
        self.insert(kind, value);
        self
    }

    /// Value for a measurement if it was observed
    #[must_use]
    pub fn get(&self, kind: MeasurementKind) -> Option<f64> {
        self.values.get(&kind).copied()
    }

    /// Whether a measurement was observed
    #[must_use]
    pub fn contains(&self, kind: MeasurementKind) -> bool {
        self.values.contains_key(&kind)
    }

    /// Number of observed measurements
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was observed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Observed measurements in stable order
    pub fn iter(&self) -> impl Iterator<Item = (MeasurementKind, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    /// Count of the pose's expected measurements that were observed
    #[must_use]
    pub fn observed_for(&self, pose: PoseKind) -> usize {
        pose.expected_measurements()
            .iter()
            .filter(|kind| self.contains(**kind))
            .count()
    }
}

impl FromIterator<(MeasurementKind, f64)> for MeasurementSet {
    fn from_iter<I: IntoIterator<Item = (MeasurementKind, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observed_ignores_measurements_outside_pose() {
        let set = MeasurementSet::new()
            .with(MeasurementKind::Hip, 100.0)
            .with(MeasurementKind::Shoulder, 170.0);
        assert_eq!(set.observed_for(PoseKind::DeepSquat), 1);
        assert_eq!(set.observed_for(PoseKind::ApleyScratchTest), 0);
    }

    #[test]
    fn test_serializes_as_flat_map() {
        let set = MeasurementSet::new().with(MeasurementKind::FingerGap, 4.5);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!({ "finger_gap": 4.5 }));
    }
}
