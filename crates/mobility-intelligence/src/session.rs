// ABOUTME: Multi-pose assessment session aggregating per-pose outcomes
// ABOUTME: Computes the overall mobility age and merges exercise recommendations across poses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use mobility_core::constants::age_bounds::{MAX_MOBILITY_AGE, MIN_MOBILITY_AGE};
use mobility_core::models::{AssessmentOutcome, Exercise, HistoryRecord, PoseKind};
use tracing::warn;

use crate::config::intelligence::BlendConfig;

/// Outcomes collected for one person in one sitting
#[derive(Debug, Clone)]
pub struct MobilitySession {
    biological_age: u32,
    outcomes: BTreeMap<PoseKind, AssessmentOutcome>,
    min_mobility_age: u32,
    max_mobility_age: u32,
}

impl MobilitySession {
    /// Session using the default reportable range
    #[must_use]
    pub const fn new(biological_age: u32) -> Self {
        Self {
            biological_age,
            outcomes: BTreeMap::new(),
            min_mobility_age: MIN_MOBILITY_AGE,
            max_mobility_age: MAX_MOBILITY_AGE,
        }
    }

    /// Session clamping to the configured reportable range
    #[must_use]
    pub const fn from_config(biological_age: u32, blending: &BlendConfig) -> Self {
        Self {
            biological_age,
            outcomes: BTreeMap::new(),
            min_mobility_age: blending.min_mobility_age,
            max_mobility_age: blending.max_mobility_age,
        }
    }

    /// Biological age the session is anchored on
    #[must_use]
    pub const fn biological_age(&self) -> u32 {
        self.biological_age
    }

    /// Record a pose outcome, returning the one it replaced
    pub fn record(&mut self, outcome: AssessmentOutcome) -> Option<AssessmentOutcome> {
        if outcome.biological_age != self.biological_age {
            warn!(
                pose = outcome.pose.as_str(),
                outcome_age = outcome.biological_age,
                session_age = self.biological_age,
                "outcome scored against a different biological age"
            );
        }
        self.outcomes.insert(outcome.pose, outcome)
    }

    /// Outcome for a pose
    #[must_use]
    pub fn get(&self, pose: PoseKind) -> Option<&AssessmentOutcome> {
        self.outcomes.get(&pose)
    }

    /// Outcomes in pose order
    pub fn outcomes(&self) -> impl Iterator<Item = &AssessmentOutcome> {
        self.outcomes.values()
    }

    /// Number of poses assessed
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether no pose has been assessed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Poses not yet assessed
    #[must_use]
    pub fn remaining_poses(&self) -> Vec<PoseKind> {
        PoseKind::ALL
            .into_iter()
            .filter(|pose| !self.outcomes.contains_key(pose))
            .collect()
    }

    /// Mobility age per assessed pose
    #[must_use]
    pub fn pose_ages(&self) -> BTreeMap<PoseKind, u32> {
        self.outcomes
            .iter()
            .map(|(pose, outcome)| (*pose, outcome.mobility_age))
            .collect()
    }

    /// Rounded mean of per-pose mobility ages, clamped to the reportable range
    #[must_use]
    pub fn overall_mobility_age(&self) -> Option<u32> {
        if self.outcomes.is_empty() {
            return None;
        }
        let sum: u64 = self.outcomes.values().map(|o| u64::from(o.mobility_age)).sum();
        let count = u64::try_from(self.outcomes.len()).unwrap_or(u64::MAX);
        // Integer round-half-up of sum / count
        let mean = (2 * sum + count) / (2 * count);
        let mean = u32::try_from(mean).unwrap_or(u32::MAX);
        Some(mean.clamp(self.min_mobility_age, self.max_mobility_age))
    }

    /// Exercises across all poses, first occurrence of each name kept
    #[must_use]
    pub fn recommended_exercises(&self) -> Vec<Exercise> {
        let mut seen = HashSet::new();
        self.outcomes
            .values()
            .flat_map(|o| o.exercises.iter())
            .filter(|e| seen.insert(e.name.trim().to_lowercase()))
            .cloned()
            .collect()
    }

    /// History record for the session, `None` if nothing was assessed
    #[must_use]
    pub fn to_history_record(&self, date: DateTime<Utc>) -> Option<HistoryRecord> {
        let overall = self.overall_mobility_age()?;
        Some(HistoryRecord::new(
            date,
            self.biological_age,
            self.pose_ages(),
            overall,
        ))
    }
}
