// ABOUTME: Immutable history record written after a completed assessment session
// ABOUTME: Captures per-pose mobility ages and the overall figure at a point in time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::pose::PoseKind;

/// One completed assessment session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Unique identifier
    pub id: Uuid,
    /// When the session was completed
    pub date: DateTime<Utc>,
    /// Biological age at the time
    pub biological_age: u32,
    /// Mobility age per pose assessed
    pub pose_ages: BTreeMap<PoseKind, u32>,
    /// Overall mobility age computed from the pose ages
    pub overall_mobility_age: u32,
}

impl HistoryRecord {
    /// Create a record with a fresh identifier
    #[must_use]
    pub fn new(
        date: DateTime<Utc>,
        biological_age: u32,
        pose_ages: BTreeMap<PoseKind, u32>,
        overall_mobility_age: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            biological_age,
            pose_ages,
            overall_mobility_age,
        }
    }

    /// Overall mobility age minus biological age (negative is better)
    #[must_use]
    pub fn age_gap(&self) -> i64 {
        i64::from(self.overall_mobility_age) - i64::from(self.biological_age)
    }
}
