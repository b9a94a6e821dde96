// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, engines over default tables, and sample reports and records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `mobility_age`

use std::collections::BTreeMap;
use std::sync::Once;

use chrono::{DateTime, Duration, TimeZone, Utc};
use mobility_age::config::IntelligenceConfig;
use mobility_age::history::InMemoryHistoryStore;
use mobility_age::models::{HistoryRecord, PoseKind};
use mobility_age::services::AssessmentService;
use mobility_age::MobilityScoreEngine;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Validated default configuration, independent of `MOBILITY_*` variables
pub fn default_config() -> IntelligenceConfig<true> {
    IntelligenceConfig::<false>::default().validate().unwrap()
}

/// Text-report engine over the default tables
pub fn test_engine() -> MobilityScoreEngine {
    init_test_logging();
    MobilityScoreEngine::with_config(default_config())
}

/// Service over the default tables with in-memory history
pub fn test_service() -> AssessmentService<InMemoryHistoryStore> {
    AssessmentService::new(test_engine(), InMemoryHistoryStore::new())
}

/// Deep squat report: poor form, severe hip, stated age 40 at confidence 0.7
pub const DEEP_SQUAT_POOR_FORM: &str = "\
Measurements:
- Hip angle: 90°
- Knee angle: 145°
- Ankle angle: 42°

Mobility Assessment:
Estimated Mobility Age: 40
Confidence Level: 0.7
Form: poor

Recommendations:
- Work on hip flexion
- Keep heels down

Exercise 1: Goblet Squat Hold
Description: Hold the bottom position with a light weight
Difficulty: beginner
Sets: 3
Reps: 30 seconds
Target Muscles: hips, adductors
";

/// Forward fold report: hip exactly at the clinical minimum, good form
pub const FORWARD_FOLD_AT_BOUND: &str = "\
Measurements:
- Hip angle: 95°

Mobility Assessment:
Estimated Mobility Age: 30
Confidence Level: 0.8
Form: good

Feedback: Smooth hinge with a neutral spine.

Recommendations:
- Keep up daily hamstring work

Exercise 1: Hamstring Floss
Description: Alternate knee bends while folded forward
Difficulty: intermediate
Sets: 2
Reps: 10
Target Muscles: hamstrings
";

/// Knee-to-wall report with both measurements inside normal range
pub const KNEE_TO_WALL_GOOD: &str = "\
Measurements:
Ankle angle: 44 degrees
Wall distance: 13 cm

Mobility Assessment:
Estimated Mobility Age: 28
Confidence Level: 90%
Form: good

Recommendations:
1. Maintain calf flexibility

Exercise 1: Calf Stretch
Description: Wall-supported straight-knee stretch
Difficulty: beginner
Target Muscles: gastrocnemius, soleus
";

/// History record dated `days` after a fixed epoch
pub fn record_on_day(days: i64, biological_age: u32, overall: u32) -> HistoryRecord {
    let mut pose_ages = BTreeMap::new();
    pose_ages.insert(PoseKind::DeepSquat, overall);
    HistoryRecord::new(day(days), biological_age, pose_ages, overall)
}

/// Fixed epoch plus `days`
pub fn day(days: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap() + Duration::days(days)
}
