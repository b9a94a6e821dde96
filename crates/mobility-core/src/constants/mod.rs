// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Age bounds, report sentinels, and service identifiers for mobility assessment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Pure data constants grouped by domain. Tunable scoring values (penalties,
//! weights, reference ranges) live in the intelligence configuration instead.

/// Bounds applied to reported ages
pub mod age_bounds {
    /// Lowest mobility age the engine will report
    pub const MIN_MOBILITY_AGE: u32 = 18;
    /// Highest mobility age the engine will report
    pub const MAX_MOBILITY_AGE: u32 = 100;
    /// Lowest biological age accepted as input
    pub const MIN_BIOLOGICAL_AGE: u32 = 1;
    /// Highest biological age accepted as input
    pub const MAX_BIOLOGICAL_AGE: u32 = 120;
}

/// Report format markers produced by the vision/language model
pub mod report {
    /// Prefix signalling the generator could not assess the image
    pub const RETRY_SENTINEL: &str = "RETRY:";
    /// Reason used when the sentinel carries no explanation
    pub const DEFAULT_RETRY_REASON: &str = "the image could not be assessed";
    /// Confidence assumed when the report does not state one
    pub const DEFAULT_CONFIDENCE: f64 = 0.5;
}

/// Service names
pub mod service_names {
    /// Service name used in structured logs
    pub const MOBILITY_AGE: &str = "mobility-age";
    /// Command-line front end
    pub const MOBILITY_CLI: &str = "mobility-cli";
}

/// Storage locations
pub mod storage {
    /// Directory created under the platform data dir
    pub const DATA_DIR_NAME: &str = "mobility-age";
    /// File name of the JSON history store
    pub const HISTORY_FILE_NAME: &str = "history.json";
}
