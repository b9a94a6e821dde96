// ABOUTME: Blend configuration combining measurement-based age with the stated estimate
// ABOUTME: Configures signal weights and the reportable mobility age range
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use mobility_core::constants::age_bounds::{MAX_MOBILITY_AGE, MIN_MOBILITY_AGE};
use serde::{Deserialize, Serialize};

/// Blend configuration
///
/// Effective weights are `measurement_weight * reliability` and
/// `estimate_weight * confidence`, normalized to sum to one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlendConfig {
    /// Base weight of the measurement-based age
    pub measurement_weight: f64,
    /// Base weight of the stated physiotherapist estimate
    pub estimate_weight: f64,
    /// Lowest reportable mobility age
    pub min_mobility_age: u32,
    /// Highest reportable mobility age
    pub max_mobility_age: u32,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            measurement_weight: 0.4,
            estimate_weight: 0.6,
            min_mobility_age: MIN_MOBILITY_AGE,
            max_mobility_age: MAX_MOBILITY_AGE,
        }
    }
}
