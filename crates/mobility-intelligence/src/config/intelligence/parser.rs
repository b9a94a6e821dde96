// ABOUTME: Report parser configuration for free-text model output
// ABOUTME: Configures fallback confidence and the retry sentinel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use mobility_core::constants::report::{DEFAULT_CONFIDENCE, RETRY_SENTINEL};
use serde::{Deserialize, Serialize};

/// Parser configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Confidence used when the report omits or garbles it
    pub default_confidence: f64,
    /// Case-insensitive prefix signalling the generator declined to assess
    pub retry_sentinel: String,
    /// Treat confidences stated as 1-100 as percentages
    pub accept_percent_confidence: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_confidence: DEFAULT_CONFIDENCE,
            retry_sentinel: RETRY_SENTINEL.to_owned(),
            accept_percent_confidence: true,
        }
    }
}
