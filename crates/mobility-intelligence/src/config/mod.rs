// ABOUTME: Configuration module for mobility-intelligence crate
// ABOUTME: Re-exports scoring engine configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Scoring engine configuration (reference ranges, penalties, blending, parsing)
pub mod intelligence;

pub use intelligence::IntelligenceConfig;
