// ABOUTME: Scoring engine configuration for mobility age assessment
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration Module
//!
//! Immutable configuration data for the mobility score engine. Engines take
//! a config at construction; [`IntelligenceConfig::global`] is only the
//! default source, so tests can substitute alternate clinical tables.
//!
//! # Module Structure
//!
//! - `reference_ranges` - Per-pose athlete and clinical tiers
//! - `scoring` - Severity penalties, cap, and form multipliers
//! - `blending` - Signal weights and reportable age range
//! - `parser` - Report parsing defaults
//!
//! # Environment Overrides
//!
//! ```bash
//! export MOBILITY_PENALTY_SEVERE_YEARS=15
//! export MOBILITY_PENALTY_CAP_YEARS=25
//! export MOBILITY_POOR_FORM_MULTIPLIER=2.0
//! export MOBILITY_BLEND_MEASUREMENT_WEIGHT=0.4
//! export MOBILITY_REFERENCE_RANGES_FILE=/etc/mobility/ranges.json
//! ```

pub mod blending;
pub mod error;
pub mod parser;
pub mod reference_ranges;
pub mod scoring;

pub use blending::BlendConfig;
pub use error::ConfigError;
pub use parser::ParserConfig;
pub use reference_ranges::{
    AthleteTier, ClinicalTier, RangeDirection, ReferenceRange, ReferenceRangeConfig,
};
pub use scoring::{FormQualityConfig, PenaltyTable, ScoringConfig};

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static INTELLIGENCE_CONFIG: OnceLock<IntelligenceConfig<true>> = OnceLock::new();

/// Main scoring configuration container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelligenceConfig<const VALIDATED: bool = false> {
    /// Per-pose reference ranges
    pub reference_ranges: ReferenceRangeConfig,
    /// Deficiency penalties and form handling
    pub scoring: ScoringConfig,
    /// Blend weights and age bounds
    pub blending: BlendConfig,
    /// Report parsing defaults
    pub parser: ParserConfig,
    #[serde(skip)]
    _phantom: PhantomData<()>,
}

impl IntelligenceConfig<true> {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        INTELLIGENCE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load intelligence config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from defaults plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        IntelligenceConfig::<false>::default()
            .apply_env_overrides()?
            .validate()
    }
}

impl IntelligenceConfig<false> {
    /// Replace the reference tables
    #[must_use]
    pub fn with_reference_ranges(mut self, reference_ranges: ReferenceRangeConfig) -> Self {
        self.reference_ranges = reference_ranges;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistent value
    pub fn validate(self) -> Result<IntelligenceConfig<true>, ConfigError> {
        self.reference_ranges.validate()?;

        let penalties = &self.scoring.penalties;
        let form = &self.scoring.form;
        let scoring_values = [
            penalties.mild_years,
            penalties.moderate_years,
            penalties.severe_years,
            self.scoring.penalty_cap_years,
            form.good_multiplier,
            form.poor_multiplier,
        ];
        if !scoring_values.iter().all(|value| value.is_finite()) {
            return Err(ConfigError::ValueOutOfRange(
                "penalties, cap, and form multipliers must be finite",
            ));
        }
        if penalties.mild_years < 0.0 || penalties.moderate_years < 0.0 || penalties.severe_years < 0.0
        {
            return Err(ConfigError::ValueOutOfRange("penalties must be non-negative"));
        }
        if penalties.mild_years > penalties.moderate_years
            || penalties.moderate_years > penalties.severe_years
        {
            return Err(ConfigError::InvalidRange(
                "penalties must satisfy mild <= moderate <= severe".to_owned(),
            ));
        }
        if self.scoring.penalty_cap_years <= 0.0 {
            return Err(ConfigError::ValueOutOfRange("penalty cap must be positive"));
        }

        if form.good_multiplier <= 0.0 || form.poor_multiplier < form.good_multiplier {
            return Err(ConfigError::InvalidRange(
                "form multipliers must satisfy 0 < good <= poor".to_owned(),
            ));
        }

        let blend = &self.blending;
        if !(0.0..=1.0).contains(&blend.measurement_weight)
            || !(0.0..=1.0).contains(&blend.estimate_weight)
        {
            return Err(ConfigError::InvalidWeights(
                "blend weights must lie within 0..=1",
            ));
        }
        if blend.measurement_weight + blend.estimate_weight <= 0.0 {
            return Err(ConfigError::InvalidWeights(
                "at least one blend weight must be positive",
            ));
        }
        if blend.min_mobility_age >= blend.max_mobility_age {
            return Err(ConfigError::InvalidRange(
                "min_mobility_age must be < max_mobility_age".to_owned(),
            ));
        }

        if !(0.0..=1.0).contains(&self.parser.default_confidence) {
            return Err(ConfigError::ValueOutOfRange(
                "default confidence must lie within 0..=1",
            ));
        }
        if self.parser.retry_sentinel.trim().is_empty() {
            return Err(ConfigError::MissingField("parser.retry_sentinel".to_owned()));
        }

        Ok(IntelligenceConfig {
            reference_ranges: self.reference_ranges,
            scoring: self.scoring,
            blending: self.blending,
            parser: self.parser,
            _phantom: PhantomData,
        })
    }

    /// Parse an environment variable into `target` if it is set
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value or the
    /// reference range file cannot be read
    pub fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Penalty overrides
        Self::apply_env_var(
            "MOBILITY_PENALTY_SEVERE_YEARS",
            &mut self.scoring.penalties.severe_years,
        )?;
        Self::apply_env_var(
            "MOBILITY_PENALTY_MODERATE_YEARS",
            &mut self.scoring.penalties.moderate_years,
        )?;
        Self::apply_env_var(
            "MOBILITY_PENALTY_MILD_YEARS",
            &mut self.scoring.penalties.mild_years,
        )?;
        Self::apply_env_var(
            "MOBILITY_PENALTY_CAP_YEARS",
            &mut self.scoring.penalty_cap_years,
        )?;

        // Form overrides
        Self::apply_env_var(
            "MOBILITY_GOOD_FORM_MULTIPLIER",
            &mut self.scoring.form.good_multiplier,
        )?;
        Self::apply_env_var(
            "MOBILITY_POOR_FORM_MULTIPLIER",
            &mut self.scoring.form.poor_multiplier,
        )?;
        Self::apply_env_var(
            "MOBILITY_POOR_FORM_FLOOR",
            &mut self.scoring.form.floor_at_biological_age,
        )?;

        // Blend overrides
        Self::apply_env_var(
            "MOBILITY_BLEND_MEASUREMENT_WEIGHT",
            &mut self.blending.measurement_weight,
        )?;
        Self::apply_env_var(
            "MOBILITY_BLEND_ESTIMATE_WEIGHT",
            &mut self.blending.estimate_weight,
        )?;

        // Parser overrides
        Self::apply_env_var(
            "MOBILITY_DEFAULT_CONFIDENCE",
            &mut self.parser.default_confidence,
        )?;

        // Whole reference table replacement
        if let Ok(path) = env::var("MOBILITY_REFERENCE_RANGES_FILE") {
            let raw = fs::read_to_string(&path)
                .map_err(|e| ConfigError::Parse(format!("Cannot read {path}: {e}")))?;
            self.reference_ranges = serde_json::from_str(&raw)
                .map_err(|e| ConfigError::Parse(format!("Invalid reference ranges in {path}: {e}")))?;
        }

        Ok(self)
    }
}

impl<const VALIDATED: bool> Default for IntelligenceConfig<VALIDATED> {
    fn default() -> Self {
        Self {
            reference_ranges: ReferenceRangeConfig::default(),
            scoring: ScoringConfig::default(),
            blending: BlendConfig::default(),
            parser: ParserConfig::default(),
            _phantom: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config_validates() {
        assert!(IntelligenceConfig::<false>::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_penalties_rejected() {
        let mut config = IntelligenceConfig::<false>::default();
        config.scoring.penalties.moderate_years = 20.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_zero_blend_weights_rejected() {
        let mut config = IntelligenceConfig::<false>::default();
        config.blending.measurement_weight = 0.0;
        config.blending.estimate_weight = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeights(_))
        ));
    }

    #[test]
    #[serial]
    fn test_env_override_applied() {
        env::set_var("MOBILITY_PENALTY_CAP_YEARS", "30");
        let config = IntelligenceConfig::<false>::default()
            .apply_env_overrides()
            .unwrap();
        env::remove_var("MOBILITY_PENALTY_CAP_YEARS");
        assert!((config.scoring.penalty_cap_years - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    #[serial]
    fn test_nan_multiplier_from_env_rejected() {
        env::set_var("MOBILITY_POOR_FORM_MULTIPLIER", "NaN");
        let result = IntelligenceConfig::<false>::default()
            .apply_env_overrides()
            .and_then(IntelligenceConfig::<false>::validate);
        env::remove_var("MOBILITY_POOR_FORM_MULTIPLIER");
        assert!(matches!(result, Err(ConfigError::ValueOutOfRange(_))));
    }

    #[test]
    fn test_infinite_cap_rejected() {
        let mut config = IntelligenceConfig::<false>::default();
        config.scoring.penalty_cap_years = f64::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }

    #[test]
    #[serial]
    fn test_env_override_parse_failure() {
        env::set_var("MOBILITY_POOR_FORM_MULTIPLIER", "double");
        let result = IntelligenceConfig::<false>::default().apply_env_overrides();
        env::remove_var("MOBILITY_POOR_FORM_MULTIPLIER");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
