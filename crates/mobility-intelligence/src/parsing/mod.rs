// ABOUTME: Report parsing layer isolating model output formats from the scoring math
// ABOUTME: Defines the ReportParser trait, ParsedReport, and retry sentinel detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Report Parsing
//!
//! The vision/language model answers in free text. Every extraction is
//! optional: a [`ParsedReport`] carries `None` for anything that was missing
//! or malformed, plus a [`MalformedSectionWarning`] explaining why. Defaults
//! are applied by the scoring engine, not here.
//!
//! Two implementations are provided:
//! - [`TextReportParser`] - the section layout the model is prompted with
//! - [`StructuredReportParser`] - a JSON document validated through serde

/// JSON report parser
pub mod structured;
/// Free-text report parser
pub mod text;

pub use structured::StructuredReportParser;
pub use text::TextReportParser;

use mobility_core::errors::AssessmentError;
use mobility_core::models::{
    Exercise, FormQuality, MalformedSectionWarning, MeasurementSet, PoseKind,
};

use mobility_core::constants::report::DEFAULT_RETRY_REASON;

/// Everything extracted from one report, before defaults are applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedReport {
    /// Measurements, `None` if no measurements section was found
    pub measurements: Option<MeasurementSet>,
    /// Stated mobility age estimate
    pub physiotherapist_estimate: Option<u32>,
    /// Stated confidence (0-1)
    pub confidence: Option<f64>,
    /// Stated form quality
    pub form: Option<FormQuality>,
    /// Free-text feedback
    pub feedback: String,
    /// Recommendation list
    pub recommendations: Vec<String>,
    /// Recommended exercises
    pub exercises: Vec<Exercise>,
    /// Sections that were missing or malformed
    pub warnings: Vec<MalformedSectionWarning>,
}

/// Converts raw model output into a [`ParsedReport`]
///
/// Implementations must be pure: the same input always yields the same output.
pub trait ReportParser: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Parse a report produced for `pose`
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentError::RetryableInput`] when the generator declined
    /// to assess the image, or [`AssessmentError::Unparseable`] when the input
    /// cannot be interpreted at all. Missing sections are never errors.
    fn parse(&self, report: &str, pose: PoseKind) -> Result<ParsedReport, AssessmentError>;
}

/// Detect the retry sentinel at the start of a report (case-insensitive,
/// leading whitespace ignored) and return the reason that follows it
#[must_use]
pub fn detect_retry(report: &str, sentinel: &str) -> Option<String> {
    let trimmed = report.trim_start();
    let head = trimmed.get(..sentinel.len())?;
    if !head.eq_ignore_ascii_case(sentinel) {
        return None;
    }
    let reason = trimmed[sentinel.len()..].trim();
    Some(if reason.is_empty() {
        DEFAULT_RETRY_REASON.to_owned()
    } else {
        reason.to_owned()
    })
}

/// Normalize a stated confidence into 0..=1
///
/// Values in `(1, 100]` are read as percentages when `accept_percent` is set,
/// as is any value followed by `%`.
#[must_use]
pub fn normalize_confidence(value: f64, percent_sign: bool, accept_percent: bool) -> Option<f64> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    if percent_sign {
        return (value <= 100.0).then_some(value / 100.0);
    }
    if value <= 1.0 {
        Some(value)
    } else if accept_percent && value <= 100.0 {
        Some(value / 100.0)
    } else {
        None
    }
}

/// Interpret a stated form quality
#[must_use]
pub fn parse_form(value: &str) -> Option<FormQuality> {
    let lowered = value.trim().to_lowercase();
    let first = lowered
        .split(|c: char| !c.is_ascii_alphabetic())
        .find(|w| !w.is_empty())?;
    match first {
        "good" | "excellent" | "correct" | "proper" | "acceptable" | "yes" => {
            Some(FormQuality::Good)
        }
        "poor" | "bad" | "incorrect" | "improper" | "compromised" | "needs" | "no" => {
            Some(FormQuality::Poor)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_words() {
        assert_eq!(parse_form("Good"), Some(FormQuality::Good));
        assert_eq!(parse_form("**poor** - knees cave in"), Some(FormQuality::Poor));
        assert_eq!(parse_form("needs work"), Some(FormQuality::Poor));
        assert_eq!(parse_form("so-so"), None);
        assert_eq!(parse_form(""), None);
    }

    #[test]
    fn test_detect_retry_case_insensitive() {
        assert_eq!(
            detect_retry("  retry: image too dark", "RETRY:"),
            Some("image too dark".to_owned())
        );
        assert_eq!(detect_retry("Measurements:\nHip: 90", "RETRY:"), None);
    }

    #[test]
    fn test_detect_retry_without_reason() {
        assert_eq!(
            detect_retry("RETRY:", "RETRY:"),
            Some(DEFAULT_RETRY_REASON.to_owned())
        );
    }

    #[test]
    fn test_detect_retry_handles_short_and_multibyte_input() {
        assert_eq!(detect_retry("RE", "RETRY:"), None);
        assert_eq!(detect_retry("ÄÄÄÄ", "RETRY:"), None);
    }

    #[test]
    fn test_normalize_confidence() {
        assert_eq!(normalize_confidence(0.7, false, true), Some(0.7));
        assert_eq!(normalize_confidence(85.0, false, true), Some(0.85));
        assert_eq!(normalize_confidence(85.0, true, false), Some(0.85));
        assert_eq!(normalize_confidence(85.0, false, false), None);
        assert_eq!(normalize_confidence(150.0, false, true), None);
        assert_eq!(normalize_confidence(-0.1, false, true), None);
    }
}
