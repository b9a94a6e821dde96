// ABOUTME: JSON report parser for generators that support structured output
// ABOUTME: Validates the document through serde and applies the same warning rules as text parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use mobility_core::errors::AssessmentError;
use mobility_core::models::{
    DifficultyTier, Exercise, FormQuality, MalformedSectionWarning, MeasurementKind,
    MeasurementSet, PoseKind, ReportSection,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{detect_retry, normalize_confidence, parse_form, ParsedReport, ReportParser};
use crate::config::intelligence::ParserConfig;

/// Wire shape of a structured report
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuredReport {
    #[serde(default)]
    retry: Option<String>,
    #[serde(default)]
    measurements: Option<BTreeMap<String, Value>>,
    #[serde(default, alias = "physiotherapistEstimate")]
    estimated_mobility_age: Option<f64>,
    #[serde(default, alias = "confidenceLevel")]
    confidence: Option<f64>,
    #[serde(default)]
    form: Option<String>,
    #[serde(default)]
    is_good_form: Option<bool>,
    #[serde(default)]
    feedback: Option<String>,
    #[serde(default)]
    recommendations: Option<Vec<String>>,
    #[serde(default)]
    exercises: Vec<StructuredExercise>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuredExercise {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    sets: Option<u32>,
    #[serde(default)]
    reps: Option<Value>,
    #[serde(default)]
    target_muscles: Vec<String>,
}

/// Parses JSON reports such as
/// `{"measurements": {"hip": 90}, "estimatedMobilityAge": 40, "confidence": 0.7, "form": "good"}`
#[derive(Debug, Clone, Default)]
pub struct StructuredReportParser {
    config: ParserConfig,
}

impl StructuredReportParser {
    /// Create a parser with the given defaults
    #[must_use]
    pub const fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    fn measurements(
        raw: BTreeMap<String, Value>,
        warnings: &mut Vec<MalformedSectionWarning>,
    ) -> MeasurementSet {
        let mut set = MeasurementSet::new();
        for (label, value) in raw {
            let Some(kind) = MeasurementKind::from_label(&label) else {
                debug!(label = %label, "ignoring unrecognized measurement");
                continue;
            };
            match value {
                Value::Null => {}
                Value::Number(n) => match n.as_f64() {
                    Some(v) if v.is_finite() => set.insert(kind, v),
                    _ => warnings.push(MalformedSectionWarning::new(
                        ReportSection::Measurements,
                        format!("{kind}: value out of range; omitted"),
                    )),
                },
                other => warnings.push(MalformedSectionWarning::new(
                    ReportSection::Measurements,
                    format!("{kind}: expected a number, got {other}; omitted"),
                )),
            }
        }
        set
    }

    fn exercise(raw: StructuredExercise, warnings: &mut Vec<MalformedSectionWarning>) -> Exercise {
        let difficulty = raw
            .difficulty
            .as_deref()
            .and_then(DifficultyTier::parse)
            .unwrap_or_else(|| {
                warnings.push(MalformedSectionWarning::new(
                    ReportSection::Exercise,
                    format!("{}: missing or unrecognized difficulty; beginner used", raw.name),
                ));
                DifficultyTier::default()
            });
        let reps = match raw.reps {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        Exercise {
            name: raw.name,
            description: raw.description,
            difficulty,
            sets: raw.sets,
            reps,
            target_muscles: raw.target_muscles,
        }
    }
}

impl ReportParser for StructuredReportParser {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn parse(&self, report: &str, pose: PoseKind) -> Result<ParsedReport, AssessmentError> {
        if let Some(reason) = detect_retry(report, &self.config.retry_sentinel) {
            return Err(AssessmentError::retryable(reason));
        }
        let doc: StructuredReport = serde_json::from_str(report)
            .map_err(|e| AssessmentError::unparseable(format!("invalid report JSON: {e}"), report))?;
        if let Some(reason) = doc.retry.filter(|r| !r.trim().is_empty()) {
            return Err(AssessmentError::retryable(reason));
        }

        let mut warnings = Vec::new();

        let measurements = if let Some(raw) = doc.measurements {
            Some(Self::measurements(raw, &mut warnings))
        } else {
            warnings.push(MalformedSectionWarning::new(
                ReportSection::Measurements,
                "no measurements object; measurement reliability is zero",
            ));
            None
        };
        debug!(
            pose = pose.as_str(),
            observed = measurements.as_ref().map_or(0, |m| m.observed_for(pose)),
            "structured report measurements"
        );

        let physiotherapist_estimate = match doc.estimated_mobility_age {
            Some(age) if age.is_finite() && age > 0.0 && age <= 150.0 => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                // Safe: bounded to 0..=150 above
                let rounded = age.round() as u32;
                Some(rounded)
            }
            Some(age) => {
                warnings.push(MalformedSectionWarning::new(
                    ReportSection::EstimatedAge,
                    format!("estimate {age} is out of range; biological age used"),
                ));
                None
            }
            None => {
                warnings.push(MalformedSectionWarning::new(
                    ReportSection::EstimatedAge,
                    "no estimated mobility age stated; biological age used",
                ));
                None
            }
        };

        let confidence = doc
            .confidence
            .and_then(|c| normalize_confidence(c, false, self.config.accept_percent_confidence));
        if confidence.is_none() {
            warnings.push(MalformedSectionWarning::new(
                ReportSection::Confidence,
                format!(
                    "missing or invalid confidence; {} used",
                    self.config.default_confidence
                ),
            ));
        }

        let form = doc
            .form
            .as_deref()
            .and_then(parse_form)
            .or_else(|| doc.is_good_form.map(FormQuality::from_good_flag));
        if form.is_none() {
            warnings.push(MalformedSectionWarning::new(
                ReportSection::Form,
                "missing or unrecognized form; form treated as poor",
            ));
        }

        let recommendations = doc.recommendations.unwrap_or_else(|| {
            warnings.push(MalformedSectionWarning::new(
                ReportSection::Recommendations,
                "no recommendations list",
            ));
            Vec::new()
        });

        let exercises = doc
            .exercises
            .into_iter()
            .filter(|e| !e.name.trim().is_empty())
            .map(|e| Self::exercise(e, &mut warnings))
            .collect();

        Ok(ParsedReport {
            measurements,
            physiotherapist_estimate,
            confidence,
            form,
            feedback: doc.feedback.unwrap_or_default(),
            recommendations,
            exercises,
            warnings,
        })
    }
}
