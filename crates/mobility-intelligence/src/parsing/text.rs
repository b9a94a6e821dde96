// ABOUTME: Section-based parser for free-text pose reports
// ABOUTME: Extracts measurements, estimate, confidence, form, feedback, and exercises with defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Free-text report parser
//!
//! The report generator is prompted to answer in this layout, but nothing
//! guarantees it does:
//!
//! ```text
//! Measurements:
//! - Hip Angle: 90°
//! - Knee Angle: 130°
//! Mobility Assessment:
//! Estimated Mobility Age: 40
//! Confidence Level: 0.7
//! Form: good
//! Feedback: ...
//! Recommendations:
//! - ...
//! Exercise 1: Goblet Squat Hold
//! Description: ...
//! Difficulty: beginner
//! ```
//!
//! Markdown bold, bullets, and numbered lists are tolerated. Any section may
//! be missing; labels are matched case-insensitively.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use mobility_core::errors::AssessmentError;
use mobility_core::models::{
    DifficultyTier, Exercise, FormQuality, MalformedSectionWarning, MeasurementKind,
    MeasurementSet, MeasurementUnit, PoseKind, ReportSection,
};
use regex::{Captures, Regex};
use tracing::debug;

use super::{detect_retry, normalize_confidence, parse_form, ParsedReport, ReportParser};
use crate::config::intelligence::ParserConfig;

/// Highest age accepted from an estimate line
const MAX_STATED_AGE: f64 = 150.0;

/// Compiled line patterns
struct Patterns {
    exercise_heading: Regex,
    header: Regex,
    estimated_age: Regex,
    confidence: Regex,
    key_value: Regex,
    label_number: Regex,
    number: Regex,
    ratio: Regex,
    age_range: Regex,
    bullet: Regex,
    list_item: Regex,
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            exercise_heading: Regex::new(
                r"(?i)^[\s#>*_-]*exercise\s*#?\s*(\d+)[\s*_]*(?:[:.)\-–][\s*_]*(.*))?$",
            )?,
            header: Regex::new(
                r"(?i)^[\s#>*_-]*(recommended\s+exercises|exercises|measurements|mobility\s+assessment|feedback|recommendations|form)[\s*_]*:[\s*_]*(.*)$",
            )?,
            estimated_age: Regex::new(
                r"(?i)^[\s#>*_-]*(?:estimated\s+)?mobility\s+age(?:\s+estimate)?[\s*_]*:[\s*_]*(.*)$",
            )?,
            confidence: Regex::new(
                r"(?i)^[\s#>*_-]*confidence(?:\s+level)?[\s*_]*:[\s*_]*(.*)$",
            )?,
            key_value: Regex::new(
                r"^[\s#>*_•-]*(?:\d+[.)]\s*)?([A-Za-z][A-Za-z0-9 /&'()-]*?)[\s*_]*:[\s*_]*(.*)$",
            )?,
            label_number: Regex::new(
                r"(?i)^[\s#>*_•-]*([a-z][a-z /'-]*?)\s*(?:=|≈|\bis\b|\bat\b)?\s*(~?-?\d.*)$",
            )?,
            number: Regex::new(
                r"(?i)^\s*(?:~|approx(?:imately)?\.?|about|around)?\s*(-?(?:\d+(?:\.\d+)?|\.\d+))\s*(%|°|º|deg(?:rees?)?\b|cm\b|centimet(?:er|re)s?\b)?",
            )?,
            ratio: Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?|\.\d+)\s*(?:/|out\s+of)\s*(\d+(?:\.\d+)?)")?,
            age_range: Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*(?:-|–|to)\s*(\d+(?:\.\d+)?)")?,
            bullet: Regex::new(r"^\s*(?:[-*•]+|\d+[.)])\s*")?,
            list_item: Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+")?,
        })
    }
}

/// Get compiled patterns (cached)
///
/// Returns None if compilation fails (should never happen with hardcoded patterns)
fn patterns() -> Option<&'static Patterns> {
    static PATTERNS: OnceLock<Option<Patterns>> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns::compile().ok()).as_ref()
}

/// Section the line cursor is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Preamble,
    Measurements,
    Assessment,
    Form,
    Feedback,
    Recommendations,
    ExerciseList,
    Exercise(usize),
}

#[derive(Debug)]
struct ExerciseBlock<'a> {
    number: u32,
    heading: &'a str,
    lines: Vec<&'a str>,
}

/// Raw lines grouped by section
#[derive(Debug, Default)]
struct Sections<'a> {
    measurements: Option<Vec<&'a str>>,
    estimated_age: Vec<&'a str>,
    confidence: Vec<&'a str>,
    form: Vec<&'a str>,
    notes: Vec<&'a str>,
    feedback: Option<Vec<&'a str>>,
    recommendations: Option<Vec<&'a str>>,
    exercises: Vec<ExerciseBlock<'a>>,
}

enum MeasurementLine {
    Value(MeasurementKind, f64),
    NotObserved(MeasurementKind),
    Malformed(MeasurementKind, String),
    Unrecognized,
}

/// Trim whitespace and markdown emphasis from a captured value
fn clean(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '*' || c == '_')
}

fn capture<'a>(caps: &Captures<'a>, index: usize) -> &'a str {
    caps.get(index).map_or("", |m| clean(m.as_str()))
}

fn is_not_observed(value: &str) -> bool {
    let lowered = value.trim().trim_end_matches('.').to_lowercase();
    lowered.is_empty()
        || matches!(
            lowered.as_str(),
            "n/a" | "na" | "none" | "unknown" | "unclear" | "-" | "–" | "not available"
        )
        || lowered.starts_with("not ")
        || lowered.starts_with("n/a")
        || lowered.starts_with("unable")
}

/// Parses the free-text layout the report generator is prompted with
#[derive(Debug, Clone, Default)]
pub struct TextReportParser {
    config: ParserConfig,
}

impl TextReportParser {
    /// Create a parser with the given defaults
    #[must_use]
    pub const fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parser defaults in use
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn split_sections<'a>(patterns: &Patterns, report: &'a str) -> Sections<'a> {
        let mut sections = Sections::default();
        let mut cursor = Cursor::Preamble;

        for line in report.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(caps) = patterns.estimated_age.captures(line) {
                sections.estimated_age.push(capture(&caps, 1));
                continue;
            }
            if let Some(caps) = patterns.confidence.captures(line) {
                sections.confidence.push(capture(&caps, 1));
                continue;
            }
            if let Some(caps) = patterns.exercise_heading.captures(line) {
                let number = caps
                    .get(1)
                    .and_then(|m| m.as_str().parse().ok())
                    .unwrap_or_default();
                sections.exercises.push(ExerciseBlock {
                    number,
                    heading: capture(&caps, 2),
                    lines: Vec::new(),
                });
                cursor = Cursor::Exercise(sections.exercises.len() - 1);
                continue;
            }
            if let Some(caps) = patterns.header.captures(line) {
                let name = caps
                    .get(1)
                    .map_or_else(String::new, |m| m.as_str().to_lowercase());
                // `- Form: chest tall` under a list or exercise is a coaching cue
                let cue = name == "form"
                    && matches!(cursor, Cursor::Recommendations | Cursor::Exercise(_))
                    && patterns.list_item.is_match(line);
                if !cue {
                    let inline = capture(&caps, 2);
                    cursor = Self::open_section(&mut sections, &name, inline);
                    continue;
                }
            }

            let content = clean(line);
            match cursor {
                Cursor::Preamble | Cursor::ExerciseList => {}
                Cursor::Measurements => {
                    if let Some(lines) = sections.measurements.as_mut() {
                        lines.push(line);
                    }
                }
                Cursor::Assessment => sections.notes.push(content),
                Cursor::Form => {
                    if sections.form.is_empty() {
                        sections.form.push(content);
                    } else {
                        sections.notes.push(content);
                    }
                }
                Cursor::Feedback => {
                    if let Some(lines) = sections.feedback.as_mut() {
                        lines.push(content);
                    }
                }
                Cursor::Recommendations => {
                    if let Some(lines) = sections.recommendations.as_mut() {
                        lines.push(content);
                    }
                }
                Cursor::Exercise(index) => {
                    if let Some(block) = sections.exercises.get_mut(index) {
                        block.lines.push(line);
                    }
                }
            }
        }
        sections
    }

    fn open_section<'a>(sections: &mut Sections<'a>, name: &str, inline: &'a str) -> Cursor {
        let push_inline = |lines: &mut Vec<&'a str>| {
            if !inline.is_empty() {
                lines.push(inline);
            }
        };

        if name.starts_with("measurements") {
            push_inline(sections.measurements.get_or_insert_with(Vec::new));
            Cursor::Measurements
        } else if name.starts_with("mobility") {
            push_inline(&mut sections.notes);
            Cursor::Assessment
        } else if name == "form" {
            push_inline(&mut sections.form);
            Cursor::Form
        } else if name == "feedback" {
            push_inline(sections.feedback.get_or_insert_with(Vec::new));
            Cursor::Feedback
        } else if name == "recommendations" {
            push_inline(sections.recommendations.get_or_insert_with(Vec::new));
            Cursor::Recommendations
        } else {
            Cursor::ExerciseList
        }
    }

    fn classify_measurement(patterns: &Patterns, line: &str) -> MeasurementLine {
        let caps = patterns
            .key_value
            .captures(line)
            .or_else(|| patterns.label_number.captures(line));
        let Some(caps) = caps else {
            return MeasurementLine::Unrecognized;
        };
        let (label, value) = (capture(&caps, 1), capture(&caps, 2));
        let Some(kind) = MeasurementKind::from_label(label) else {
            return MeasurementLine::Unrecognized;
        };
        if is_not_observed(value) {
            return MeasurementLine::NotObserved(kind);
        }

        let Some(number_caps) = patterns.number.captures(value) else {
            return MeasurementLine::Malformed(kind, format!("value '{value}' is not a number"));
        };
        let Some(number) = number_caps
            .get(1)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|n| n.is_finite())
        else {
            return MeasurementLine::Malformed(kind, format!("value '{value}' is not a number"));
        };

        if let Some(unit) = number_caps.get(2).map(|m| m.as_str().to_lowercase()) {
            let stated = if unit.starts_with('c') {
                Some(MeasurementUnit::Centimeters)
            } else if unit == "%" {
                None
            } else {
                Some(MeasurementUnit::Degrees)
            };
            if stated != Some(kind.unit()) {
                return MeasurementLine::Malformed(
                    kind,
                    format!("unit '{unit}' does not match {}", kind.unit().symbol()),
                );
            }
        }
        MeasurementLine::Value(kind, number)
    }

    fn extract_measurements(
        patterns: &Patterns,
        lines: Option<&[&str]>,
        pose: PoseKind,
        warnings: &mut Vec<MalformedSectionWarning>,
    ) -> Option<MeasurementSet> {
        let Some(lines) = lines else {
            warnings.push(MalformedSectionWarning::new(
                ReportSection::Measurements,
                "no measurements section found; measurement reliability is zero",
            ));
            return None;
        };

        let mut values: BTreeMap<MeasurementKind, f64> = BTreeMap::new();
        let mut ambiguous: BTreeSet<MeasurementKind> = BTreeSet::new();

        for line in lines {
            match Self::classify_measurement(patterns, line) {
                MeasurementLine::Value(kind, value) => {
                    if ambiguous.contains(&kind) {
                        continue;
                    }
                    match values.get(&kind).copied() {
                        Some(previous) if (previous - value).abs() > f64::EPSILON => {
                            values.remove(&kind);
                            ambiguous.insert(kind);
                            warnings.push(MalformedSectionWarning::new(
                                ReportSection::Measurements,
                                format!("{kind} stated more than once with different values; omitted"),
                            ));
                        }
                        Some(_) => {}
                        None => {
                            values.insert(kind, value);
                        }
                    }
                }
                MeasurementLine::NotObserved(kind) => {
                    debug!(measurement = %kind, "measurement reported as not observed");
                }
                MeasurementLine::Malformed(kind, reason) => {
                    warnings.push(MalformedSectionWarning::new(
                        ReportSection::Measurements,
                        format!("{kind}: {reason}; omitted"),
                    ));
                }
                MeasurementLine::Unrecognized => {}
            }
        }

        let set: MeasurementSet = values.into_iter().collect();
        let missing: Vec<&str> = pose
            .expected_measurements()
            .iter()
            .filter(|kind| !set.contains(**kind))
            .map(MeasurementKind::as_str)
            .collect();
        if !missing.is_empty() {
            debug!(pose = pose.as_str(), missing = ?missing, "expected measurements not observed");
        }
        Some(set)
    }

    fn parse_age(patterns: &Patterns, raw: &str) -> Option<u32> {
        let value: f64 = if let Some(caps) = patterns.age_range.captures(raw) {
            let low: f64 = caps.get(1)?.as_str().parse().ok()?;
            let high: f64 = caps.get(2)?.as_str().parse().ok()?;
            (low + high) / 2.0
        } else {
            patterns.number.captures(raw)?.get(1)?.as_str().parse().ok()?
        };
        if !value.is_finite() || value < 1.0 || value > MAX_STATED_AGE {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        // Safe: bounded to 1..=150 above
        let age = value.round() as u32;
        Some(age)
    }

    fn extract_estimate(
        patterns: &Patterns,
        candidates: &[&str],
        warnings: &mut Vec<MalformedSectionWarning>,
    ) -> Option<u32> {
        if candidates.is_empty() {
            warnings.push(MalformedSectionWarning::new(
                ReportSection::EstimatedAge,
                "no estimated mobility age stated; biological age used",
            ));
            return None;
        }

        let ages: Vec<u32> = candidates
            .iter()
            .filter_map(|raw| Self::parse_age(patterns, raw))
            .collect();
        let Some(&first) = ages.first() else {
            warnings.push(MalformedSectionWarning::new(
                ReportSection::EstimatedAge,
                format!(
                    "could not read an age from '{}'; biological age used",
                    candidates.join("', '")
                ),
            ));
            return None;
        };
        if ages.iter().any(|age| *age != first) {
            warnings.push(MalformedSectionWarning::new(
                ReportSection::EstimatedAge,
                "conflicting mobility age estimates; biological age used",
            ));
            return None;
        }
        Some(first)
    }

    fn extract_confidence(
        &self,
        patterns: &Patterns,
        candidates: &[&str],
        warnings: &mut Vec<MalformedSectionWarning>,
    ) -> Option<f64> {
        let default = self.config.default_confidence;
        let Some(raw) = candidates.first() else {
            warnings.push(MalformedSectionWarning::new(
                ReportSection::Confidence,
                format!("no confidence level stated; {default} used"),
            ));
            return None;
        };

        let confidence = if let Some(caps) = patterns.ratio.captures(raw) {
            Self::ratio_confidence(&caps)
        } else {
            patterns.number.captures(raw).and_then(|caps| {
                let value: f64 = caps.get(1)?.as_str().parse().ok()?;
                let percent = caps.get(2).is_some_and(|m| m.as_str() == "%");
                normalize_confidence(value, percent, self.config.accept_percent_confidence)
            })
        };
        if confidence.is_none() {
            warnings.push(MalformedSectionWarning::new(
                ReportSection::Confidence,
                format!("confidence '{raw}' is not in 0-1; {default} used"),
            ));
        }
        confidence
    }

    /// `8/10` or `4 out of 5`, accepted only when it lands in 0..=1
    fn ratio_confidence(caps: &Captures<'_>) -> Option<f64> {
        let numerator: f64 = caps.get(1)?.as_str().parse().ok()?;
        let denominator: f64 = caps.get(2)?.as_str().parse().ok()?;
        if denominator <= 0.0 {
            return None;
        }
        let value = numerator / denominator;
        (value.is_finite() && (0.0..=1.0).contains(&value)).then_some(value)
    }

    fn extract_form(
        candidates: &[&str],
        warnings: &mut Vec<MalformedSectionWarning>,
    ) -> Option<FormQuality> {
        let Some(raw) = candidates.first() else {
            warnings.push(MalformedSectionWarning::new(
                ReportSection::Form,
                "no form line; form treated as poor",
            ));
            return None;
        };
        let form = parse_form(raw);
        if form.is_none() {
            warnings.push(MalformedSectionWarning::new(
                ReportSection::Form,
                format!("unrecognized form '{raw}'; form treated as poor"),
            ));
        }
        form
    }

    fn strip_bullet<'a>(patterns: &Patterns, line: &'a str) -> &'a str {
        let start = patterns.bullet.find(line).map_or(0, |m| m.end());
        clean(&line[start..])
    }

    fn extract_list(patterns: &Patterns, lines: &[&str]) -> Vec<String> {
        lines
            .iter()
            .map(|line| Self::strip_bullet(patterns, line))
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect()
    }

    fn parse_muscles(value: &str) -> Vec<String> {
        value
            .replace(" and ", ",")
            .split([',', ';', '/'])
            .map(|m| m.trim().trim_end_matches('.').trim())
            .filter(|m| !m.is_empty())
            .map(str::to_owned)
            .collect()
    }

    fn first_integer(value: &str) -> Option<u32> {
        value
            .split(|c: char| !c.is_ascii_digit())
            .find(|s| !s.is_empty())
            .and_then(|s| s.parse().ok())
    }

    fn extract_exercise(
        patterns: &Patterns,
        block: &ExerciseBlock<'_>,
        warnings: &mut Vec<MalformedSectionWarning>,
    ) -> Option<Exercise> {
        let mut name = (!block.heading.is_empty()).then(|| block.heading.to_owned());
        let mut description: Vec<&str> = Vec::new();
        let mut difficulty: Option<&str> = None;
        let mut sets = None;
        let mut reps = None;
        let mut target_muscles = Vec::new();

        for line in &block.lines {
            let field = patterns
                .key_value
                .captures(line)
                .map(|caps| (capture(&caps, 1).to_lowercase(), capture(&caps, 2)));
            let Some((label, value)) = field else {
                let text = Self::strip_bullet(patterns, line);
                if !text.is_empty() {
                    description.push(text);
                }
                continue;
            };

            match label.as_str() {
                "name" | "exercise" => name = Some(value.to_owned()),
                "description" | "instructions" | "how to" | "how" => description.push(value),
                "difficulty" | "level" | "difficulty level" => difficulty = Some(value),
                "sets" => sets = Self::first_integer(value),
                "reps" | "repetitions" | "duration" | "hold" => reps = Some(value.to_owned()),
                "target muscles" | "targets" | "muscles" | "target" | "muscles targeted" => {
                    target_muscles = Self::parse_muscles(value);
                }
                combined if combined.contains("sets") && combined.contains("reps") => {
                    let mut parts = value.splitn(2, ['x', 'X', '×']);
                    sets = parts.next().and_then(Self::first_integer);
                    reps = parts.next().map(|r| r.trim().to_owned());
                }
                _ => {
                    let text = Self::strip_bullet(patterns, line);
                    if !text.is_empty() {
                        description.push(text);
                    }
                }
            }
        }

        let Some(name) = name.filter(|n| !n.is_empty()) else {
            warnings.push(MalformedSectionWarning::new(
                ReportSection::Exercise,
                format!("exercise {} has no name; skipped", block.number),
            ));
            return None;
        };

        let difficulty = match difficulty {
            Some(raw) => DifficultyTier::parse(raw).unwrap_or_else(|| {
                warnings.push(MalformedSectionWarning::new(
                    ReportSection::Exercise,
                    format!("{name}: unrecognized difficulty '{raw}'; beginner used"),
                ));
                DifficultyTier::default()
            }),
            None => {
                warnings.push(MalformedSectionWarning::new(
                    ReportSection::Exercise,
                    format!("{name}: no difficulty stated; beginner used"),
                ));
                DifficultyTier::default()
            }
        };

        Some(Exercise {
            name,
            description: description.join(" "),
            difficulty,
            sets,
            reps: reps.filter(|r| !r.is_empty()),
            target_muscles,
        })
    }
}

impl ReportParser for TextReportParser {
    fn name(&self) -> &'static str {
        "text"
    }

    fn parse(&self, report: &str, pose: PoseKind) -> Result<ParsedReport, AssessmentError> {
        if let Some(reason) = detect_retry(report, &self.config.retry_sentinel) {
            return Err(AssessmentError::retryable(reason));
        }
        let patterns = patterns()
            .ok_or_else(|| AssessmentError::unparseable("report patterns failed to compile", report))?;

        let sections = Self::split_sections(patterns, report);
        let mut warnings = Vec::new();

        let measurements = Self::extract_measurements(
            patterns,
            sections.measurements.as_deref(),
            pose,
            &mut warnings,
        );
        let physiotherapist_estimate =
            Self::extract_estimate(patterns, &sections.estimated_age, &mut warnings);
        let confidence = self.extract_confidence(patterns, &sections.confidence, &mut warnings);
        let form = Self::extract_form(&sections.form, &mut warnings);

        let feedback_lines = match &sections.feedback {
            Some(lines) if !lines.is_empty() => lines.clone(),
            _ => sections.notes.clone(),
        };
        let feedback = Self::extract_list(patterns, &feedback_lines).join("\n");

        let recommendations = if let Some(lines) = &sections.recommendations {
            Self::extract_list(patterns, lines)
        } else {
            warnings.push(MalformedSectionWarning::new(
                ReportSection::Recommendations,
                "no recommendations section",
            ));
            Vec::new()
        };

        let exercises = sections
            .exercises
            .iter()
            .filter_map(|block| Self::extract_exercise(patterns, block, &mut warnings))
            .collect();

        Ok(ParsedReport {
            measurements,
            physiotherapist_estimate,
            confidence,
            form,
            feedback,
            recommendations,
            exercises,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_REPORT: &str = "\
**Measurements:**
- Hip Angle: 90°
- Knee Angle: 130°
- Ankle Angle: 38 degrees

**Mobility Assessment:**
Estimated Mobility Age: 40 years
Confidence Level: 0.7
Form: Good

**Feedback:** Depth is limited by hip flexion.

**Recommendations:**
1. Work on hip mobility daily
2. Elevate heels while training depth

**Exercise 1:** Goblet Squat Hold
- Description: Hold the bottom of a squat with a light weight
- Difficulty: Beginner
- Sets: 3
- Reps: 30 seconds
- Target Muscles: hip flexors, adductors and glutes
";

    fn parse(report: &str, pose: PoseKind) -> ParsedReport {
        TextReportParser::default().parse(report, pose).unwrap()
    }

    #[test]
    fn test_full_report() {
        let parsed = parse(FULL_REPORT, PoseKind::DeepSquat);
        let measurements = parsed.measurements.unwrap();
        assert_eq!(measurements.get(MeasurementKind::Hip), Some(90.0));
        assert_eq!(measurements.get(MeasurementKind::Knee), Some(130.0));
        assert_eq!(measurements.get(MeasurementKind::Ankle), Some(38.0));
        assert_eq!(parsed.physiotherapist_estimate, Some(40));
        assert_eq!(parsed.confidence, Some(0.7));
        assert_eq!(parsed.form, Some(FormQuality::Good));
        assert_eq!(parsed.feedback, "Depth is limited by hip flexion.");
        assert_eq!(parsed.recommendations.len(), 2);
        assert_eq!(parsed.recommendations[0], "Work on hip mobility daily");
        assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);

        let exercise = &parsed.exercises[0];
        assert_eq!(exercise.name, "Goblet Squat Hold");
        assert_eq!(exercise.difficulty, DifficultyTier::Beginner);
        assert_eq!(exercise.sets, Some(3));
        assert_eq!(exercise.reps.as_deref(), Some("30 seconds"));
        assert_eq!(
            exercise.target_muscles,
            vec!["hip flexors", "adductors", "glutes"]
        );
    }

    #[test]
    fn test_retry_sentinel_short_circuits() {
        let result = TextReportParser::default().parse("retry: person not visible", PoseKind::DeepSquat);
        assert_eq!(
            result,
            Err(AssessmentError::retryable("person not visible"))
        );
    }

    #[test]
    fn test_missing_measurements_section() {
        let parsed = parse("Estimated Mobility Age: 50\nConfidence Level: 0.9", PoseKind::ForwardFold);
        assert!(parsed.measurements.is_none());
        assert!(parsed
            .warnings
            .iter()
            .any(|w| w.section == ReportSection::Measurements));
    }

    #[test]
    fn test_not_observed_values_are_omitted() {
        let parsed = parse(
            "Measurements:\nHip: N/A\nKnee: not visible\nAnkle: 36°",
            PoseKind::DeepSquat,
        );
        let measurements = parsed.measurements.unwrap();
        assert_eq!(measurements.len(), 1);
        assert_eq!(measurements.get(MeasurementKind::Ankle), Some(36.0));
    }

    #[test]
    fn test_conflicting_measurement_is_ambiguous() {
        let parsed = parse(
            "Measurements:\nHip: 100\nKnee: 140\nHip angle: 105",
            PoseKind::DeepSquat,
        );
        let measurements = parsed.measurements.unwrap();
        assert!(!measurements.contains(MeasurementKind::Hip));
        assert!(measurements.contains(MeasurementKind::Knee));
        assert!(parsed
            .warnings
            .iter()
            .any(|w| w.message.contains("more than once")));
    }

    #[test]
    fn test_unit_mismatch_is_malformed() {
        let parsed = parse("Measurements:\nWall distance: 30°", PoseKind::KneeToWallTest);
        assert!(parsed.measurements.unwrap().is_empty());
        assert!(parsed
            .warnings
            .iter()
            .any(|w| w.message.contains("unit")));
    }

    #[test]
    fn test_percentage_confidence_and_age_range() {
        let parsed = parse(
            "Mobility Assessment:\nEstimated Mobility Age: 40-44\nConfidence Level: 85%",
            PoseKind::DeepSquat,
        );
        assert_eq!(parsed.physiotherapist_estimate, Some(42));
        assert_eq!(parsed.confidence, Some(0.85));
    }

    #[test]
    fn test_garbled_confidence_falls_back() {
        let parsed = parse("Confidence Level: fairly sure", PoseKind::DeepSquat);
        assert_eq!(parsed.confidence, None);
        assert!(parsed
            .warnings
            .iter()
            .any(|w| w.section == ReportSection::Confidence));
    }

    #[test]
    fn test_measurements_without_colon() {
        let parsed = parse("Measurements:\n- Finger gap 4.5 cm", PoseKind::ApleyScratchTest);
        assert_eq!(
            parsed.measurements.unwrap().get(MeasurementKind::FingerGap),
            Some(4.5)
        );
    }

    #[test]
    fn test_exercise_without_name_is_skipped() {
        let parsed = parse("Exercise 1:\nDifficulty: hard", PoseKind::DeepSquat);
        assert!(parsed.exercises.is_empty());
        assert!(parsed
            .warnings
            .iter()
            .any(|w| w.section == ReportSection::Exercise));
    }

    #[test]
    fn test_assessment_notes_become_feedback() {
        let parsed = parse(
            "Mobility Assessment:\nHeels lift early in the descent.\nForm: poor",
            PoseKind::DeepSquat,
        );
        assert_eq!(parsed.feedback, "Heels lift early in the descent.");
        assert_eq!(parsed.form, Some(FormQuality::Poor));
    }
}
