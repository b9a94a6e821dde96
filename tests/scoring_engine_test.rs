// ABOUTME: Integration tests for the mobility score engine
// ABOUTME: Covers worked scenarios, output bounds, reliability, idempotence, and substituted tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, missing_docs)]

mod common;

use common::{default_config, test_engine, DEEP_SQUAT_POOR_FORM, FORWARD_FOLD_AT_BOUND};
use mobility_age::config::IntelligenceConfig;
use mobility_age::errors::AssessmentError;
use mobility_age::intelligence::config::intelligence::{ReferenceRange, ReferenceRangeConfig};
use mobility_age::models::{
    DeficiencySeverity, DeficiencySource, MeasurementKind, PoseKind, ReportSection,
};
use mobility_age::{MobilityScoreEngine, StructuredReportParser};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_deep_squat_severe_hip_with_poor_form() {
    let outcome = test_engine()
        .parse_report(DEEP_SQUAT_POOR_FORM, PoseKind::DeepSquat, 30)
        .unwrap();

    let breakdown = &outcome.breakdown;
    assert_eq!(breakdown.deficiencies.len(), 2);
    assert!(matches!(
        breakdown.deficiencies[0].source,
        DeficiencySource::Measurement {
            measurement: MeasurementKind::Hip,
            ..
        }
    ));
    assert_eq!(breakdown.deficiencies[0].severity, DeficiencySeverity::Severe);
    assert!(approx_eq(breakdown.deficiencies[0].penalty_years, 30.0));
    assert!(approx_eq(breakdown.form_multiplier, 2.0));
    assert!(approx_eq(breakdown.total_penalty, 50.0));
    assert!(approx_eq(breakdown.capped_penalty, 25.0));
    // Multiplier applied once: 30 + 25, not 30 + 25 * 2
    assert!(approx_eq(breakdown.measurement_age, 55.0));

    // (55 * 0.4 + 40 * 0.42) / 0.82 = 47.3
    assert_eq!(outcome.mobility_age, 47);
    assert!(approx_eq(outcome.measurement_reliability, 1.0));
    assert_eq!(outcome.physiotherapist_estimate, 40);
    assert!(!outcome.is_good_form);
    assert_eq!(outcome.recommendations.len(), 2);
    assert_eq!(outcome.exercises[0].name, "Goblet Squat Hold");
}

#[test]
fn test_missing_confidence_defaults_without_error() {
    let report = "Measurements:\n- Hip angle: 100°\nMobility Assessment:\nEstimated Mobility Age: 35\nForm: good";
    let outcome = test_engine()
        .parse_report(report, PoseKind::ForwardFold, 30)
        .unwrap();

    assert!(approx_eq(outcome.confidence, 0.5));
    assert!(outcome
        .warnings
        .iter()
        .any(|w| w.section == ReportSection::Confidence));
    // (30 * 0.4 + 35 * 0.3) / 0.7 = 32.1
    assert_eq!(outcome.mobility_age, 32);
}

#[test]
fn test_retry_sentinel_is_retryable_with_reason() {
    let result = test_engine().parse_report("RETRY: image too dark", PoseKind::DeepSquat, 30);
    assert_eq!(
        result,
        Err(AssessmentError::RetryableInput {
            reason: "image too dark".to_owned()
        })
    );
}

#[test]
fn test_retry_sentinel_case_and_whitespace() {
    let result = test_engine().parse_report("\n  retry:   subject out of frame", PoseKind::ForwardFold, 30);
    match result {
        Err(AssessmentError::RetryableInput { reason }) => {
            assert_eq!(reason, "subject out of frame");
        }
        other => panic!("expected retryable input, got {other:?}"),
    }
}

#[test]
fn test_reading_at_clinical_bound_is_not_deficient() {
    let outcome = test_engine()
        .parse_report(FORWARD_FOLD_AT_BOUND, PoseKind::ForwardFold, 45)
        .unwrap();

    assert!(outcome.breakdown.deficiencies.is_empty());
    assert!(approx_eq(outcome.breakdown.capped_penalty, 0.0));
    assert!(approx_eq(outcome.breakdown.measurement_age, 45.0));
    // (45 * 0.4 + 30 * 0.48) / 0.88 = 36.8
    assert_eq!(outcome.mobility_age, 37);
    assert_eq!(outcome.feedback, "Smooth hinge with a neutral spine.");
}

#[test]
fn test_zero_reliability_and_zero_confidence_is_blend_undefined() {
    let report = "Mobility Assessment:\nEstimated Mobility Age: 40\nConfidence Level: 0\nForm: good";
    let result = test_engine().parse_report(report, PoseKind::DeepSquat, 30);
    match result {
        Err(AssessmentError::BlendUndefined {
            measurement_weight,
            estimate_weight,
        }) => {
            assert!(approx_eq(measurement_weight, 0.0));
            assert!(approx_eq(estimate_weight, 0.0));
        }
        other => panic!("expected blend undefined, got {other:?}"),
    }
}

#[test]
fn test_poor_form_without_measurements_never_below_biological_age() {
    let engine = test_engine();
    let report = "Mobility Assessment:\nEstimated Mobility Age: 10\nConfidence Level: 0.9\nForm: poor";
    for biological_age in [18, 25, 40, 63, 99] {
        let outcome = engine
            .parse_report(report, PoseKind::KneeToWallTest, biological_age)
            .unwrap();
        assert!(
            outcome.mobility_age >= biological_age,
            "bio {biological_age} scored {}",
            outcome.mobility_age
        );
        assert!(outcome.breakdown.poor_form_floor_applied);
    }
}

#[test]
fn test_poor_form_with_measurements_keeps_plain_blend() {
    let report = "\
Measurements:
Hip: 120
Knee: 140
Ankle: 42

Mobility Assessment:
Estimated Mobility Age: 18
Confidence Level: 1.0
Form: poor
";
    let outcome = test_engine()
        .parse_report(report, PoseKind::DeepSquat, 50)
        .unwrap();

    let breakdown = &outcome.breakdown;
    assert!(approx_eq(outcome.measurement_reliability, 1.0));
    assert!(approx_eq(breakdown.measurement_age, 70.0));
    // (70 * 0.4 + 18 * 0.6) / 1.0 = 38.8
    assert!(approx_eq(breakdown.blended_age, 38.8));
    assert!(!breakdown.poor_form_floor_applied);
    assert_eq!(outcome.mobility_age, 39);
}

#[test]
fn test_missing_form_line_is_treated_as_poor() {
    let report = "Measurements:\nHip: 120\nEstimated Mobility Age: 30\nConfidence Level: 0.6";
    let outcome = test_engine()
        .parse_report(report, PoseKind::ForwardFold, 30)
        .unwrap();
    assert!(!outcome.is_good_form);
    assert!(outcome
        .breakdown
        .deficiencies
        .iter()
        .any(|d| matches!(d.source, DeficiencySource::PoorForm)));
}

#[test]
fn test_mobility_age_always_within_bounds() {
    let engine = test_engine();
    let reports = [
        DEEP_SQUAT_POOR_FORM,
        FORWARD_FOLD_AT_BOUND,
        "Estimated Mobility Age: 5\nConfidence Level: 1\nForm: good",
        "Estimated Mobility Age: 140\nConfidence Level: 1\nForm: poor",
        "Measurements:\nHip: 40\nKnee: 60\nAnkle: 10\nConfidence Level: 0.1\nForm: poor",
        "no sections at all",
    ];
    for report in reports {
        for pose in PoseKind::ALL {
            for biological_age in [1, 17, 18, 45, 100, 120] {
                match engine.parse_report(report, pose, biological_age) {
                    Ok(outcome) => assert!(
                        (18..=100).contains(&outcome.mobility_age),
                        "{pose} bio {biological_age}: {}",
                        outcome.mobility_age
                    ),
                    Err(AssessmentError::BlendUndefined { .. }) => {}
                    Err(other) => panic!("unexpected error for {pose}: {other}"),
                }
            }
        }
    }
}

#[test]
fn test_reliability_is_observed_over_expected() {
    let engine = test_engine();
    let partial = "Measurements:\nHip: 120\nKnee: 140\nConfidence Level: 0.5\nForm: good";

    let squat = engine.parse_report(partial, PoseKind::DeepSquat, 40).unwrap();
    assert!(approx_eq(squat.measurement_reliability, 2.0 / 3.0));

    let fold = engine.parse_report(partial, PoseKind::ForwardFold, 40).unwrap();
    assert!(approx_eq(fold.measurement_reliability, 1.0));

    let wall = engine.parse_report(partial, PoseKind::KneeToWallTest, 40).unwrap();
    assert!(approx_eq(wall.measurement_reliability, 0.0));

    let none = engine
        .parse_report("Confidence Level: 0.5\nForm: good", PoseKind::ApleyScratchTest, 40)
        .unwrap();
    assert!(approx_eq(none.measurement_reliability, 0.0));
    assert!(none.measurements.is_none());
}

#[test]
fn test_reparsing_is_idempotent() {
    let engine = test_engine();
    let first = engine
        .parse_report(DEEP_SQUAT_POOR_FORM, PoseKind::DeepSquat, 30)
        .unwrap();
    let second = engine
        .parse_report(DEEP_SQUAT_POOR_FORM, PoseKind::DeepSquat, 30)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_finger_gap_beyond_clinical_max() {
    let report = "Measurements:\nFinger gap: 14 cm\nEstimated Mobility Age: 40\nForm: good";
    let outcome = test_engine()
        .parse_report(report, PoseKind::ApleyScratchTest, 40)
        .unwrap();
    assert_eq!(outcome.breakdown.deficiencies.len(), 1);
    assert_eq!(
        outcome.breakdown.deficiencies[0].severity,
        DeficiencySeverity::Severe
    );
    // (55 * 0.4 + 40 * 0.3) / 0.7 = 48.6
    assert_eq!(outcome.mobility_age, 49);
}

#[test]
fn test_substituted_reference_ranges() {
    let ranges = ReferenceRangeConfig::default().with_range(
        PoseKind::ForwardFold,
        MeasurementKind::Hip,
        ReferenceRange::higher_is_better(110.0, 130.0, 100.0, 160.0),
    );
    let config = IntelligenceConfig::<false>::default()
        .with_reference_ranges(ranges)
        .validate()
        .unwrap();
    let engine = MobilityScoreEngine::with_config(config);

    let outcome = engine
        .parse_report(FORWARD_FOLD_AT_BOUND, PoseKind::ForwardFold, 45)
        .unwrap();
    assert_eq!(outcome.breakdown.deficiencies.len(), 1);
    assert!(approx_eq(outcome.breakdown.measurement_age, 60.0));
    // (60 * 0.4 + 30 * 0.48) / 0.88 = 43.6
    assert_eq!(outcome.mobility_age, 44);
}

#[test]
fn test_analyze_accepts_display_and_kebab_pose_names() {
    let engine = test_engine();
    let by_display = engine.analyze(FORWARD_FOLD_AT_BOUND, "Forward Fold", 45).unwrap();
    let by_kebab = engine.analyze(FORWARD_FOLD_AT_BOUND, "forward-fold", 45).unwrap();
    assert_eq!(by_display.pose, PoseKind::ForwardFold);
    assert_eq!(by_display.mobility_age, by_kebab.mobility_age);
}

#[test]
fn test_unknown_pose_and_invalid_age_are_distinct_errors() {
    let engine = test_engine();
    assert!(matches!(
        engine.analyze(FORWARD_FOLD_AT_BOUND, "cartwheel", 45),
        Err(AssessmentError::UnknownPose(_))
    ));
    assert!(matches!(
        engine.parse_report(FORWARD_FOLD_AT_BOUND, PoseKind::ForwardFold, 121),
        Err(AssessmentError::InvalidBiologicalAge { age: 121, .. })
    ));
}

#[test]
fn test_structured_parser_scores_like_text_parser() {
    let config = default_config();
    let structured = MobilityScoreEngine::with_parser(
        StructuredReportParser::new(config.parser.clone()),
        config,
    );
    let json = r#"{
        "measurements": {"hip": 95},
        "estimatedMobilityAge": 30,
        "confidence": 0.8,
        "form": "good",
        "feedback": "Smooth hinge with a neutral spine.",
        "recommendations": ["Keep up daily hamstring work"],
        "exercises": [{"name": "Hamstring Floss", "difficulty": "intermediate", "sets": 2, "reps": 10}]
    }"#;

    let from_json = structured
        .parse_report(json, PoseKind::ForwardFold, 45)
        .unwrap();
    let from_text = test_engine()
        .parse_report(FORWARD_FOLD_AT_BOUND, PoseKind::ForwardFold, 45)
        .unwrap();
    assert_eq!(from_json.mobility_age, from_text.mobility_age);
    assert_eq!(from_json.breakdown, from_text.breakdown);
}
