// ABOUTME: Integration tests for the assessment service
// ABOUTME: Covers error mapping, session completion, history recording, and limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, missing_docs)]

mod common;

use anyhow::Result;
use common::{
    record_on_day, test_service, DEEP_SQUAT_POOR_FORM, FORWARD_FOLD_AT_BOUND, KNEE_TO_WALL_GOOD,
};
use mobility_age::errors::{ErrorCode, ErrorResponse};
use mobility_age::history::HistoryStore;
use mobility_age::models::PoseKind;

#[test]
fn test_retry_maps_to_retryable_error_code() {
    let service = test_service();
    let error = service
        .analyze_pose("RETRY: image too dark", "deep_squat", 30)
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::RetryRequested);
    assert!(error.is_retryable());
    assert_eq!(error.message, "image too dark");
    assert_eq!(error.context.resource_id.as_deref(), Some("deep_squat"));
}

#[test]
fn test_blend_undefined_is_not_retryable() {
    let service = test_service();
    let error = service
        .analyze_pose(
            "Mobility Assessment:\nEstimated Mobility Age: 40\nConfidence Level: 0",
            "forward_fold",
            30,
        )
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::BlendUndefined);
    assert!(!error.is_retryable());
    assert_ne!(
        error.code.exit_code(),
        ErrorCode::RetryRequested.exit_code()
    );
}

#[test]
fn test_unknown_pose_is_invalid_input() {
    let error = test_service()
        .analyze_pose(FORWARD_FOLD_AT_BOUND, "plank", 30)
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(error.context.resource_id.as_deref(), Some("plank"));

    let response = ErrorResponse::from(error);
    assert!(!response.error.retryable);
}

#[tokio::test]
async fn test_complete_session_records_history() -> Result<()> {
    let service = test_service();
    let mut session = service.start_session(30);
    session.record(service.analyze_pose(DEEP_SQUAT_POOR_FORM, "deep_squat", 30)?);
    session.record(service.analyze_pose(KNEE_TO_WALL_GOOD, "Knee to Wall Test", 30)?);
    assert_eq!(session.remaining_poses().len(), 2);

    let summary = service.complete_session(&session).await?;
    assert!(summary.saved);
    assert_eq!(summary.record.pose_ages.len(), 2);
    assert_eq!(summary.record.pose_ages.get(&PoseKind::DeepSquat), Some(&47));
    assert_eq!(
        Some(summary.record.overall_mobility_age),
        session.overall_mobility_age()
    );

    let names: Vec<&str> = summary.exercises.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Goblet Squat Hold", "Calf Stretch"]);

    let stored = service.history_store().list().await?;
    assert_eq!(stored, vec![summary.record]);
    Ok(())
}

#[tokio::test]
async fn test_summarize_session_does_not_write() -> Result<()> {
    let service = test_service();
    let mut session = service.start_session(45);
    session.record(service.analyze_pose(FORWARD_FOLD_AT_BOUND, "forward_fold", 45)?);

    let summary = service.summarize_session(&session)?;
    assert!(!summary.saved);
    assert_eq!(summary.record.overall_mobility_age, 37);
    assert!(service.history(None).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_empty_session_cannot_complete() {
    let service = test_service();
    let session = service.start_session(30);
    let error = service.complete_session(&session).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::MissingRequiredField);
}

#[tokio::test]
async fn test_history_limit_keeps_most_recent() -> Result<()> {
    let service = test_service();
    for day in [3, 1, 2, 5, 4] {
        service
            .history_store()
            .append(record_on_day(day, 40, 40 + u32::try_from(day)?))
            .await?;
    }

    let all = service.history(None).await?;
    assert_eq!(all.len(), 5);

    let recent: Vec<u32> = service
        .history(Some(2))
        .await?
        .iter()
        .map(|r| r.overall_mobility_age)
        .collect();
    assert_eq!(recent, vec![44, 45]);

    assert_eq!(service.history(Some(50)).await?.len(), 5);
    assert!(service.history(Some(0)).await?.is_empty());
    Ok(())
}
