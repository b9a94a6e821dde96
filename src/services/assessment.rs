// ABOUTME: Assessment orchestration over the mobility score engine and a history store
// ABOUTME: Times and logs pose analysis, completes sessions, and queries past records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Instant;

use chrono::Utc;
use mobility_core::errors::{AppError, AppResult, AssessmentError, ErrorCode};
use mobility_core::models::{AssessmentOutcome, Exercise, HistoryRecord};
use mobility_intelligence::{MobilityScoreEngine, MobilitySession, ReportParser, TextReportParser};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::history::HistoryStore;
use crate::logging::AppLogger;

/// Result of completing a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Record written (or that would be written) to history
    pub record: HistoryRecord,
    /// Exercises merged across poses
    pub exercises: Vec<Exercise>,
    /// Whether the record was appended to history
    pub saved: bool,
}

/// Scores pose reports and records completed sessions
pub struct AssessmentService<H: HistoryStore, P: ReportParser = TextReportParser> {
    engine: MobilityScoreEngine<P>,
    history: H,
}

impl<H: HistoryStore> AssessmentService<H> {
    /// Service over the globally configured text-report engine
    #[must_use]
    pub fn with_default_engine(history: H) -> Self {
        Self::new(MobilityScoreEngine::new(), history)
    }
}

impl<H: HistoryStore, P: ReportParser> AssessmentService<H, P> {
    /// Service over an explicit engine
    #[must_use]
    pub const fn new(engine: MobilityScoreEngine<P>, history: H) -> Self {
        Self { engine, history }
    }

    /// Engine in use
    #[must_use]
    pub const fn engine(&self) -> &MobilityScoreEngine<P> {
        &self.engine
    }

    /// History backend in use
    #[must_use]
    pub const fn history_store(&self) -> &H {
        &self.history
    }

    /// Empty session clamped to the engine's reportable range
    #[must_use]
    pub fn start_session(&self, biological_age: u32) -> MobilitySession {
        MobilitySession::from_config(biological_age, &self.engine.config().blending)
    }

    /// Analyze one pose report
    ///
    /// # Errors
    ///
    /// Returns an [`AppError`] whose code distinguishes a recapture request
    /// ([`ErrorCode::RetryRequested`]) from an undefined blend, an unknown
    /// pose, an invalid age, or an unparseable report
    pub fn analyze_pose(
        &self,
        report: &str,
        pose: &str,
        biological_age: u32,
    ) -> AppResult<AssessmentOutcome> {
        let started = Instant::now();
        match self.engine.analyze(report, pose, biological_age) {
            Ok(outcome) => {
                let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                AppLogger::log_assessment(&outcome, duration_ms);
                Ok(outcome)
            }
            Err(AssessmentError::RetryableInput { reason }) => {
                AppLogger::log_retry_requested(pose, &reason);
                Err(AppError::from(AssessmentError::RetryableInput { reason })
                    .with_resource_id(pose))
            }
            Err(error) => {
                warn!(pose = %pose, biological_age, error = %error, "Pose assessment failed");
                let app_error = AppError::from(error);
                Err(if app_error.context.resource_id.is_some() {
                    app_error
                } else {
                    app_error.with_resource_id(pose)
                })
            }
        }
    }

    /// Summary of a session without touching history
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::MissingRequiredField`] if no pose was assessed
    pub fn summarize_session(&self, session: &MobilitySession) -> AppResult<SessionSummary> {
        let record = session.to_history_record(Utc::now()).ok_or_else(|| {
            AppError::new(
                ErrorCode::MissingRequiredField,
                "session has no assessed poses",
            )
        })?;
        debug!(
            poses = session.len(),
            overall_mobility_age = record.overall_mobility_age,
            "session summarized"
        );
        Ok(SessionSummary {
            record,
            exercises: session.recommended_exercises(),
            saved: false,
        })
    }

    /// Summarize a session and append it to history
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::MissingRequiredField`] if no pose was assessed, or
    /// a storage error if the record cannot be written
    pub async fn complete_session(&self, session: &MobilitySession) -> AppResult<SessionSummary> {
        let mut summary = self.summarize_session(session)?;
        let overall = summary.record.overall_mobility_age;
        let result = self.history.append(summary.record.clone()).await;
        AppLogger::log_history_write(self.history.backend_name(), overall, result.is_ok());
        result?;
        summary.saved = true;
        Ok(summary)
    }

    /// Past sessions oldest first, limited to the most recent `limit`
    ///
    /// # Errors
    ///
    /// Returns a storage error if history cannot be read
    pub async fn history(&self, limit: Option<usize>) -> AppResult<Vec<HistoryRecord>> {
        let mut records = self.history.list().await?;
        if let Some(limit) = limit {
            let skip = records.len().saturating_sub(limit);
            records.drain(..skip);
        }
        Ok(records)
    }
}
