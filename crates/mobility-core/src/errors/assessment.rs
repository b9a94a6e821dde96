// ABOUTME: Assessment-specific error types raised while parsing and scoring pose reports
// ABOUTME: Distinguishes retryable captures from undefined blends and unparseable reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Assessment Error Types
//!
//! Structured errors for a single pose analysis:
//! - `AssessmentError` - the named outcomes the user-facing layer branches on
//! - Conversion to `AppError` so they travel through the unified error system
//!
//! Missing or malformed report sections are *not* errors; the parser absorbs
//! them with documented defaults and reports them as warnings instead.

use serde_json::json;
use thiserror::Error;

use super::{AppError, ErrorCode};

/// Maximum number of report characters attached to diagnostic details
const REPORT_EXCERPT_LIMIT: usize = 2_000;

/// Errors specific to analysing one pose report
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    /// The report generator declined to assess the image (`RETRY:` sentinel)
    #[error("assessment declined, recapture requested: {reason}")]
    RetryableInput {
        /// Human-readable reason supplied after the sentinel
        reason: String,
    },

    /// Both blending weights evaluated to zero
    #[error(
        "blend undefined: measurement weight {measurement_weight} and estimate weight {estimate_weight} are both zero"
    )]
    BlendUndefined {
        /// Weight derived from measurement reliability
        measurement_weight: f64,
        /// Weight derived from the stated confidence
        estimate_weight: f64,
    },

    /// Report could not be interpreted at all
    #[error("report could not be parsed: {details}")]
    Unparseable {
        /// What went wrong
        details: String,
        /// The report text that triggered the failure
        report: String,
    },

    /// Pose identity is not one of the supported tests
    #[error("unknown pose: {0}")]
    UnknownPose(String),

    /// Biological age outside the accepted range
    #[error("biological age {age} is outside the accepted range {min}..={max}")]
    InvalidBiologicalAge {
        /// Supplied age
        age: u32,
        /// Lowest accepted age
        min: u32,
        /// Highest accepted age
        max: u32,
    },
}

impl AssessmentError {
    /// Create a retryable-input error
    #[must_use]
    pub fn retryable(reason: impl Into<String>) -> Self {
        Self::RetryableInput {
            reason: reason.into(),
        }
    }

    /// Wrap an unexpected parsing failure with the report attached
    #[must_use]
    pub fn unparseable(details: impl Into<String>, report: impl Into<String>) -> Self {
        Self::Unparseable {
            details: details.into(),
            report: report.into(),
        }
    }

    /// Whether this error asks the user to retake the photo
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RetryableInput { .. })
    }

    /// Error code this failure maps onto
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::RetryableInput { .. } => ErrorCode::RetryRequested,
            Self::BlendUndefined { .. } => ErrorCode::BlendUndefined,
            Self::Unparseable { .. } => ErrorCode::InvalidFormat,
            Self::UnknownPose(_) => ErrorCode::InvalidInput,
            Self::InvalidBiologicalAge { .. } => ErrorCode::ValueOutOfRange,
        }
    }
}

impl From<AssessmentError> for AppError {
    fn from(error: AssessmentError) -> Self {
        let code = error.code();
        match &error {
            AssessmentError::RetryableInput { reason } => {
                Self::new(code, reason.clone()).with_details(json!({ "reason": reason }))
            }
            AssessmentError::BlendUndefined {
                measurement_weight,
                estimate_weight,
            } => Self::new(code, error.to_string()).with_details(json!({
                "measurement_weight": measurement_weight,
                "estimate_weight": estimate_weight,
            })),
            AssessmentError::Unparseable { details, report } => {
                let excerpt: String = report.chars().take(REPORT_EXCERPT_LIMIT).collect();
                Self::new(code, details.clone()).with_details(json!({ "report": excerpt }))
            }
            AssessmentError::UnknownPose(pose) => {
                Self::new(code, error.to_string()).with_resource_id(pose.clone())
            }
            AssessmentError::InvalidBiologicalAge { .. } => Self::new(code, error.to_string()),
        }
    }
}
