// ABOUTME: Multi-pose session command for mobility-cli
// ABOUTME: Scores each pose report, prints the overall mobility age, and records history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use mobility_age::{errors::AppResult, history::HistoryStore, services::AssessmentService, ReportParser};
use tracing::{info, warn};

use crate::helpers::display::{display_session, print_json, OutputFormat};
use crate::helpers::input::{read_report, PoseReportArg};

type Result<T> = AppResult<T>;

/// Score every `<pose>=<file>` report, then summarize and optionally save
///
/// Stops at the first pose that fails so a recapture request is never
/// hidden behind a partial session.
pub async fn run<H: HistoryStore, P: ReportParser>(
    service: &AssessmentService<H, P>,
    age: u32,
    reports: &[PoseReportArg],
    save: bool,
    format: OutputFormat,
) -> Result<()> {
    let mut session = service.start_session(age);

    for arg in reports {
        let source = arg.path.to_string_lossy();
        info!(pose = %arg.pose, source = %source, "Analyzing session pose");
        let report = read_report(&source).await?;
        let outcome = service.analyze_pose(&report, &arg.pose, age)?;
        if let Some(previous) = session.record(outcome) {
            warn!(
                pose = previous.pose.as_str(),
                "pose given more than once; keeping the last report"
            );
        }
    }

    let summary = if save {
        service.complete_session(&session).await?
    } else {
        service.summarize_session(&session)?
    };

    match format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Text => display_session(&summary),
    }
    Ok(())
}
