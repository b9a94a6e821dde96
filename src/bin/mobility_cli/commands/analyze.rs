// ABOUTME: Single-pose analysis command for mobility-cli
// ABOUTME: Reads one report and prints the scored outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use mobility_age::{errors::AppResult, history::HistoryStore, services::AssessmentService, ReportParser};
use tracing::info;

use crate::helpers::display::{display_outcome, print_json, OutputFormat};
use crate::helpers::input::read_report;

type Result<T> = AppResult<T>;

/// Score one pose report
pub async fn run<H: HistoryStore, P: ReportParser>(
    service: &AssessmentService<H, P>,
    pose: &str,
    age: u32,
    report_source: &str,
    format: OutputFormat,
) -> Result<()> {
    info!(pose = %pose, source = %report_source, "Analyzing pose report");
    let report = read_report(report_source).await?;
    let outcome = service.analyze_pose(&report, pose, age)?;

    match format {
        OutputFormat::Json => print_json(&outcome)?,
        OutputFormat::Text => display_outcome(&outcome),
    }
    Ok(())
}
