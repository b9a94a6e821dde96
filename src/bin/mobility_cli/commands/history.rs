// ABOUTME: History listing command for mobility-cli
// ABOUTME: Prints recorded sessions oldest first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use mobility_age::{errors::AppResult, history::HistoryStore, services::AssessmentService, ReportParser};

use crate::helpers::display::{display_history, print_json, OutputFormat};

type Result<T> = AppResult<T>;

/// List recorded sessions
pub async fn run<H: HistoryStore, P: ReportParser>(
    service: &AssessmentService<H, P>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let records = service.history(limit).await?;
    match format {
        OutputFormat::Json => print_json(&records)?,
        OutputFormat::Text => display_history(&records),
    }
    Ok(())
}
