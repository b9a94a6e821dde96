// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Report input helpers for mobility-cli
// ABOUTME: Reads reports from files or stdin and parses pose=file arguments

use std::path::PathBuf;

use mobility_age::errors::{AppError, AppResult};
use tokio::fs;
use tokio::io::{self, AsyncReadExt};

/// One `--report <pose>=<file>` argument
#[derive(Debug, Clone)]
pub struct PoseReportArg {
    pub pose: String,
    pub path: PathBuf,
}

/// Clap value parser for `<pose>=<file>`
pub fn parse_pose_report(value: &str) -> Result<PoseReportArg, String> {
    let (pose, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected <pose>=<file>, got '{value}'"))?;
    let (pose, path) = (pose.trim(), path.trim());
    if pose.is_empty() || path.is_empty() {
        return Err(format!("expected <pose>=<file>, got '{value}'"));
    }
    Ok(PoseReportArg {
        pose: pose.to_owned(),
        path: PathBuf::from(path),
    })
}

/// Read a report from a file, or from stdin when `source` is `-`
pub async fn read_report(source: &str) -> AppResult<String> {
    if source == "-" {
        let mut report = String::new();
        io::stdin()
            .read_to_string(&mut report)
            .await
            .map_err(|e| AppError::invalid_input(format!("failed to read report from stdin: {e}")))?;
        return Ok(report);
    }
    fs::read_to_string(source).await.map_err(|e| {
        AppError::invalid_input(format!("failed to read report file {source}: {e}"))
            .with_resource_id(source)
            .with_source(e)
    })
}
