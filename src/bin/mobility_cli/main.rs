// ABOUTME: mobility-cli - command-line front end for mobility age assessments
// ABOUTME: Analyzes pose reports, runs multi-pose sessions, and lists assessment history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Score one pose report (JSON output)
//! mobility-cli analyze --pose deep_squat --age 40 --report squat.txt
//!
//! # Read the report from stdin and print a readable summary
//! cat fold.txt | mobility-cli analyze --pose "Forward Fold" --age 40 --report - --format text
//!
//! # Score several poses and record the session
//! mobility-cli session --age 40 --report deep_squat=squat.txt --report forward_fold=fold.txt
//!
//! # Show the five most recent sessions
//! mobility-cli history --limit 5
//! ```
//!
//! Exit codes: 0 success, 2 invalid input, 3 recapture requested,
//! 4 not enough information to score, 78 configuration error.

mod commands;
mod helpers;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mobility_age::{
    config::{AppConfig, IntelligenceConfig},
    errors::{AppError, AppResult},
    history::{HistoryStore, HistoryStorage},
    logging::LoggingConfig,
    services::AssessmentService,
    MobilityScoreEngine, ReportParser, StructuredReportParser,
};

type Result<T> = AppResult<T>;

use helpers::display::{display_error, OutputFormat};
use helpers::input::PoseReportArg;

#[derive(Parser)]
#[command(
    name = "mobility-cli",
    about = "Mobility age assessment CLI",
    long_about = "Scores pose reports from a vision model into a mobility age and keeps a history of assessment sessions."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// History file override (defaults to MOBILITY_HISTORY_PATH or the platform data dir)
    #[arg(long, global = true)]
    history_path: Option<PathBuf>,

    /// Parse reports as structured JSON instead of free text
    #[arg(long, global = true)]
    structured: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Score a single pose report
    Analyze {
        /// Pose identity, e.g. deep_squat, "Forward Fold", knee-to-wall-test
        #[arg(long)]
        pose: String,

        /// Biological age in years
        #[arg(long)]
        age: u32,

        /// Report file, or - for stdin
        #[arg(long)]
        report: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Score several poses and record the session to history
    Session {
        /// Biological age in years
        #[arg(long)]
        age: u32,

        /// Pose report as <pose>=<file>, repeatable
        #[arg(long = "report", required = true, value_parser = helpers::input::parse_pose_report)]
        reports: Vec<PoseReportArg>,

        /// Print the summary without writing history
        #[arg(long)]
        no_save: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List past assessment sessions
    History {
        /// Show only the most recent N sessions
        #[arg(long)]
        limit: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::for_cli();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    if let Err(e) = logging.init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            display_error(&error);
            ExitCode::from(u8::try_from(error.code.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::from_env().map_err(|e| AppError::config(format!("{e:#}")))?;
    if let Some(path) = cli.history_path {
        config.history_path = path;
    }
    let storage = HistoryStorage::from_config(&config);

    if cli.structured {
        let intelligence = IntelligenceConfig::global().clone();
        let parser = StructuredReportParser::new(intelligence.parser.clone());
        let engine = MobilityScoreEngine::with_parser(parser, intelligence);
        execute(cli.command, &AssessmentService::new(engine, storage)).await
    } else {
        execute(cli.command, &AssessmentService::with_default_engine(storage)).await
    }
}

async fn execute<H: HistoryStore, P: ReportParser>(
    command: Command,
    service: &AssessmentService<H, P>,
) -> Result<()> {
    match command {
        Command::Analyze {
            pose,
            age,
            report,
            format,
        } => commands::analyze::run(service, &pose, age, &report, format).await,
        Command::Session {
            age,
            reports,
            no_save,
            format,
        } => commands::session::run(service, age, &reports, !no_save, format).await,
        Command::History { limit, format } => {
            commands::history::run(service, limit, format).await
        }
    }
}
