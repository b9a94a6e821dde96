// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for mobility-cli
// ABOUTME: Prints outcomes, session summaries, history, and errors as text or JSON

use clap::ValueEnum;
use mobility_age::errors::{AppError, AppResult};
use mobility_age::models::{AssessmentOutcome, DeficiencySource, Exercise, HistoryRecord};
use mobility_age::services::SessionSummary;
use serde::Serialize;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Display one scored pose
pub fn display_outcome(outcome: &AssessmentOutcome) {
    println!("\n{} Assessment", outcome.pose.display_name());
    println!("{}", "=".repeat(50));
    println!("   Biological age:  {}", outcome.biological_age);
    println!("   Mobility age:    {}", outcome.mobility_age);
    println!(
        "   Form:            {}",
        if outcome.is_good_form { "good" } else { "needs work" }
    );
    println!(
        "   Reliability:     {:.0}% of expected measurements",
        outcome.measurement_reliability * 100.0
    );
    println!(
        "   Stated estimate: {} (confidence {:.0}%)",
        outcome.physiotherapist_estimate,
        outcome.confidence * 100.0
    );

    if let Some(measurements) = &outcome.measurements {
        println!("\nMeasurements:");
        for (kind, value) in measurements.iter() {
            println!("   {kind}: {value}{}", kind.unit().symbol());
        }
    }

    if !outcome.breakdown.deficiencies.is_empty() {
        println!("\nDeficiencies:");
        for deficiency in &outcome.breakdown.deficiencies {
            let what = match deficiency.source {
                DeficiencySource::Measurement {
                    measurement,
                    observed,
                    clinical_bound,
                } => format!("{measurement} {observed} (clinical bound {clinical_bound})"),
                DeficiencySource::PoorForm => "poor form".to_owned(),
            };
            println!(
                "   - {what}: {} (+{:.1} years)",
                deficiency.severity, deficiency.penalty_years
            );
        }
    }

    if !outcome.feedback.is_empty() {
        println!("\nFeedback:\n   {}", outcome.feedback);
    }
    if !outcome.recommendations.is_empty() {
        println!("\nRecommendations:");
        for recommendation in &outcome.recommendations {
            println!("   - {recommendation}");
        }
    }
    display_exercises(&outcome.exercises);

    if !outcome.warnings.is_empty() {
        println!("\nReport warnings:");
        for warning in &outcome.warnings {
            println!("   - {}", warning.message);
        }
    }
}

fn display_exercises(exercises: &[Exercise]) {
    if exercises.is_empty() {
        return;
    }
    println!("\nExercises:");
    for exercise in exercises {
        let volume = match (exercise.sets, exercise.reps.as_deref()) {
            (Some(sets), Some(reps)) => format!(" - {sets} x {reps}"),
            (Some(sets), None) => format!(" - {sets} sets"),
            (None, Some(reps)) => format!(" - {reps}"),
            (None, None) => String::new(),
        };
        println!(
            "   - {} [{}]{volume}",
            exercise.name,
            exercise.difficulty.as_str()
        );
        if !exercise.description.is_empty() {
            println!("     {}", exercise.description);
        }
    }
}

/// Display a completed session
pub fn display_session(summary: &SessionSummary) {
    let record = &summary.record;
    println!("\nMobility Assessment Session");
    println!("{}", "=".repeat(50));
    for (pose, age) in &record.pose_ages {
        println!("   {:<20} {age}", pose.display_name());
    }
    println!("{}", "-".repeat(50));
    println!("   Biological age:       {}", record.biological_age);
    println!("   Overall mobility age: {}", record.overall_mobility_age);
    println!("   Difference:           {:+}", record.age_gap());
    display_exercises(&summary.exercises);

    if summary.saved {
        println!("\nSession saved to history ({})", record.id);
    } else {
        println!("\nSession not saved");
    }
}

/// Display history records, oldest first
pub fn display_history(records: &[HistoryRecord]) {
    if records.is_empty() {
        println!("No assessment sessions recorded yet");
        return;
    }
    println!("\n{:<18} {:>5} {:>9} {:>6}  Poses", "Date", "Age", "Mobility", "Diff");
    println!("{}", "=".repeat(70));
    for record in records {
        let poses: Vec<String> = record
            .pose_ages
            .iter()
            .map(|(pose, age)| format!("{}={age}", pose.as_str()))
            .collect();
        println!(
            "{:<18} {:>5} {:>9} {:>+6}  {}",
            record.date.format("%Y-%m-%d %H:%M"),
            record.biological_age,
            record.overall_mobility_age,
            record.age_gap(),
            poses.join(", ")
        );
    }
}

/// Report a failure on stderr; recapture requests get their own wording
pub fn display_error(error: &AppError) {
    if error.is_retryable() {
        eprintln!("Please retake the photo: {}", error.message);
        return;
    }
    eprintln!("Error: {error}");
    if let Some(resource) = &error.context.resource_id {
        eprintln!("   Resource: {resource}");
    }
}
