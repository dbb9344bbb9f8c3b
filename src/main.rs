//! Retake exam timetabling CLI.
//!
//! Reads an enrolment table pasted from a spreadsheet and prints a ranked
//! shortlist of timetables.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use retake_schedule::config::SchedulerConfig;
use retake_schedule::ingest::parse_pasted_table;
use retake_schedule::models::{ExamDuration, ScheduleResult};
use retake_schedule::scheduler::{ExamScheduler, ScheduleKpi};

#[derive(Parser)]
#[command(name = "retake-schedule")]
#[command(about = "Builds retake exam timetables from pasted enrolment data")]
struct Cli {
    /// Tab-separated enrolment table
    input: PathBuf,

    /// TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Exam length in minutes: 60 or 90
    #[arg(long, short)]
    duration: Option<u32>,

    /// Random seed
    #[arg(long, short)]
    seed: Option<u64>,

    /// Number of random restarts
    #[arg(long, short)]
    restarts: Option<usize>,

    /// Print the shortlist as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => SchedulerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SchedulerConfig::default(),
    };
    if let Some(minutes) = cli.duration {
        config.duration = ExamDuration::try_from(minutes)?;
    }
    if let Some(seed) = cli.seed {
        config.random_seed = Some(seed);
    }
    if let Some(restarts) = cli.restarts {
        config.random_restarts = restarts;
    }

    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let table = parse_pasted_table(&text);
    if table.is_empty() {
        bail!(
            "no enrolment found in {} (expected a header row naming CATALÀ or CASTELLÀ)",
            cli.input.display()
        );
    }
    info!(
        students = table.students.len(),
        subjects = table.subjects.len(),
        "loaded enrolment"
    );

    let shortlist = ExamScheduler::new(config).schedule(table.subjects)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&shortlist)?);
    } else {
        for (i, result) in shortlist.iter().enumerate() {
            print_option(i + 1, result);
        }
    }
    Ok(())
}

fn print_option(number: usize, result: &ScheduleResult) {
    let kpi = ScheduleKpi::calculate(result);
    println!(
        "=== Option {number}: {} days, {} weeks, {} exams ===",
        kpi.distinct_days, kpi.weeks_spanned, kpi.exam_count
    );

    for slot in &result.used_slots {
        let subjects: Vec<&str> = result
            .exams_in_slot(slot.id)
            .map(|e| e.subject.as_str())
            .collect();
        println!(
            "  Week {} {} {}: {}",
            slot.week_index + 1,
            slot.day.label(),
            slot.time_range,
            subjects.join(", ")
        );
    }

    if !result.is_complete() {
        println!("  Unassignable: {}", result.unassignable.join(", "));
    }
    println!();
}
