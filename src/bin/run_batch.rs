//! Run projections for every plan in a CSV file
//!
//! Writes one summary row per plan, and optionally every schedule row

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use contribution_growth::plan::{load_plans, write_plans};
use contribution_growth::{ProjectionConfig, Sampling, ScenarioRunner, SeriesMode};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "run_batch", about = "Project a CSV of contribution plans in parallel")]
struct Args {
    /// Plans CSV (label,annual_rate,contribution_amount,frequency,duration_years,timing)
    #[arg(short, long, default_value = "plans.csv")]
    input: PathBuf,

    /// Summary output CSV
    #[arg(short, long, default_value = "batch_projection_output.csv")]
    output: PathBuf,

    /// Also write every schedule row to this CSV
    #[arg(long)]
    schedule_output: Option<PathBuf>,

    /// Write plans that failed to project to this CSV, in the input layout
    #[arg(long)]
    failed_output: Option<PathBuf>,

    /// Sample points per year for the schedule (default: once per contribution period)
    #[arg(long)]
    samples_per_year: Option<f64>,
}

/// One output line per plan
#[derive(Debug, Serialize)]
struct SummaryRow {
    label: String,
    status: String,
    contributions_per_year: Option<f64>,
    per_period_rate: Option<f64>,
    total_periods: Option<f64>,
    total_contributed: Option<f64>,
    final_value: Option<f64>,
    total_growth: Option<f64>,
}

/// Schedule row tagged with its plan
#[derive(Debug, Serialize)]
struct LabelledScheduleRow<'a> {
    label: &'a str,
    sample: u32,
    period: f64,
    years: f64,
    contributed: f64,
    value: f64,
    growth: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading plans from {}...", args.input.display());

    let plans = load_plans(&args.input)
        .map_err(|e| anyhow!("Failed to load plans from {}: {}", args.input.display(), e))?;
    println!("Loaded {} plans in {:?}", plans.len(), start.elapsed());

    // Grid is per plan when sampling by year, since it depends on duration
    println!("Running projections...");
    let proj_start = Instant::now();
    let results: Vec<_> = match args.samples_per_year {
        None => ScenarioRunner::default().run_batch(&plans),
        Some(per_year) => plans
            .par_iter()
            .map(|plan| {
                let sampling = Sampling::per_year(per_year, plan.duration_years)?;
                let config = ProjectionConfig {
                    mode: SeriesMode::Sampled(sampling),
                    start_date: None,
                };
                ScenarioRunner::new(config).run(plan)
            })
            .collect(),
    };
    println!("Projections complete in {:?}", proj_start.elapsed());

    let labels: Vec<String> = plans
        .iter()
        .enumerate()
        .map(|(i, plan)| plan.label.clone().unwrap_or_else(|| format!("plan_{}", i + 1)))
        .collect();

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let mut failures = 0;

    for (label, result) in labels.iter().zip(&results) {
        let row = match result {
            Ok(projection) => {
                let summary = projection.summary();
                SummaryRow {
                    label: label.clone(),
                    status: "ok".to_string(),
                    contributions_per_year: Some(projection.contributions_per_year),
                    per_period_rate: Some(projection.per_period_rate),
                    total_periods: Some(projection.total_periods),
                    total_contributed: Some(summary.total_contributed),
                    final_value: Some(summary.final_value),
                    total_growth: Some(summary.total_growth),
                }
            }
            Err(e) => {
                failures += 1;
                SummaryRow {
                    label: label.clone(),
                    status: e.to_string(),
                    contributions_per_year: None,
                    per_period_rate: None,
                    total_periods: None,
                    total_contributed: None,
                    final_value: None,
                    total_growth: None,
                }
            }
        };
        writer.serialize(row)?;
    }
    writer.flush()?;
    println!("Summary written to: {}", args.output.display());

    if let Some(ref path) = args.schedule_output {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        for (label, result) in labels.iter().zip(&results) {
            let Ok(projection) = result else { continue };
            for row in &projection.schedule {
                writer.serialize(LabelledScheduleRow {
                    label,
                    sample: row.sample,
                    period: row.period,
                    years: row.years,
                    contributed: row.contributed,
                    value: row.value,
                    growth: row.growth,
                })?;
            }
        }
        writer.flush()?;
        println!("Schedules written to: {}", path.display());
    }

    if let Some(ref path) = args.failed_output {
        let failed: Vec<_> = plans
            .iter()
            .zip(&results)
            .filter(|(_, result)| result.is_err())
            .map(|(plan, _)| plan.clone())
            .collect();
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_plans(file, &failed)
            .map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))?;
        println!("Failed plans written to: {}", path.display());
    }

    println!("\nSummary:");
    println!("  Plans: {}", plans.len());
    println!("  Failed: {}", failures);
    println!("  Total time: {:?}", start.elapsed());

    Ok(())
}
