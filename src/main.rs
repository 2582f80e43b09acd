//! Contribution Growth CLI
//!
//! Projects a level contribution schedule and prints the growth schedule

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use contribution_growth::{
    ContributionPlan, ContributionTiming, FrequencySpec, ProjectionConfig, ProjectionEngine,
    ProjectionResult, Sampling, SeriesMode,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

/// Future value of periodic contributions under compound interest
#[derive(Parser, Debug)]
#[command(name = "contribution_growth")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Annual rate, compounded annually (0.10 = 10%)
    #[arg(short, long)]
    rate: f64,

    /// Amount contributed each period
    #[arg(short, long)]
    amount: f64,

    /// Contribution frequency: daily, weekly, biweekly, monthly, quarterly, biannually, annually, or periods per year
    #[arg(short, long, default_value = "monthly")]
    frequency: FrequencySpec,

    /// Horizon in years (may be fractional)
    #[arg(short, long)]
    years: f64,

    /// Contribution timing within each period
    #[arg(short, long, default_value = "end")]
    timing: ContributionTiming,

    /// Output only the horizon value, or a sample per period
    #[arg(short, long, value_enum, default_value = "each-period")]
    mode: ModeArg,

    /// Sample on an even grid with this many points per year instead of once per period
    #[arg(long)]
    samples_per_year: Option<f64>,

    /// Date of the first contribution period, used to date each sample (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Total,
    EachPeriod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let plan = ContributionPlan::new(cli.rate, cli.amount, cli.frequency, cli.years).with_timing(cli.timing);

    let mode = match (cli.mode, cli.samples_per_year) {
        (ModeArg::Total, _) => SeriesMode::Total,
        (ModeArg::EachPeriod, None) => SeriesMode::Sampled(Sampling::EachPeriod),
        (ModeArg::EachPeriod, Some(per_year)) => SeriesMode::Sampled(Sampling::per_year(per_year, cli.years)?),
    };

    let config = ProjectionConfig {
        mode,
        start_date: cli.start_date,
    };

    let result = ProjectionEngine::new(config)
        .project(&plan)
        .context("Projection failed")?;

    let mut out: Box<dyn Write> = match cli.output {
        Some(ref path) => Box::new(
            File::create(path).with_context(|| format!("Unable to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    match cli.format {
        OutputFormat::Table => write_table(&mut out, &plan, &result)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &result)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut out);
            for row in &result.schedule {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}

fn write_table(out: &mut dyn Write, plan: &ContributionPlan, result: &ProjectionResult) -> Result<()> {
    writeln!(out, "Contribution Growth v{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "========================\n")?;
    writeln!(out, "Plan:")?;
    writeln!(out, "  Annual Rate: {:.4}%", plan.annual_rate * 100.0)?;
    writeln!(out, "  Contribution: ${:.2} {} ({} per year)", plan.contribution_amount, plan.frequency, result.contributions_per_year)?;
    writeln!(out, "  Duration: {} years ({:.4} periods)", plan.duration_years, result.total_periods)?;
    writeln!(out, "  Timing: {}", plan.timing)?;
    writeln!(out, "  Per-Period Rate: {:.8}", result.per_period_rate)?;
    writeln!(out)?;

    writeln!(out, "{:>6} {:>10} {:>8} {:>12} {:>14} {:>14} {:>14}",
        "Sample", "Period", "Years", "Date", "Contributed", "Value", "Growth")?;
    writeln!(out, "{}", "-".repeat(84))?;

    for row in &result.schedule {
        let date = row.date.map(|d| d.to_string()).unwrap_or_default();
        writeln!(out, "{:>6} {:>10.4} {:>8.4} {:>12} {:>14.2} {:>14.2} {:>14.2}",
            row.sample, row.period, row.years, date, row.contributed, row.value, row.growth)?;
    }

    let summary = result.summary();
    writeln!(out, "\nSummary:")?;
    writeln!(out, "  Samples: {}", summary.samples)?;
    writeln!(out, "  Total Contributed: ${:.2}", summary.total_contributed)?;
    writeln!(out, "  Final Value: ${:.2}", summary.final_value)?;
    writeln!(out, "  Total Growth: ${:.2}", summary.total_growth)?;
    writeln!(out, "  Effective Annual Rate: {:.4}%", summary.effective_annual_rate * 100.0)?;

    Ok(())
}
