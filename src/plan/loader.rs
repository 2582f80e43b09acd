//! Load contribution plans from CSV
//!
//! Expected columns: `label,annual_rate,contribution_amount,frequency,duration_years,timing`.
//! `frequency` is a name (`monthly`) or a number (`12`); `label` and `timing` may be blank.

use super::{ContributionPlan, ContributionTiming};
use crate::rates::FrequencySpec;
use csv::{Reader, Writer};
use std::error::Error;
use std::path::Path;

/// Raw CSV row; text columns are parsed into typed plan fields
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    label: Option<String>,
    annual_rate: f64,
    contribution_amount: f64,
    frequency: String,
    duration_years: f64,
    #[serde(default)]
    timing: Option<String>,
}

impl CsvRow {
    fn to_plan(self) -> Result<ContributionPlan, Box<dyn Error>> {
        let frequency: FrequencySpec = self.frequency.parse()?;
        let timing: ContributionTiming = match self.timing {
            Some(ref t) => t.parse()?,
            None => ContributionTiming::End,
        };

        Ok(ContributionPlan {
            label: self.label.filter(|l| !l.trim().is_empty()),
            annual_rate: self.annual_rate,
            contribution_amount: self.contribution_amount,
            frequency,
            duration_years: self.duration_years,
            timing,
        })
    }
}

/// Load all plans from a CSV file
pub fn load_plans<P: AsRef<Path>>(path: P) -> Result<Vec<ContributionPlan>, Box<dyn Error>> {
    let reader = std::fs::File::open(path)?;
    load_plans_from_reader(reader)
}

/// Load plans from any reader (e.g., string buffer, request body)
pub fn load_plans_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<ContributionPlan>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut plans = Vec::new();

    for (line, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        let plan = row
            .to_plan()
            .map_err(|e| format!("plan row {}: {}", line + 1, e))?;
        plans.push(plan);
    }

    Ok(plans)
}

/// Write plans back out in the same column layout
pub fn write_plans<W: std::io::Write>(writer: W, plans: &[ContributionPlan]) -> Result<(), Box<dyn Error>> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(["label", "annual_rate", "contribution_amount", "frequency", "duration_years", "timing"])?;

    for plan in plans {
        csv_writer.write_record([
            plan.label.clone().unwrap_or_default(),
            plan.annual_rate.to_string(),
            plan.contribution_amount.to_string(),
            plan.frequency.to_string(),
            plan.duration_years.to_string(),
            plan.timing.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
