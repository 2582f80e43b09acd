//! Sampled growth schedule output

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::accumulation::FutureValue;

/// Accumulated position at one sample point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Sample number (1-indexed)
    pub sample: u32,

    /// Position along the horizon in contribution periods
    pub period: f64,

    /// Position along the horizon in years
    pub years: f64,

    /// Calendar date of the sample when a start date was configured
    pub date: Option<NaiveDate>,

    /// Contributions paid in so far
    pub contributed: f64,

    /// Accumulated value
    pub value: f64,

    /// Value in excess of contributions
    pub growth: f64,
}

/// Complete projection result for one plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Plan label, if any
    pub label: Option<String>,

    pub contributions_per_year: f64,
    pub per_period_rate: f64,
    pub total_periods: f64,
    pub effective_annual_rate: f64,

    /// Sampled rows (a single horizon row in total mode)
    pub schedule: Vec<ScheduleRow>,

    /// Raw accumulator output
    pub future_value: FutureValue,
}

impl ProjectionResult {
    /// Value at the end of the horizon
    pub fn final_value(&self) -> f64 {
        self.future_value.final_value()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let last = self.schedule.last();
        let total_contributed = last.map(|r| r.contributed).unwrap_or(0.0);
        let final_value = self.final_value();

        ProjectionSummary {
            samples: self.schedule.len() as u32,
            total_periods: self.total_periods,
            total_contributed,
            final_value,
            total_growth: final_value - total_contributed,
            effective_annual_rate: self.effective_annual_rate,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub samples: u32,
    pub total_periods: f64,
    pub total_contributed: f64,
    pub final_value: f64,
    pub total_growth: f64,
    pub effective_annual_rate: f64,
}
