//! Contribution plan inputs

use crate::error::{GrowthError, Result};
use crate::rates::FrequencySpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// When each period's contribution is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContributionTiming {
    /// Start of period: the contribution earns that period's growth (annuity due)
    Start,
    /// End of period: the contribution earns nothing in its own period (ordinary annuity)
    #[default]
    End,
}

impl ContributionTiming {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionTiming::Start => "start",
            ContributionTiming::End => "end",
        }
    }
}

impl fmt::Display for ContributionTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContributionTiming {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" | "begin" | "due" => Ok(ContributionTiming::Start),
            "end" | "" => Ok(ContributionTiming::End),
            other => Err(GrowthError::invalid("timing", format!("expected `start` or `end`, got `{}`", other))),
        }
    }
}

/// A level contribution schedule to project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionPlan {
    /// Optional name carried through to results
    #[serde(default)]
    pub label: Option<String>,

    /// Annual rate, compounded annually (0.10 = 10%)
    pub annual_rate: f64,

    /// Amount contributed every period
    pub contribution_amount: f64,

    /// Contributions per year, named or numeric
    pub frequency: FrequencySpec,

    /// Investment horizon in years (may be fractional)
    pub duration_years: f64,

    /// Start- or end-of-period contributions
    #[serde(default)]
    pub timing: ContributionTiming,
}

impl ContributionPlan {
    /// Create an end-of-period plan
    pub fn new(
        annual_rate: f64,
        contribution_amount: f64,
        frequency: impl Into<FrequencySpec>,
        duration_years: f64,
    ) -> Self {
        Self {
            label: None,
            annual_rate,
            contribution_amount,
            frequency: frequency.into(),
            duration_years,
            timing: ContributionTiming::End,
        }
    }

    pub fn with_timing(mut self, timing: ContributionTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Same plan at a different annual rate
    pub fn with_rate(&self, annual_rate: f64) -> Self {
        Self {
            annual_rate,
            ..self.clone()
        }
    }

    /// Resolved contributions per year
    pub fn contributions_per_year(&self) -> Result<f64> {
        self.frequency.periods_per_year()
    }

    /// Number of contribution periods over the horizon
    pub fn total_periods(&self) -> Result<f64> {
        let per_year = self.contributions_per_year()?;
        let years = GrowthError::require_positive("duration_years", self.duration_years)?;
        Ok(per_year * years)
    }
}
