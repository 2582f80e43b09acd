//! Resolved per-plan quantities shared by every sample of a projection

use crate::error::Result;
use crate::plan::{ContributionPlan, ContributionTiming};
use crate::rates::{effective_annual_rate, to_equivalent_rate_from_annual};

/// Plan inputs resolved into period terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionState {
    /// Contributions per year after frequency lookup
    pub contributions_per_year: f64,

    /// Nominal annual rate compounded at the contribution frequency
    pub equivalent_rate: f64,

    /// Growth applied once per period
    pub per_period_rate: f64,

    /// Contribution periods over the horizon (may be fractional)
    pub total_periods: f64,

    /// Extra growth factor for start-of-period contributions (1 for end-of-period)
    pub timing_factor: f64,
}

impl ProjectionState {
    pub fn from_plan(plan: &ContributionPlan) -> Result<Self> {
        let contributions_per_year = plan.contributions_per_year()?;
        let total_periods = plan.total_periods()?;
        let equivalent_rate = to_equivalent_rate_from_annual(plan.annual_rate, contributions_per_year)?;
        let per_period_rate = equivalent_rate / contributions_per_year;

        let timing_factor = match plan.timing {
            ContributionTiming::Start => 1.0 + per_period_rate,
            ContributionTiming::End => 1.0,
        };

        Ok(Self {
            contributions_per_year,
            equivalent_rate,
            per_period_rate,
            total_periods,
            timing_factor,
        })
    }

    /// Growth factor per period
    pub fn common_ratio(&self) -> f64 {
        1.0 + self.per_period_rate
    }

    /// Effective annual growth implied by the per-period rate
    pub fn effective_annual_rate(&self) -> Result<f64> {
        effective_annual_rate(self.equivalent_rate, self.contributions_per_year)
    }

    /// Years elapsed at a period position
    pub fn years_at(&self, period: f64) -> f64 {
        period / self.contributions_per_year
    }
}
