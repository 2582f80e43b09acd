//! Future value of a level contribution schedule

use super::series::{sum_geometric_series, FutureValue, SeriesMode};
use crate::error::Result;
use crate::plan::{ContributionPlan, ContributionTiming};
use crate::rates::{growth_factor, FrequencySpec};

/// Project `plan` forward to the end of its horizon
///
/// The per-period rate is derived through the equivalent-rate conversion, so
/// `contributions_per_year` periods compound to exactly the plan's annual rate.
/// Start-of-period contributions get one extra period of growth, applied to the
/// total or to every sample.
///
/// # Errors
/// `InvalidParameter` for a non-positive frequency or duration,
/// `UndefinedOperation` if the rate cannot be converted to the plan's frequency
/// or the resulting growth ratio is negative over a fractional horizon.
pub fn to_future_value_of_contribution(plan: &ContributionPlan, mode: SeriesMode) -> Result<FutureValue> {
    let contributions_per_year = plan.contributions_per_year()?;
    let total_periods = plan.total_periods()?;
    let common_ratio = growth_factor(plan.annual_rate, contributions_per_year)?;

    let value = sum_geometric_series(plan.contribution_amount, common_ratio, total_periods, mode)?;

    Ok(match plan.timing {
        ContributionTiming::Start => value.scale(common_ratio),
        ContributionTiming::End => value,
    })
}

/// Single future value from positional inputs
pub fn future_value(
    annual_rate: f64,
    contribution_amount: f64,
    frequency: impl Into<FrequencySpec>,
    duration_years: f64,
    timing: ContributionTiming,
) -> Result<f64> {
    let plan = ContributionPlan::new(annual_rate, contribution_amount, frequency, duration_years).with_timing(timing);
    Ok(to_future_value_of_contribution(&plan, SeriesMode::Total)?.final_value())
}
