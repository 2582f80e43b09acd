//! Projection engine turning a contribution plan into a growth schedule

use chrono::{Duration, NaiveDate};
use log::debug;

use super::schedule::{ProjectionResult, ScheduleRow};
use super::state::ProjectionState;
use crate::accumulation::{sum_geometric_series, Sampling, SeriesMode};
use crate::error::Result;
use crate::plan::ContributionPlan;
use crate::rates::DAYS_PER_YEAR;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Single horizon value or a sampled schedule
    pub mode: SeriesMode,

    /// Anchor for sample dates; rows carry no date when unset
    pub start_date: Option<NaiveDate>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            mode: SeriesMode::Sampled(Sampling::EachPeriod),
            start_date: None,
        }
    }
}

impl ProjectionConfig {
    /// Horizon value only
    pub fn total() -> Self {
        Self {
            mode: SeriesMode::Total,
            start_date: None,
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run projection for a single plan
    pub fn project(&self, plan: &ContributionPlan) -> Result<ProjectionResult> {
        let state = ProjectionState::from_plan(plan)?;
        debug!(
            "plan {:?}: {} periods/year, per-period rate {:.8}, {} periods",
            plan.label, state.contributions_per_year, state.per_period_rate, state.total_periods
        );

        let points = match self.config.mode {
            SeriesMode::Total => vec![state.total_periods],
            SeriesMode::Sampled(sampling) => sampling.points(state.total_periods)?,
        };
        let future_value = sum_geometric_series(
            plan.contribution_amount,
            state.common_ratio(),
            state.total_periods,
            self.config.mode,
        )?
        .scale(state.timing_factor);

        let schedule: Vec<ScheduleRow> = points
            .iter()
            .zip(future_value.values())
            .enumerate()
            .map(|(i, (&period, &value))| self.schedule_row(plan, &state, i as u32 + 1, period, value))
            .collect();

        debug!("plan {:?}: final value {:.2} over {} samples", plan.label, future_value.final_value(), schedule.len());

        Ok(ProjectionResult {
            label: plan.label.clone(),
            contributions_per_year: state.contributions_per_year,
            per_period_rate: state.per_period_rate,
            total_periods: state.total_periods,
            effective_annual_rate: state.effective_annual_rate()?,
            schedule,
            future_value,
        })
    }

    fn schedule_row(
        &self,
        plan: &ContributionPlan,
        state: &ProjectionState,
        sample: u32,
        period: f64,
        value: f64,
    ) -> ScheduleRow {
        let years = state.years_at(period);
        let contributed = plan.contribution_amount * period;
        let date = self.config.start_date.and_then(|start| {
            // Offsets past the calendar range leave the row undated
            let days = (years * DAYS_PER_YEAR).round() as i64;
            Duration::try_days(days).and_then(|offset| start.checked_add_signed(offset))
        });

        ScheduleRow {
            sample,
            period,
            years,
            date,
            contributed,
            value,
            growth: value - contributed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulation::to_future_value_of_contribution;
    use crate::error::GrowthError;
    use crate::plan::ContributionTiming;
    use crate::rates::NamedFrequency;
    use approx::assert_relative_eq;

    fn monthly_plan() -> ContributionPlan {
        ContributionPlan::new(0.10, 1000.0, NamedFrequency::Monthly, 5.0).with_label("retirement")
    }

    #[test]
    fn test_each_period_schedule() {
        let engine = ProjectionEngine::default();
        let result = engine.project(&monthly_plan()).unwrap();

        assert_eq!(result.schedule.len(), 60);
        assert_eq!(result.label.as_deref(), Some("retirement"));

        let first = &result.schedule[0];
        assert_eq!(first.sample, 1);
        assert_relative_eq!(first.value, 1000.0, epsilon = 1e-9);
        assert_relative_eq!(first.growth, 0.0, epsilon = 1e-9);

        let last = result.schedule.last().unwrap();
        assert_relative_eq!(last.years, 5.0);
        assert_relative_eq!(last.contributed, 60_000.0);
        assert!((last.value - 76_561.23).abs() < 0.01);
        assert_relative_eq!(last.value, result.final_value());
    }

    #[test]
    fn test_schedule_is_increasing() {
        let engine = ProjectionEngine::default();
        let result = engine.project(&monthly_plan()).unwrap();
        for pair in result.schedule.windows(2) {
            assert!(pair[1].value > pair[0].value);
            assert!(pair[1].growth >= pair[0].growth);
        }
    }

    #[test]
    fn test_total_mode_single_row() {
        let engine = ProjectionEngine::new(ProjectionConfig::total());
        let result = engine.project(&monthly_plan()).unwrap();
        assert_eq!(result.schedule.len(), 1);
        assert_eq!(result.schedule[0].period, 60.0);

        let summary = result.summary();
        assert_eq!(summary.samples, 1);
        assert_relative_eq!(summary.total_contributed, 60_000.0);
        assert_relative_eq!(summary.total_growth, summary.final_value - 60_000.0);
        assert_relative_eq!(summary.effective_annual_rate, 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_monthly_grid_for_weekly_plan() {
        let plan = ContributionPlan::new(0.07, 50.0, NamedFrequency::Weekly, 2.0)
            .with_timing(ContributionTiming::Start);
        let config = ProjectionConfig {
            mode: SeriesMode::Sampled(Sampling::per_year(12.0, plan.duration_years).unwrap()),
            start_date: None,
        };
        let result = ProjectionEngine::new(config).project(&plan).unwrap();

        assert_eq!(result.schedule.len(), 24);
        assert_relative_eq!(result.schedule[11].years, 1.0, epsilon = 1e-12);
        assert_relative_eq!(result.schedule[23].period, 52.1775 * 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sample_dates() {
        let config = ProjectionConfig {
            mode: SeriesMode::Sampled(Sampling::EachPeriod),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1),
        };
        let plan = ContributionPlan::new(0.05, 100.0, NamedFrequency::Annually, 3.0);
        let result = ProjectionEngine::new(config).project(&plan).unwrap();

        let dates: Vec<_> = result.schedule.iter().map(|r| r.date.unwrap()).collect();
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
        assert_eq!(dates[2], NaiveDate::from_ymd_opt(2029, 1, 1).unwrap());
    }

    #[test]
    fn test_matches_direct_accumulation() {
        let plan = ContributionPlan::new(0.065, 1006.0, NamedFrequency::Quarterly, 7.0 / 12.0)
            .with_timing(ContributionTiming::Start);
        let mode = SeriesMode::Sampled(Sampling::EachPeriod);
        let config = ProjectionConfig { mode, start_date: None };

        let result = ProjectionEngine::new(config).project(&plan).unwrap();
        let direct = to_future_value_of_contribution(&plan, mode).unwrap();
        assert_eq!(result.future_value.values().len(), direct.values().len());
        for (a, b) in result.future_value.values().iter().zip(direct.values()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_far_dates_left_empty() {
        let config = ProjectionConfig {
            mode: SeriesMode::Total,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1),
        };
        let plan = ContributionPlan::new(0.05, 100.0, NamedFrequency::Annually, 1e12);
        let result = ProjectionEngine::new(config).project(&plan).unwrap();
        assert_eq!(result.schedule.len(), 1);
        assert!(result.schedule[0].date.is_none());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let plan = ContributionPlan::new(0.05, 1.0, NamedFrequency::Daily, 1e9);
        assert!(matches!(
            ProjectionEngine::default().project(&plan),
            Err(GrowthError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_invalid_plan() {
        let plan = ContributionPlan::new(0.05, 100.0, -4.0, 3.0);
        assert!(ProjectionEngine::default().project(&plan).is_err());
    }
}
