//! Geometric series accumulation of level contributions
//!
//! A contribution of `amount` made each period and grown by `ratio` per period
//! is worth `amount * (1 + ratio + ratio^2 + ... + ratio^(n-1))` after `n`
//! periods, which closes to `amount * (1 - ratio^n) / (1 - ratio)`.

use crate::error::{GrowthError, Result};
use serde::{Deserialize, Serialize};

/// Ratios closer to 1 than this use the zero-growth form
const UNIT_RATIO_TOLERANCE: f64 = 1e-10;

/// Positions below this fraction of a period are treated as whole periods
const WHOLE_PERIOD_TOLERANCE: f64 = 1e-9;

/// Largest sampled sequence a single call will build
pub const MAX_SAMPLES: usize = 1_000_000;

fn check_sample_count(count: f64) -> Result<()> {
    if count > MAX_SAMPLES as f64 {
        return Err(GrowthError::invalid(
            "samples",
            format!("{} samples exceeds the limit of {}", count, MAX_SAMPLES),
        ));
    }
    Ok(())
}

/// Where sampled values are taken along the horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    /// At every whole period, plus the horizon itself when it ends mid-period
    #[default]
    EachPeriod,
    /// `n` evenly spaced samples, the last one at the horizon
    Evenly(usize),
}

impl Sampling {
    /// Evenly spaced grid with `samples_per_year` points per year of `duration_years`
    ///
    /// `per_year(12.0, years)` gives a monthly grid regardless of contribution frequency.
    pub fn per_year(samples_per_year: f64, duration_years: f64) -> Result<Self> {
        GrowthError::require_positive("samples_per_year", samples_per_year)?;
        GrowthError::require_positive("duration_years", duration_years)?;
        let count = (samples_per_year * duration_years - WHOLE_PERIOD_TOLERANCE).ceil().max(1.0);
        check_sample_count(count)?;
        Ok(Sampling::Evenly(count as usize))
    }

    /// Period positions (in contribution periods) at which to sample a horizon of `periods`
    pub fn points(&self, periods: f64) -> Result<Vec<f64>> {
        GrowthError::require_positive("periods", periods)?;

        match *self {
            Sampling::EachPeriod => {
                let whole = (periods + WHOLE_PERIOD_TOLERANCE).floor();
                check_sample_count(whole)?;
                let mut points: Vec<f64> = (1..=whole as u64).map(|k| k as f64).collect();
                if periods - whole > WHOLE_PERIOD_TOLERANCE || points.is_empty() {
                    points.push(periods);
                } else if let Some(last) = points.last_mut() {
                    // Land exactly on the horizon
                    *last = periods;
                }
                Ok(points)
            }
            Sampling::Evenly(0) => Err(GrowthError::invalid("samples", "sample count must be at least 1")),
            Sampling::Evenly(n) => {
                check_sample_count(n as f64)?;
                Ok((1..=n).map(|i| periods * i as f64 / n as f64).collect())
            }
        }
    }
}

/// Whether the accumulator returns a single value or a sampled sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeriesMode {
    /// Value at the end of the horizon only
    #[default]
    Total,
    /// Ordered partial sums along the horizon
    Sampled(Sampling),
}

/// Accumulated value, single or sampled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FutureValue {
    Total(f64),
    Sampled(Vec<f64>),
}

impl FutureValue {
    /// Value at the end of the horizon
    pub fn final_value(&self) -> f64 {
        match self {
            FutureValue::Total(value) => *value,
            FutureValue::Sampled(values) => values.last().copied().unwrap_or(0.0),
        }
    }

    /// All values in horizon order (one element in `Total` mode)
    pub fn values(&self) -> &[f64] {
        match self {
            FutureValue::Total(value) => std::slice::from_ref(value),
            FutureValue::Sampled(values) => values,
        }
    }

    /// Multiply every value by `factor`
    pub fn scale(self, factor: f64) -> Self {
        match self {
            FutureValue::Total(value) => FutureValue::Total(value * factor),
            FutureValue::Sampled(values) => FutureValue::Sampled(values.into_iter().map(|v| v * factor).collect()),
        }
    }
}

/// Closed-form partial sum at a (possibly fractional) number of periods
pub fn series_value(amount: f64, common_ratio: f64, periods: f64) -> f64 {
    if (common_ratio - 1.0).abs() < UNIT_RATIO_TOLERANCE {
        return amount * periods;
    }

    amount * (1.0 - common_ratio.powf(periods)) / (1.0 - common_ratio)
}

/// A negative ratio only has a real power at whole period counts
fn check_real_power(common_ratio: f64, periods: f64) -> Result<()> {
    if common_ratio < 0.0 && periods.fract() != 0.0 {
        return Err(GrowthError::UndefinedOperation {
            reason: format!("negative growth ratio {} raised to {} periods", common_ratio, periods),
        });
    }
    Ok(())
}

/// Sum a geometric series of `periods` level contributions
///
/// # Errors
/// * `InvalidParameter` when `periods` is not strictly positive and finite, or
///   when a sampling grid asks for zero or more than [`MAX_SAMPLES`] samples
/// * `UndefinedOperation` when `common_ratio` is negative and a sample point
///   is not a whole number of periods
pub fn sum_geometric_series(amount: f64, common_ratio: f64, periods: f64, mode: SeriesMode) -> Result<FutureValue> {
    match mode {
        SeriesMode::Total => {
            GrowthError::require_positive("periods", periods)?;
            check_real_power(common_ratio, periods)?;
            Ok(FutureValue::Total(series_value(amount, common_ratio, periods)))
        }
        SeriesMode::Sampled(sampling) => {
            let points = sampling.points(periods)?;
            for &point in &points {
                check_real_power(common_ratio, point)?;
            }
            let values = points
                .into_iter()
                .map(|point| series_value(amount, common_ratio, point))
                .collect();
            Ok(FutureValue::Sampled(values))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_ratio() {
        let fv = sum_geometric_series(250.0, 1.0, 24.0, SeriesMode::Total).unwrap();
        assert_eq!(fv, FutureValue::Total(6000.0));

        let fractional = sum_geometric_series(100.0, 1.0, 2.5, SeriesMode::Total).unwrap();
        assert_relative_eq!(fractional.final_value(), 250.0);
    }

    #[test]
    fn test_closed_form_matches_loop() {
        let ratio = 1.005;
        let mut balance = 0.0;
        for _ in 0..36 {
            balance = balance * ratio + 100.0;
        }
        let fv = sum_geometric_series(100.0, ratio, 36.0, SeriesMode::Total).unwrap();
        assert_relative_eq!(fv.final_value(), balance, epsilon = 1e-8);
    }

    #[test]
    fn test_sampled_partial_sums() {
        let fv = sum_geometric_series(100.0, 1.1, 3.0, SeriesMode::Sampled(Sampling::EachPeriod)).unwrap();
        let values = fv.values();
        assert_eq!(values.len(), 3);
        assert_relative_eq!(values[0], 100.0, epsilon = 1e-9);
        assert_relative_eq!(values[1], 210.0, epsilon = 1e-9);
        assert_relative_eq!(values[2], 331.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sampled_last_equals_total() {
        for &periods in &[1.0, 7.0, 2.333, 0.4, 60.0] {
            let total = sum_geometric_series(50.0, 1.01, periods, SeriesMode::Total).unwrap();
            for sampling in [Sampling::EachPeriod, Sampling::Evenly(5)] {
                let sampled = sum_geometric_series(50.0, 1.01, periods, SeriesMode::Sampled(sampling)).unwrap();
                assert_relative_eq!(sampled.final_value(), total.final_value(), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_each_period_points() {
        assert_eq!(Sampling::EachPeriod.points(3.0).unwrap(), vec![1.0, 2.0, 3.0]);

        let points = Sampling::EachPeriod.points(7.0 / 3.0).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[..2], [1.0, 2.0]);
        assert_relative_eq!(points[2], 7.0 / 3.0);

        // Horizon shorter than one period
        assert_eq!(Sampling::EachPeriod.points(0.5).unwrap(), vec![0.5]);
    }

    #[test]
    fn test_each_period_absorbs_rounding() {
        // 10 * (0.1 * 3) is 3.0000000000000004
        let periods = 10.0 * (0.1 * 3.0);
        let points = Sampling::EachPeriod.points(periods).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[2], periods);
    }

    #[test]
    fn test_evenly_spaced_points() {
        let points = Sampling::Evenly(4).points(2.0).unwrap();
        assert_eq!(points, vec![0.5, 1.0, 1.5, 2.0]);
        assert!(Sampling::Evenly(0).points(2.0).is_err());
    }

    #[test]
    fn test_per_year_grid() {
        assert_eq!(Sampling::per_year(12.0, 5.0).unwrap(), Sampling::Evenly(60));
        assert_eq!(Sampling::per_year(12.0, 7.0 / 12.0).unwrap(), Sampling::Evenly(7));
        assert_eq!(Sampling::per_year(1.0, 0.25).unwrap(), Sampling::Evenly(1));
        assert!(Sampling::per_year(0.0, 1.0).is_err());
    }

    #[test]
    fn test_non_positive_periods() {
        assert!(matches!(
            sum_geometric_series(100.0, 1.01, 0.0, SeriesMode::Total),
            Err(GrowthError::InvalidParameter { .. })
        ));
        assert!(sum_geometric_series(100.0, 1.01, -3.0, SeriesMode::Sampled(Sampling::EachPeriod)).is_err());
    }

    #[test]
    fn test_non_finite_periods() {
        assert!(matches!(
            sum_geometric_series(100.0, 1.01, f64::INFINITY, SeriesMode::Sampled(Sampling::EachPeriod)),
            Err(GrowthError::InvalidParameter { .. })
        ));
        assert!(sum_geometric_series(100.0, 1.01, f64::INFINITY, SeriesMode::Total).is_err());
        assert!(Sampling::per_year(12.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_sample_count_limit() {
        assert!(matches!(
            Sampling::per_year(1e30, 1.0),
            Err(GrowthError::InvalidParameter { .. })
        ));
        assert!(matches!(
            Sampling::EachPeriod.points(1e12),
            Err(GrowthError::InvalidParameter { .. })
        ));
        assert!(Sampling::Evenly(MAX_SAMPLES + 1).points(12.0).is_err());

        // Total mode has no grid and stays valid for long horizons
        assert!(sum_geometric_series(1.0, 1.0, 1e12, SeriesMode::Total).is_ok());
        assert_eq!(Sampling::Evenly(MAX_SAMPLES).points(1.0).unwrap().len(), MAX_SAMPLES);
    }

    #[test]
    fn test_negative_ratio() {
        // Whole periods have a real value: 100 * (1 - (-0.5)^3) / 1.5
        let fv = sum_geometric_series(100.0, -0.5, 3.0, SeriesMode::Total).unwrap();
        assert_relative_eq!(fv.final_value(), 75.0, epsilon = 1e-9);

        assert!(matches!(
            sum_geometric_series(100.0, -0.5, 2.5, SeriesMode::Total),
            Err(GrowthError::UndefinedOperation { .. })
        ));
        assert!(matches!(
            sum_geometric_series(100.0, -0.5, 2.0, SeriesMode::Sampled(Sampling::Evenly(4))),
            Err(GrowthError::UndefinedOperation { .. })
        ));
        assert!(sum_geometric_series(100.0, -0.5, 2.0, SeriesMode::Sampled(Sampling::EachPeriod)).is_ok());
    }

    #[test]
    fn test_scale() {
        let fv = FutureValue::Sampled(vec![1.0, 2.0]).scale(1.5);
        assert_eq!(fv, FutureValue::Sampled(vec![1.5, 3.0]));
        assert_eq!(FutureValue::Total(2.0).scale(2.0), FutureValue::Total(4.0));
    }
}
