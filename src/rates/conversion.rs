//! Equivalent-rate conversion between compounding frequencies
//!
//! A nominal rate `r` compounded `m` times a year grows one unit to
//! `(1 + r/m)^m` over a year. The equivalent nominal rate under `n`
//! compoundings solves `(1 + r'/n)^n = (1 + r/m)^m`, giving
//! `r' = n * ((1 + r/m)^(m/n) - 1)`.

use crate::error::{GrowthError, Result};

/// Convert a nominal rate compounded `old_frequency` times per year into the
/// nominal rate that, compounded `new_frequency` times per year, gives the same
/// effective annual growth.
///
/// # Errors
/// * `InvalidParameter` if either frequency is not strictly positive
/// * `UndefinedOperation` if `1 + annual_rate / old_frequency` is negative and
///   the exponent `old_frequency / new_frequency` is not an integer
pub fn to_equivalent_rate(annual_rate: f64, new_frequency: f64, old_frequency: f64) -> Result<f64> {
    GrowthError::require_positive("new_frequency", new_frequency)?;
    GrowthError::require_positive("old_frequency", old_frequency)?;

    let base = 1.0 + annual_rate / old_frequency;
    let exponent = old_frequency / new_frequency;

    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(GrowthError::UndefinedOperation {
            reason: format!(
                "rate {} compounded {} times per year has growth base {} which cannot be raised to {}",
                annual_rate, old_frequency, base, exponent
            ),
        });
    }

    Ok(new_frequency * (base.powf(exponent) - 1.0))
}

/// Convert an annually compounded rate to its nominal equivalent at `new_frequency`
pub fn to_equivalent_rate_from_annual(annual_rate: f64, new_frequency: f64) -> Result<f64> {
    to_equivalent_rate(annual_rate, new_frequency, 1.0)
}

/// Fractional growth applied once per period at `frequency` periods per year
///
/// Goes through the equivalent rate first rather than dividing the annual rate
/// directly, so `frequency` periods at this rate compound to exactly `annual_rate`.
pub fn to_per_period_rate(annual_rate: f64, frequency: f64) -> Result<f64> {
    Ok(to_equivalent_rate_from_annual(annual_rate, frequency)? / frequency)
}

/// Growth factor `1 + per-period rate` for one contribution period
pub fn growth_factor(annual_rate: f64, frequency: f64) -> Result<f64> {
    Ok(1.0 + to_per_period_rate(annual_rate, frequency)?)
}

/// Effective annual rate of a nominal rate compounded `frequency` times per year
pub fn effective_annual_rate(nominal_rate: f64, frequency: f64) -> Result<f64> {
    to_equivalent_rate(nominal_rate, 1.0, frequency)
}
