//! Contribution and compounding frequencies
//!
//! Named frequencies map to a periods-per-year constant. Day-based frequencies
//! use the mean tropical year so that e.g. weekly is 52.1775 rather than 52.

use crate::error::{GrowthError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Days per year used for day-based frequencies
pub const DAYS_PER_YEAR: f64 = 365.242;

/// Fixed table of named contribution frequencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NamedFrequency {
    Daily,
    Weekly,
    Biweekly,
    #[default]
    Monthly,
    Quarterly,
    Biannually,
    Annually,
}

impl NamedFrequency {
    pub const ALL: [NamedFrequency; 7] = [
        NamedFrequency::Daily,
        NamedFrequency::Weekly,
        NamedFrequency::Biweekly,
        NamedFrequency::Monthly,
        NamedFrequency::Quarterly,
        NamedFrequency::Biannually,
        NamedFrequency::Annually,
    ];

    /// Number of periods per year
    pub fn periods_per_year(&self) -> f64 {
        match self {
            NamedFrequency::Daily => DAYS_PER_YEAR,
            NamedFrequency::Weekly => 52.1775,
            NamedFrequency::Biweekly => 26.08875,
            NamedFrequency::Monthly => 12.0,
            NamedFrequency::Quarterly => 4.0,
            NamedFrequency::Biannually => 2.0,
            NamedFrequency::Annually => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NamedFrequency::Daily => "daily",
            NamedFrequency::Weekly => "weekly",
            NamedFrequency::Biweekly => "biweekly",
            NamedFrequency::Monthly => "monthly",
            NamedFrequency::Quarterly => "quarterly",
            NamedFrequency::Biannually => "biannually",
            NamedFrequency::Annually => "annually",
        }
    }
}

impl fmt::Display for NamedFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedFrequency {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|named| named.name() == wanted)
            .ok_or_else(|| GrowthError::invalid("frequency", format!("unknown frequency name `{}`", s)))
    }
}

/// Either a named frequency or a direct periods-per-year number
///
/// Deserializes from `"monthly"` or `12` alike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrequencySpec {
    Named(NamedFrequency),
    PerYear(f64),
}

impl FrequencySpec {
    /// Resolve to a strictly positive periods-per-year value
    pub fn periods_per_year(&self) -> Result<f64> {
        match self {
            FrequencySpec::Named(named) => Ok(named.periods_per_year()),
            FrequencySpec::PerYear(n) => GrowthError::require_positive("contributions_per_year", *n),
        }
    }
}

impl Default for FrequencySpec {
    fn default() -> Self {
        FrequencySpec::Named(NamedFrequency::default())
    }
}

impl From<NamedFrequency> for FrequencySpec {
    fn from(named: NamedFrequency) -> Self {
        FrequencySpec::Named(named)
    }
}

impl From<f64> for FrequencySpec {
    fn from(per_year: f64) -> Self {
        FrequencySpec::PerYear(per_year)
    }
}

impl fmt::Display for FrequencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencySpec::Named(named) => write!(f, "{}", named),
            FrequencySpec::PerYear(n) => write!(f, "{}", n),
        }
    }
}

/// Accepts either a frequency name or a number, as typed on a command line or in a CSV cell
impl FromStr for FrequencySpec {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().parse::<f64>() {
            Ok(n) => Ok(FrequencySpec::PerYear(n)),
            Err(_) => s.parse::<NamedFrequency>().map(FrequencySpec::Named),
        }
    }
}
