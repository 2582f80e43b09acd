//! Interest rate conversion and contribution frequencies

mod conversion;
mod frequency;

pub use conversion::{
    to_equivalent_rate, to_equivalent_rate_from_annual, to_per_period_rate,
    growth_factor, effective_annual_rate,
};
pub use frequency::{FrequencySpec, NamedFrequency, DAYS_PER_YEAR};
