//! Contribution Growth - future value projection for periodic contribution schedules
//!
//! This library provides:
//! - Equivalent-rate conversion between compounding frequencies
//! - Per-period rate derivation that compounds back to the annual rate exactly
//! - Geometric-series accumulation, as a single value or a sampled schedule
//! - Start/end-of-period contribution timing
//! - Batch projection and CSV plan loading

pub mod error;
pub mod rates;
pub mod accumulation;
pub mod plan;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{GrowthError, Result};
pub use rates::{to_equivalent_rate, to_per_period_rate, FrequencySpec, NamedFrequency};
pub use accumulation::{sum_geometric_series, to_future_value_of_contribution, FutureValue, Sampling, SeriesMode};
pub use plan::{ContributionPlan, ContributionTiming};
pub use projection::{ProjectionEngine, ProjectionConfig, ProjectionResult, ScheduleRow};
pub use scenario::ScenarioRunner;
