//! Geometric-series accumulation of periodic contributions

mod series;
mod future_value;

pub use series::{sum_geometric_series, series_value, FutureValue, Sampling, SeriesMode, MAX_SAMPLES};
pub use future_value::{to_future_value_of_contribution, future_value};
