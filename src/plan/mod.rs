//! Contribution plan data and CSV loading

mod data;
pub mod loader;

pub use data::{ContributionPlan, ContributionTiming};
pub use loader::{load_plans, load_plans_from_reader, write_plans};
