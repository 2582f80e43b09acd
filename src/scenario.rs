//! Scenario runner for batch projections
//!
//! Holds one projection config and applies it to many plans or rates.

use log::warn;
use rayon::prelude::*;

use crate::error::Result;
use crate::plan::ContributionPlan;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// Runs plans against a shared projection config
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(ProjectionConfig::total());
///
/// for result in runner.rate_sensitivity(&plan, &[0.03, 0.05, 0.07]) {
///     println!("{:.2}", result?.final_value());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    /// Run a single plan
    pub fn run(&self, plan: &ContributionPlan) -> Result<ProjectionResult> {
        self.engine.project(plan)
    }

    /// Run many plans in parallel; results keep input order
    pub fn run_batch(&self, plans: &[ContributionPlan]) -> Vec<Result<ProjectionResult>> {
        plans
            .par_iter()
            .map(|plan| {
                let result = self.engine.project(plan);
                if let Err(ref e) = result {
                    warn!("plan {:?} failed: {}", plan.label, e);
                }
                result
            })
            .collect()
    }

    /// Rerun one plan at each annual rate
    pub fn rate_sensitivity(&self, plan: &ContributionPlan, rates: &[f64]) -> Vec<Result<ProjectionResult>> {
        let plans: Vec<ContributionPlan> = rates.iter().map(|&rate| plan.with_rate(rate)).collect();
        self.run_batch(&plans)
    }

    pub fn config(&self) -> &ProjectionConfig {
        self.engine.config()
    }
}
