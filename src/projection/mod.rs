//! Projection engine for contribution plans

mod state;
mod engine;
mod schedule;

pub use state::ProjectionState;
pub use engine::{ProjectionEngine, ProjectionConfig};
pub use schedule::{ScheduleRow, ProjectionResult, ProjectionSummary};
