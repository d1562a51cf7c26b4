//! Repeated seeded plan generation for comparing planner settings.

pub mod evaluation;
pub mod output;

pub use evaluation::{SimulationConfig, TargetResult, run_simulation, simulate_target};
pub use output::{print_results, write_csv};
