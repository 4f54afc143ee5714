mod board;
mod driver;
mod equation;
mod local;
mod reduction;
mod system;
mod traits;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use board::{Minefield, SolverCell, Tile};
pub use driver::{AgentSolver, Phase, Progress, SolveReport};
pub use equation::{Equation, Resolution};
pub use local::{LocalChecker, Verdict};
pub use reduction::{Inference, Reduction, ReductionEngine, DEFAULT_MAX_PASSES};
pub use system::LinearSystem;
pub use traits::{Deductions, DeterministicSolver, Solver};

/// Knobs for a solve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Upper bound on reduction passes per inference round
    pub max_reduction_passes: usize,
    /// Seed for the guessing generator; entropy when unset
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_reduction_passes: DEFAULT_MAX_PASSES,
            seed: None,
        }
    }
}

/// A driver with the default local checker and reduction engine
pub fn create_full_solver(config: &SolverConfig) -> AgentSolver {
    AgentSolver::new(config)
}
