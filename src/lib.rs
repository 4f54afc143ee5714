pub mod board;
pub mod error;
pub mod position;
pub mod solver;

pub use board::{Board, Cell, CellKind, Reveal, Var};
pub use error::{BoardError, SolverError};
pub use position::Position;
pub use solver::{
    create_full_solver, AgentSolver, DeterministicSolver, LocalChecker, Minefield,
    ReductionEngine, SolveReport, SolverConfig,
};
