use super::board::Minefield;
use crate::{Position, SolverError};
use std::collections::BTreeSet;

/// Positions a solver has determined to be mines or safe
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deductions {
    /// Positions that are definitely mines
    pub mines: BTreeSet<Position>,
    /// Positions that are definitely safe
    pub safe: BTreeSet<Position>,
}

impl Deductions {
    pub fn is_empty(&self) -> bool {
        self.mines.is_empty() && self.safe.is_empty()
    }

    pub fn merge(&mut self, other: Deductions) {
        self.mines.extend(other.mines);
        self.safe.extend(other.safe);
    }
}

/// Base trait for all solvers
pub trait Solver {
    fn name(&self) -> &str;
}

/// Trait for solvers that only ever make certain decisions
pub trait DeterministicSolver: Solver {
    /// Deduces what it can from the given opened clue cells.
    fn deduce<M: Minefield>(
        &self,
        field: &M,
        cells: &[Position],
    ) -> Result<Deductions, SolverError>;
}

/// Soundness checks shared by every [`DeterministicSolver`]. The solver type
/// must implement `Default`.
macro_rules! deduction_test_suite {
    ($solver:ty) => {
        #[cfg(test)]
        mod deduction_tests {
            use super::*;
            use crate::solver::board::{Minefield, SolverCell};
            use crate::solver::test_utils::frontier;
            use crate::solver::traits::{Deductions, DeterministicSolver, Solver};
            use crate::{Board, Position};
            use rand::rngs::StdRng;
            use rand::{Rng, SeedableRng};

            fn assert_sound(solver: &$solver, board: &Board, result: &Deductions) {
                let mines = board.mine_positions();

                assert!(
                    result.mines.is_disjoint(&result.safe),
                    "{} produced contradicting deductions",
                    solver.name()
                );
                for pos in &result.safe {
                    assert!(
                        !mines.contains(pos),
                        "{} incorrectly identified mine {} as safe",
                        solver.name(),
                        pos
                    );
                }
                for pos in &result.mines {
                    assert!(
                        mines.contains(pos),
                        "{} incorrectly identified safe position {} as mine",
                        solver.name(),
                        pos
                    );
                }
            }

            #[test]
            fn test_deterministic_correctness() {
                let solver = <$solver>::default();
                let mut board = Board::with_mines(3, 3, &[Position::new(0, 0)]).unwrap();
                board.open(Position::new(0, 1)).unwrap();
                board.open(Position::new(1, 0)).unwrap();
                board.open(Position::new(1, 1)).unwrap();

                let result = solver.deduce(&board, &frontier(&board)).unwrap();
                assert_sound(&solver, &board, &result);
            }

            #[test]
            fn test_deductions_only_touch_covered_cells() {
                let solver = <$solver>::default();
                let mut board = Board::with_mines(3, 3, &[Position::new(0, 0)]).unwrap();
                board.open(Position::new(2, 2)).unwrap();
                board.open(Position::new(1, 1)).unwrap();

                let result = solver.deduce(&board, &frontier(&board)).unwrap();
                for pos in result.mines.iter().chain(result.safe.iter()) {
                    assert_eq!(board.tile(*pos).map(|t| t.cell), Some(SolverCell::Covered));
                }
            }

            #[test]
            fn test_no_input_no_deductions() {
                let solver = <$solver>::default();
                let board = Board::new(4, 4, 3).unwrap();
                assert!(solver.deduce(&board, &[]).unwrap().is_empty());
            }

            #[test]
            fn test_random_boards_are_sound() {
                let solver = <$solver>::default();
                let mut rng = StdRng::seed_from_u64(0x5eed);

                for _ in 0..200 {
                    let mut board = Board::with_rng(8, 8, 10, &mut rng).unwrap();
                    let mines = board.mine_positions();

                    for _ in 0..20 {
                        let pos = Position::new(rng.gen_range(0..8), rng.gen_range(0..8));
                        if !mines.contains(&pos) && !board.get_cell(pos).unwrap().opened {
                            board.open(pos).unwrap();
                        }
                    }

                    let result = solver.deduce(&board, &frontier(&board)).unwrap();
                    assert_sound(&solver, &board, &result);
                }
            }
        }
    };
}

pub(crate) use deduction_test_suite;
