use super::board::{Minefield, SolverCell};
use super::traits::{deduction_test_suite, Deductions, DeterministicSolver, Solver};
use crate::{Position, SolverError};

/// Outcome of looking at one clue cell and its neighbours in isolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The clue is satisfied by known mines; the covered neighbours are safe
    AllSafe(Vec<Position>),
    /// The covered neighbours are exactly the missing mines
    AllMines(Vec<Position>),
    /// Needs more information; revisit later
    Inconclusive,
    /// No covered neighbours remain
    Resolved,
    /// Not an opened clue cell
    NotAClue,
}

/// Single-clue counting rules:
/// - If the known mines around a clue equal its value, every other covered
///   neighbour is safe
/// - If the covered neighbours are exactly as many as the missing mines, they
///   are all mines
///
/// Flags and opened mines both count as known mines.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalChecker;

impl LocalChecker {
    pub fn check<M: Minefield>(&self, field: &M, pos: Position) -> Verdict {
        let clue = match field.tile(pos).map(|tile| tile.cell) {
            Some(SolverCell::Revealed(n)) => n as usize,
            _ => return Verdict::NotAClue,
        };

        let neighbors = field.neighbors(pos);
        let known_mines = neighbors
            .iter()
            .filter(|tile| tile.cell.is_known_mine())
            .count();
        let covered: Vec<Position> = neighbors
            .iter()
            .filter(|tile| tile.cell.is_covered())
            .map(|tile| tile.pos)
            .collect();

        if covered.is_empty() {
            Verdict::Resolved
        } else if known_mines == clue {
            Verdict::AllSafe(covered)
        } else if clue > known_mines && covered.len() == clue - known_mines {
            Verdict::AllMines(covered)
        } else {
            Verdict::Inconclusive
        }
    }
}

impl Solver for LocalChecker {
    fn name(&self) -> &str {
        "Local Constraint Checker"
    }
}

impl DeterministicSolver for LocalChecker {
    fn deduce<M: Minefield>(
        &self,
        field: &M,
        cells: &[Position],
    ) -> Result<Deductions, SolverError> {
        let mut result = Deductions::default();

        for &pos in cells {
            match self.check(field, pos) {
                Verdict::AllSafe(safe) => result.safe.extend(safe),
                Verdict::AllMines(mines) => result.mines.extend(mines),
                _ => {}
            }
        }

        Ok(result)
    }
}

deduction_test_suite!(LocalChecker);
