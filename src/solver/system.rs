use super::board::{Minefield, SolverCell};
use super::equation::Equation;
use crate::{Position, SolverError, Var};
use log::trace;
use std::collections::HashMap;

/// The equations for a set of clue cells, plus the way back from
/// variables to board positions.
#[derive(Debug, Clone, Default)]
pub struct LinearSystem {
    pub equations: Vec<Equation>,
    /// Maps equation variables back to board positions
    pub var_to_position: HashMap<Var, Position>,
}

impl LinearSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds one equation per opened clue cell: the covered neighbours sum
    /// to the clue minus the mines already known around it.
    ///
    /// Unopened cells and opened mines are skipped. A clue cell with no
    /// covered neighbour is a contract failure: the local checker resolves
    /// those before the builder ever sees them.
    pub fn build<M: Minefield>(field: &M, cells: &[Position]) -> Result<Self, SolverError> {
        let mut system = Self::new();

        for &pos in cells {
            let clue = match field.tile(pos).map(|tile| tile.cell) {
                Some(SolverCell::Revealed(n)) => n as i32,
                _ => continue,
            };

            let neighbors = field.neighbors(pos);
            let known_mines = neighbors
                .iter()
                .filter(|tile| tile.cell.is_known_mine())
                .count() as i32;
            let covered: Vec<Var> = neighbors
                .iter()
                .filter(|tile| tile.cell.is_covered())
                .map(|tile| system.add_variable(tile.var, tile.pos))
                .collect();

            if covered.is_empty() {
                return Err(SolverError::NoUnknownNeighbours(pos));
            }

            let value = clue - known_mines;
            if value < 0 || value > covered.len() as i32 {
                return Err(SolverError::InconsistentClue {
                    value,
                    unknowns: covered.len(),
                });
            }

            let equation = Equation::from_vars(covered, value);
            trace!(target: "solver", "{} gives {}", pos, equation);
            system.add_equation(equation);
        }

        Ok(system)
    }

    /// Registers a variable and the position it stands for
    pub fn add_variable(&mut self, var: Var, pos: Position) -> Var {
        self.var_to_position.insert(var, pos);
        var
    }

    pub fn add_equation(&mut self, equation: Equation) {
        self.equations.push(equation);
    }

    pub fn position(&self, var: Var) -> Option<Position> {
        self.var_to_position.get(&var).copied()
    }

    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }
}
