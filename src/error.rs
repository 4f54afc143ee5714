use crate::{Position, Var};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Position {0} is out of bounds")]
    OutOfBounds(Position),
    #[error("Cell at {0} is already opened")]
    AlreadyOpened(Position),
    #[error("Cell at {0} is flagged and cannot be opened")]
    Flagged(Position),
    #[error("Board dimensions {rows}x{cols} leave no cells")]
    EmptyBoard { rows: u32, cols: u32 },
    #[error("Too many mines ({mines}) for board size {rows}x{cols}")]
    TooManyMines { rows: u32, cols: u32, mines: u32 },
}

/// Contract failures inside the solver. These end the current solve; they
/// mean a caller handed the engine a state the earlier stages should have
/// filtered out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("Clue cell {0} reached the equation builder with no covered neighbours")]
    NoUnknownNeighbours(Position),
    #[error("Constraint needs {value} mines among {unknowns} unknowns")]
    InconsistentClue { value: i32, unknowns: usize },
    #[error("Variable {0} was deduced to be both a mine and safe")]
    Contradiction(Var),
    #[error(transparent)]
    Board(#[from] BoardError),
}
