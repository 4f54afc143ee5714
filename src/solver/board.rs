use crate::{Board, BoardError, Cell, CellKind, Position, Reveal, Var};

/// What the solver may know about a cell. Hidden contents never leak
/// through this view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverCell {
    Covered,      // Unopened and unflagged
    Flagged,      // Marked as a mine
    Revealed(u8), // Opened safe cell and its clue
    Exploded,     // Opened mine
}

impl SolverCell {
    pub fn is_covered(&self) -> bool {
        matches!(self, SolverCell::Covered)
    }

    /// A flag or an opened mine: either way the cell counts as a mine for
    /// its neighbours' clues.
    pub fn is_known_mine(&self) -> bool {
        matches!(self, SolverCell::Flagged | SolverCell::Exploded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub pos: Position,
    pub var: Var,
    pub cell: SolverCell,
}

/// The narrow read/mutate interface the solver drives a board through.
pub trait Minefield {
    fn tile(&self, pos: Position) -> Option<Tile>;

    /// Up to eight neighbours, clipped to the board edges.
    fn neighbors(&self, pos: Position) -> Vec<Tile>;

    /// Every tile on the board.
    fn tiles(&self) -> Vec<Tile>;

    fn open(&mut self, pos: Position) -> Result<Reveal, BoardError>;

    /// Idempotent; returns whether the flag is new.
    fn flag(&mut self, pos: Position) -> Result<bool, BoardError>;
}

fn view(pos: Position, cell: &Cell) -> Tile {
    let state = match (cell.opened, cell.flagged, cell.kind) {
        (true, _, CellKind::Safe(n)) => SolverCell::Revealed(n),
        (true, _, CellKind::Mine) => SolverCell::Exploded,
        (false, true, _) => SolverCell::Flagged,
        (false, false, _) => SolverCell::Covered,
    };
    Tile {
        pos,
        var: cell.var,
        cell: state,
    }
}

impl Minefield for Board {
    fn tile(&self, pos: Position) -> Option<Tile> {
        self.get_cell(pos).ok().map(|cell| view(pos, cell))
    }

    fn neighbors(&self, pos: Position) -> Vec<Tile> {
        Board::neighbors(self, pos)
            .into_iter()
            .filter_map(|npos| self.tile(npos))
            .collect()
    }

    fn tiles(&self) -> Vec<Tile> {
        self.iter_positions()
            .filter_map(|pos| self.tile(pos))
            .collect()
    }

    fn open(&mut self, pos: Position) -> Result<Reveal, BoardError> {
        Board::open(self, pos)
    }

    fn flag(&mut self, pos: Position) -> Result<bool, BoardError> {
        Board::flag(self, pos)
    }
}
