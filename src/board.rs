use crate::{BoardError, Position};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Variable id the board hands out for a cell, used as the unknown for that
/// cell in the solver's equations. One per cell, stable for the board's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(pub u32);

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// A safe cell and the number of mines around it
    Safe(u8),
    Mine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub kind: CellKind,
    pub opened: bool,
    pub flagged: bool,
    pub var: Var,
}

impl Cell {
    pub fn is_mine(&self) -> bool {
        self.kind == CellKind::Mine
    }
}

/// What opening a cell revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    Clue(u8),
    Mine,
}

#[derive(Debug)]
pub struct Board {
    pub cells: HashMap<Position, Cell>,
    rows: u32,
    cols: u32,
    mines_count: u32,
}

impl Board {
    pub fn new(rows: u32, cols: u32, mines_count: u32) -> Result<Self, BoardError> {
        Self::with_rng(rows, cols, mines_count, &mut rand::thread_rng())
    }

    /// Places `mines_count` mines uniformly at random using the given generator.
    pub fn with_rng<R: Rng>(
        rows: u32,
        cols: u32,
        mines_count: u32,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        Self::check_dimensions(rows, cols, mines_count)?;

        let mut mines = HashSet::new();
        while (mines.len() as u32) < mines_count {
            let row = rng.gen_range(0..rows) as i32;
            let col = rng.gen_range(0..cols) as i32;
            mines.insert(Position::new(row, col));
        }

        Ok(Self::build(rows, cols, &mines))
    }

    /// Builds a board with mines at exactly the given positions.
    pub fn with_mines(rows: u32, cols: u32, mines: &[Position]) -> Result<Self, BoardError> {
        let mines: HashSet<Position> = mines.iter().copied().collect();
        Self::check_dimensions(rows, cols, mines.len() as u32)?;

        if let Some(&pos) = mines
            .iter()
            .find(|p| p.row < 0 || p.row >= rows as i32 || p.col < 0 || p.col >= cols as i32)
        {
            return Err(BoardError::OutOfBounds(pos));
        }

        Ok(Self::build(rows, cols, &mines))
    }

    fn check_dimensions(rows: u32, cols: u32, mines: u32) -> Result<(), BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::EmptyBoard { rows, cols });
        }
        if mines >= rows * cols {
            return Err(BoardError::TooManyMines { rows, cols, mines });
        }
        Ok(())
    }

    fn build(rows: u32, cols: u32, mines: &HashSet<Position>) -> Self {
        let mut board = Board {
            cells: HashMap::with_capacity((rows * cols) as usize),
            rows,
            cols,
            mines_count: mines.len() as u32,
        };

        for row in 0..rows as i32 {
            for col in 0..cols as i32 {
                let pos = Position::new(row, col);
                let kind = if mines.contains(&pos) {
                    CellKind::Mine
                } else {
                    let around = pos.neighbors().filter(|p| mines.contains(p)).count();
                    CellKind::Safe(around as u8)
                };
                let var = Var(row as u32 * cols + col as u32);
                board.cells.insert(
                    pos,
                    Cell {
                        kind,
                        opened: false,
                        flagged: false,
                        var,
                    },
                );
            }
        }

        board
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.rows as i32 && pos.col >= 0 && pos.col < self.cols as i32
    }

    pub fn get_cell(&self, pos: Position) -> Result<&Cell, BoardError> {
        self.cells.get(&pos).ok_or(BoardError::OutOfBounds(pos))
    }

    /// Neighbouring positions clipped to the board edges.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        pos.neighbors()
            .filter(|p| self.is_within_bounds(*p))
            .collect()
    }

    /// All positions in row-major order.
    pub fn iter_positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols as i32;
        (0..self.rows as i32).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }

    pub fn count_adjacent_mines(&self, pos: Position) -> u8 {
        self.neighbors(pos)
            .into_iter()
            .filter(|p| matches!(self.cells.get(p), Some(cell) if cell.is_mine()))
            .count() as u8
    }

    /// Opens a single cell. There is no flood fill; the solver opens zero
    /// neighbourhoods itself.
    pub fn open(&mut self, pos: Position) -> Result<Reveal, BoardError> {
        let cell = self
            .cells
            .get_mut(&pos)
            .ok_or(BoardError::OutOfBounds(pos))?;

        if cell.opened {
            return Err(BoardError::AlreadyOpened(pos));
        }
        if cell.flagged {
            return Err(BoardError::Flagged(pos));
        }

        cell.opened = true;
        Ok(match cell.kind {
            CellKind::Safe(n) => Reveal::Clue(n),
            CellKind::Mine => Reveal::Mine,
        })
    }

    /// Flags a covered cell. Returns whether the flag is new.
    pub fn flag(&mut self, pos: Position) -> Result<bool, BoardError> {
        let cell = self
            .cells
            .get_mut(&pos)
            .ok_or(BoardError::OutOfBounds(pos))?;

        if cell.opened {
            return Err(BoardError::AlreadyOpened(pos));
        }
        if cell.flagged {
            return Ok(false);
        }
        cell.flagged = true;
        Ok(true)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    pub fn mines_count(&self) -> u32 {
        self.mines_count
    }

    pub fn mine_positions(&self) -> HashSet<Position> {
        self.cells
            .iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|(&pos, _)| pos)
            .collect()
    }

    /// Flags sitting on safe cells.
    pub fn misflagged(&self) -> Vec<Position> {
        let mut wrong: Vec<Position> = self
            .cells
            .iter()
            .filter(|(_, cell)| cell.flagged && !cell.is_mine())
            .map(|(&pos, _)| pos)
            .collect();
        wrong.sort();
        wrong
    }

    /// Mines that were opened.
    pub fn exploded(&self) -> Vec<Position> {
        let mut hit: Vec<Position> = self
            .cells
            .iter()
            .filter(|(_, cell)| cell.opened && cell.is_mine())
            .map(|(&pos, _)| pos)
            .collect();
        hit.sort();
        hit
    }

    /// True once every safe cell has been opened.
    pub fn is_cleared(&self) -> bool {
        self.cells
            .values()
            .all(|cell| cell.is_mine() || cell.opened)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let symbol = match self.cells.get(&Position::new(row, col)) {
                    Some(cell) if cell.flagged => 'F',
                    Some(cell) if !cell.opened => '#',
                    Some(Cell {
                        kind: CellKind::Mine,
                        ..
                    }) => '*',
                    Some(Cell {
                        kind: CellKind::Safe(0),
                        ..
                    }) => '.',
                    Some(Cell {
                        kind: CellKind::Safe(n),
                        ..
                    }) => char::from(b'0' + n),
                    None => ' ',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
