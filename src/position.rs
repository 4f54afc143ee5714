use std::fmt;

/// A cell coordinate on the board, row first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The eight surrounding coordinates. Callers clip them to the board.
    pub fn neighbors(&self) -> impl Iterator<Item = Position> + '_ {
        (-1..=1).flat_map(move |dr| {
            (-1..=1).filter_map(move |dc| {
                if dr == 0 && dc == 0 {
                    None
                } else {
                    Some(Position::new(self.row + dr, self.col + dc))
                }
            })
        })
    }

    pub fn is_adjacent(&self, other: Position) -> bool {
        *self != other && (self.row - other.row).abs() <= 1 && (self.col - other.col).abs() <= 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
