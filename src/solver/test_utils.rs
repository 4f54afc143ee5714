use super::board::{Minefield, SolverCell};
use super::traits::{DeterministicSolver, Solver};
use super::SolveReport;
use crate::{Board, Position};
use rand::prelude::*;
use std::collections::HashSet;

/// Configuration for test board generation
#[derive(Debug, Clone)]
pub struct TestBoardConfig {
    pub rows: u32,
    pub cols: u32,
    pub mine_density: f64,
    pub revealed_percentage: f64,
}

impl Default for TestBoardConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            mine_density: 0.15,
            revealed_percentage: 0.3,
        }
    }
}

/// Generates partially opened boards with known mine layouts
pub struct TestBoardGenerator {
    config: TestBoardConfig,
    rng: StdRng,
}

impl TestBoardGenerator {
    pub fn new(config: TestBoardConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(config: TestBoardConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates a board with some safe cells opened, plus its mine layout
    pub fn generate(&mut self) -> (Board, HashSet<Position>) {
        let cells = self.config.rows * self.config.cols;
        let mines_count = ((cells as f64 * self.config.mine_density) as u32).min(cells - 1);
        let mut board =
            Board::with_rng(self.config.rows, self.config.cols, mines_count, &mut self.rng)
                .expect("test board configuration must leave room for safe cells");
        let mine_positions = board.mine_positions();

        let safe_cells = (cells - mines_count) as usize;
        let cells_to_reveal =
            ((cells as f64 * self.config.revealed_percentage) as usize).min(safe_cells);
        let mut revealed = HashSet::new();

        while revealed.len() < cells_to_reveal {
            let row = self.rng.gen_range(0..self.config.rows) as i32;
            let col = self.rng.gen_range(0..self.config.cols) as i32;
            let pos = Position::new(row, col);

            if !mine_positions.contains(&pos) && revealed.insert(pos) {
                board
                    .open(pos)
                    .expect("generator only opens each safe cell once");
            }
        }

        (board, mine_positions)
    }

    /// Generates multiple test cases
    pub fn generate_batch(&mut self, count: usize) -> Vec<(Board, HashSet<Position>)> {
        (0..count).map(|_| self.generate()).collect()
    }
}

/// Opened clue cells that still touch a covered cell
pub fn frontier(board: &Board) -> Vec<Position> {
    board
        .tiles()
        .into_iter()
        .filter(|tile| matches!(tile.cell, SolverCell::Revealed(_)))
        .filter(|tile| {
            Minefield::neighbors(board, tile.pos)
                .iter()
                .any(|n| n.cell.is_covered())
        })
        .map(|tile| tile.pos)
        .collect()
}

/// Validates deterministic solver correctness against the true layout
pub fn validate_deterministic_solver<S: DeterministicSolver>(
    solver: &S,
    board: &Board,
    mine_positions: &HashSet<Position>,
) -> bool {
    let result = match solver.deduce(board, &frontier(board)) {
        Ok(result) => result,
        Err(e) => {
            println!("Solver {} failed: {}", solver.name(), e);
            return false;
        }
    };

    // Verify that identified mines are actually mines
    for pos in &result.mines {
        if !mine_positions.contains(pos) {
            println!(
                "Solver {} incorrectly identified safe position {} as mine",
                solver.name(),
                pos
            );
            return false;
        }
    }

    // Verify that identified safe positions are actually safe
    for pos in &result.safe {
        if mine_positions.contains(pos) {
            println!(
                "Solver {} incorrectly identified mine {} as safe",
                solver.name(),
                pos
            );
            return false;
        }
    }

    true
}

/// Validates a finished solve: no wrong flags, every safe cell opened, and
/// mines only ever opened by a guess or at the start.
pub fn validate_solve(board: &Board, report: &SolveReport, start: Position) -> bool {
    let misflagged = board.misflagged();
    if !misflagged.is_empty() {
        println!("Solve flagged safe cells {:?}", misflagged);
        return false;
    }

    if !board.is_cleared() {
        println!("Solve finished with safe cells still covered");
        return false;
    }

    for mine in &report.mines_opened {
        if *mine != start && !report.guesses.contains(mine) {
            println!("Solve opened mine {} without guessing", mine);
            return false;
        }
    }

    true
}
