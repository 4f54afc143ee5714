use super::board::{Minefield, SolverCell};
use super::local::{LocalChecker, Verdict};
use super::reduction::{Inference, ReductionEngine};
use super::SolverConfig;
use crate::{BoardError, Position, Reveal, SolverError};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{HashSet, VecDeque};

/// Where the driver is in its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Draining the queue of cells known to be safe
    Opening,
    /// Re-examining clue cells that were inconclusive
    Checking,
    /// Running the reduction engine over the inconclusive cells
    Inferring,
    /// Picking a random undetermined cell
    Guessing,
    Done,
}

/// Snapshot handed to the observer once per driver iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub phase: Phase,
    pub score: u32,
    pub to_open: usize,
    pub unfinished: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveReport {
    /// Flags placed by the solver
    pub score: u32,
    /// Cells opened by random choice, in order
    pub guesses: Vec<Position>,
    /// Mines that were opened; the run carries on past them
    pub mines_opened: Vec<Position>,
    /// Driver iterations, one per observer notification
    pub steps: usize,
}

/// Transient state of one solve.
#[derive(Debug, Default)]
struct SolveState {
    to_open: VecDeque<Position>,
    queued: HashSet<Position>,
    unfinished: VecDeque<Position>,
    just_opened: Option<Position>,
    report: SolveReport,
}

impl SolveState {
    fn new(start: Position) -> Self {
        let mut state = Self::default();
        state.enqueue(start);
        state
    }

    fn enqueue(&mut self, pos: Position) {
        if self.queued.insert(pos) {
            self.to_open.push_back(pos);
        }
    }

    fn progress(&self, phase: Phase) -> Progress {
        Progress {
            phase,
            score: self.report.score,
            to_open: self.to_open.len(),
            unfinished: self.unfinished.len(),
        }
    }
}

/// Plays a board to the end: opens what is known to be safe, flags what is
/// known to be a mine, infers over the inconclusive clues when that runs dry
/// and guesses when inference has nothing left.
#[derive(Debug)]
pub struct AgentSolver {
    checker: LocalChecker,
    engine: ReductionEngine,
    rng: StdRng,
}

impl AgentSolver {
    pub fn new(config: &SolverConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            checker: LocalChecker,
            engine: ReductionEngine::new(config.max_reduction_passes),
            rng,
        }
    }

    pub fn solve<M: Minefield>(
        &mut self,
        field: &mut M,
        start: Position,
    ) -> Result<SolveReport, SolverError> {
        self.solve_with(field, start, |_| {})
    }

    /// Like [`AgentSolver::solve`], calling `observer` once per iteration so
    /// a front end can redraw.
    pub fn solve_with<M, F>(
        &mut self,
        field: &mut M,
        start: Position,
        mut observer: F,
    ) -> Result<SolveReport, SolverError>
    where
        M: Minefield,
        F: FnMut(&Progress),
    {
        let mut state = SolveState::new(start);
        let mut phase = Phase::Opening;

        loop {
            state.report.steps += 1;
            observer(&state.progress(phase));

            phase = match phase {
                Phase::Opening => self.open_next(field, &mut state)?,
                Phase::Checking => {
                    self.check_unfinished(field, &mut state)?;
                    Phase::Opening
                }
                Phase::Inferring => self.infer(field, &mut state)?,
                Phase::Guessing => self.guess(field, &mut state),
                Phase::Done => break,
            };
        }

        info!(
            "Solve finished: score {}, {} guesses, {} mines opened",
            state.report.score,
            state.report.guesses.len(),
            state.report.mines_opened.len()
        );
        Ok(state.report)
    }

    fn open_next<M: Minefield>(
        &mut self,
        field: &mut M,
        state: &mut SolveState,
    ) -> Result<Phase, SolverError> {
        let pos = match state.to_open.pop_front() {
            Some(pos) => pos,
            None => return Ok(Phase::Inferring),
        };
        state.queued.remove(&pos);

        let tile = field.tile(pos).ok_or(BoardError::OutOfBounds(pos))?;
        match tile.cell {
            SolverCell::Covered => match field.open(pos)? {
                Reveal::Clue(n) => {
                    debug!("Opened {} showing {}", pos, n);
                }
                Reveal::Mine => {
                    warn!("Opened a mine at {}", pos);
                    state.report.mines_opened.push(pos);
                }
            },
            SolverCell::Revealed(_) => {}
            SolverCell::Flagged | SolverCell::Exploded => return Ok(Phase::Opening),
        }

        state.just_opened = Some(pos);
        Ok(Phase::Checking)
    }

    /// Checks the cell just opened, then sweeps `unfinished` until a sweep
    /// places no new flag. Every cell left in `unfinished` afterwards still
    /// has covered neighbours.
    fn check_unfinished<M: Minefield>(
        &mut self,
        field: &mut M,
        state: &mut SolveState,
    ) -> Result<(), SolverError> {
        if let Some(pos) = state.just_opened.take() {
            let verdict = self.checker.check(field, pos);
            self.apply_verdict(field, state, pos, verdict)?;
        }

        loop {
            let mut flagged = false;
            for _ in 0..state.unfinished.len() {
                let pos = match state.unfinished.pop_front() {
                    Some(pos) => pos,
                    None => break,
                };
                let verdict = self.checker.check(field, pos);
                flagged |= self.apply_verdict(field, state, pos, verdict)?;
            }
            if !flagged {
                return Ok(());
            }
        }
    }

    /// Returns whether a new flag was placed.
    fn apply_verdict<M: Minefield>(
        &mut self,
        field: &mut M,
        state: &mut SolveState,
        pos: Position,
        verdict: Verdict,
    ) -> Result<bool, SolverError> {
        match verdict {
            Verdict::AllSafe(cells) => {
                for cell in cells {
                    state.enqueue(cell);
                }
                Ok(false)
            }
            Verdict::AllMines(cells) => self.flag_all(field, state, cells),
            Verdict::Inconclusive => {
                state.unfinished.push_back(pos);
                Ok(false)
            }
            Verdict::Resolved | Verdict::NotAClue => Ok(false),
        }
    }

    fn flag_all<M, I>(
        &mut self,
        field: &mut M,
        state: &mut SolveState,
        cells: I,
    ) -> Result<bool, SolverError>
    where
        M: Minefield,
        I: IntoIterator<Item = Position>,
    {
        let mut flagged = false;
        for cell in cells {
            if field.flag(cell)? {
                state.report.score += 1;
                flagged = true;
                debug!("Flagged {}, score {}", cell, state.report.score);
            }
        }
        Ok(flagged)
    }

    fn infer<M: Minefield>(
        &mut self,
        field: &mut M,
        state: &mut SolveState,
    ) -> Result<Phase, SolverError> {
        if state.unfinished.is_empty() {
            return Ok(Phase::Guessing);
        }

        let cells: Vec<Position> = state.unfinished.iter().copied().collect();
        match self.engine.infer(field, &cells)? {
            Inference::Exhausted => {
                debug!("No deduction from {} open clues", cells.len());
                Ok(Phase::Guessing)
            }
            Inference::Deduced(deductions) => {
                debug!(
                    "Inferred {} mines and {} safe cells",
                    deductions.mines.len(),
                    deductions.safe.len()
                );
                self.flag_all(field, state, deductions.mines)?;
                for pos in deductions.safe {
                    state.enqueue(pos);
                }
                Ok(Phase::Checking)
            }
        }
    }

    fn guess<M: Minefield>(&mut self, field: &M, state: &mut SolveState) -> Phase {
        match self.pick_guess(field) {
            Some(pos) => {
                info!("Guessing {}", pos);
                state.report.guesses.push(pos);
                state.enqueue(pos);
                Phase::Opening
            }
            None => Phase::Done,
        }
    }

    /// A uniformly random covered, unflagged cell, or `None` when the board
    /// has none left.
    pub fn pick_guess<M: Minefield>(&mut self, field: &M) -> Option<Position> {
        let candidates: Vec<Position> = field
            .tiles()
            .into_iter()
            .filter(|tile| tile.cell.is_covered())
            .map(|tile| tile.pos)
            .collect();
        candidates.choose(&mut self.rng).copied()
    }
}
