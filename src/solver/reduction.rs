use super::board::Minefield;
use super::equation::{Equation, Resolution};
use super::system::LinearSystem;
use super::traits::{deduction_test_suite, Deductions, DeterministicSolver, Solver};
use crate::{Position, SolverError, Var};
use itertools::Itertools;
use log::{debug, trace};
use std::collections::BTreeSet;

pub const DEFAULT_MAX_PASSES: usize = 256;

/// What a reduction run pinned down, in terms of variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reduction {
    pub mines: BTreeSet<Var>,
    pub safe: BTreeSet<Var>,
    /// Equations left undetermined at the fixed point
    pub remaining: Vec<Equation>,
    /// Passes that changed something
    pub passes: usize,
}

impl Reduction {
    fn resolve(&mut self, var: Var, is_mine: bool) -> Result<bool, SolverError> {
        let (own, other) = if is_mine {
            (&mut self.mines, &self.safe)
        } else {
            (&mut self.safe, &self.mines)
        };
        if other.contains(&var) {
            return Err(SolverError::Contradiction(var));
        }
        Ok(own.insert(var))
    }
}

/// Result of one inference round on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inference {
    Deduced(Deductions),
    /// The equations reached a fixed point without settling any cell
    Exhausted,
}

/// Reduces a set of clue equations to a fixed point.
///
/// Every pass:
/// 1. settles equations that force all their variables (value 0 or value
///    equal to the number of unknowns) and substitutes the results into the
///    other equations
/// 2. subtracts every equation from the equations whose variables strictly
///    contain its own
/// 3. subtracts overlapping pairs (larger value minus smaller) and keeps
///    whatever the difference forces
///
/// Each productive pass removes at least one term from the system, so the
/// number of passes is bounded by the total number of terms.
#[derive(Debug, Clone, Copy)]
pub struct ReductionEngine {
    pub max_passes: usize,
}

impl Default for ReductionEngine {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl ReductionEngine {
    pub fn new(max_passes: usize) -> Self {
        Self { max_passes }
    }

    pub fn reduce(&self, equations: Vec<Equation>) -> Result<Reduction, SolverError> {
        let mut result = Reduction {
            remaining: equations.into_iter().filter(|eq| !eq.is_empty()).unique().collect(),
            ..Reduction::default()
        };
        for equation in &result.remaining {
            ensure_feasible(equation)?;
        }

        loop {
            if result.passes >= self.max_passes {
                debug!(target: "solver", "Reduction stopped after {} passes", result.passes);
                break;
            }

            let mut changed = self.settle(&mut result)?;
            changed |= self.reduce_subsets(&mut result.remaining)?;
            changed |= self.combine_pairs(&mut result)?;

            if !changed {
                break;
            }
            result.passes += 1;
        }

        Ok(result)
    }

    /// Builds the equations for `cells` and reduces them.
    pub fn infer<M: Minefield>(
        &self,
        field: &M,
        cells: &[Position],
    ) -> Result<Inference, SolverError> {
        let deductions = self.deduce(field, cells)?;
        if deductions.is_empty() {
            Ok(Inference::Exhausted)
        } else {
            Ok(Inference::Deduced(deductions))
        }
    }

    /// Applies every equation that forces its variables, until none does.
    fn settle(&self, result: &mut Reduction) -> Result<bool, SolverError> {
        let mut changed = false;
        while let Some(resolution) = result.remaining.iter().find_map(Equation::conclusion) {
            self.apply(result, resolution)?;
            changed = true;
        }
        Ok(changed)
    }

    fn reduce_subsets(&self, equations: &mut [Equation]) -> Result<bool, SolverError> {
        let mut changed = false;
        for i in 0..equations.len() {
            for j in 0..equations.len() {
                if i != j && equations[i].is_strict_subset_of(&equations[j]) {
                    let reduced = equations[j].subtract(&equations[i]);
                    ensure_feasible(&reduced)?;
                    trace!(target: "solver", "{} reduces to {}", equations[j], reduced);
                    equations[j] = reduced;
                    changed = true;
                }
            }
        }
        Ok(changed)
    }

    fn combine_pairs(&self, result: &mut Reduction) -> Result<bool, SolverError> {
        let resolutions: Vec<Resolution> = result
            .remaining
            .iter()
            .tuple_combinations()
            .filter(|(a, b)| {
                a.shares_variables(b) && !a.is_strict_subset_of(b) && !b.is_strict_subset_of(a)
            })
            .filter_map(|(a, b)| {
                let derived = if a.value() >= b.value() {
                    a.subtract(b)
                } else {
                    b.subtract(a)
                };
                let resolution = derived.conclusion()?;
                trace!(target: "solver", "{} and {} give {}", a, b, derived);
                Some(resolution)
            })
            .collect();

        let mut changed = false;
        for resolution in resolutions {
            changed |= self.apply(result, resolution)?;
        }
        Ok(changed)
    }

    /// Records a resolution and substitutes it into every remaining equation.
    fn apply(&self, result: &mut Reduction, resolution: Resolution) -> Result<bool, SolverError> {
        let mut changed = false;
        let assignments = resolution
            .mines
            .into_iter()
            .map(|var| (var, true))
            .chain(resolution.safe.into_iter().map(|var| (var, false)));

        for (var, is_mine) in assignments {
            changed |= result.resolve(var, is_mine)?;
            for equation in result.remaining.iter_mut() {
                equation.substitute(var, is_mine);
            }
        }

        let remaining = std::mem::take(&mut result.remaining);
        result.remaining = remaining
            .into_iter()
            .filter(|eq| !eq.is_empty())
            .unique()
            .collect();
        for equation in &result.remaining {
            ensure_feasible(equation)?;
        }

        Ok(changed)
    }
}

fn ensure_feasible(equation: &Equation) -> Result<(), SolverError> {
    if equation.is_feasible() {
        Ok(())
    } else {
        Err(SolverError::InconsistentClue {
            value: equation.value(),
            unknowns: equation.len(),
        })
    }
}

impl Solver for ReductionEngine {
    fn name(&self) -> &str {
        "Equation Reduction Engine"
    }
}

impl DeterministicSolver for ReductionEngine {
    fn deduce<M: Minefield>(
        &self,
        field: &M,
        cells: &[Position],
    ) -> Result<Deductions, SolverError> {
        let system = LinearSystem::build(field, cells)?;
        let reduction = self.reduce(system.equations.clone())?;
        debug!(
            target: "solver",
            "{} equations reduced in {} passes: {} mines, {} safe, {} left",
            system.len(),
            reduction.passes,
            reduction.mines.len(),
            reduction.safe.len(),
            reduction.remaining.len()
        );

        Ok(Deductions {
            mines: reduction
                .mines
                .iter()
                .filter_map(|&var| system.position(var))
                .collect(),
            safe: reduction
                .safe
                .iter()
                .filter_map(|&var| system.position(var))
                .collect(),
        })
    }
}

deduction_test_suite!(ReductionEngine);
