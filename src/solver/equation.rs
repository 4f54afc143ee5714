use crate::Var;
use std::collections::BTreeMap;
use std::fmt;

/// A linear constraint `sum(coefficient * var) = value` over 0/1 unknowns.
///
/// Equations built from clues have unit coefficients. Subtracting two
/// overlapping equations can leave `-1` coefficients behind; those are kept
/// so the bound check in [`Equation::conclusion`] stays sound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Equation {
    terms: BTreeMap<Var, i32>,
    value: i32,
}

/// Variables an equation pins down on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub mines: Vec<Var>,
    pub safe: Vec<Var>,
}

impl Equation {
    pub fn from_vars<I: IntoIterator<Item = Var>>(vars: I, value: i32) -> Self {
        Self {
            terms: vars.into_iter().map(|var| (var, 1)).collect(),
            value,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn vars(&self) -> impl Iterator<Item = Var> + '_ {
        self.terms.keys().copied()
    }

    pub fn coefficient(&self, var: Var) -> i32 {
        self.terms.get(&var).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Every coefficient is exactly one.
    pub fn is_unit(&self) -> bool {
        self.terms.values().all(|&c| c == 1)
    }

    pub fn is_strict_subset_of(&self, other: &Equation) -> bool {
        self.len() < other.len() && self.terms.keys().all(|var| other.terms.contains_key(var))
    }

    pub fn shares_variables(&self, other: &Equation) -> bool {
        self.terms.keys().any(|var| other.terms.contains_key(var))
    }

    /// `self - other`, term by term. Shared variables with equal
    /// coefficients cancel out.
    pub fn subtract(&self, other: &Equation) -> Equation {
        let mut terms = self.terms.clone();
        for (&var, &coeff) in &other.terms {
            let entry = terms.entry(var).or_insert(0);
            *entry -= coeff;
            if *entry == 0 {
                terms.remove(&var);
            }
        }
        Equation {
            terms,
            value: self.value - other.value,
        }
    }

    /// Replaces a resolved variable by its value. Returns whether the
    /// variable was present.
    pub fn substitute(&mut self, var: Var, is_mine: bool) -> bool {
        match self.terms.remove(&var) {
            Some(coeff) => {
                if is_mine {
                    self.value -= coeff;
                }
                true
            }
            None => false,
        }
    }

    /// Smallest and largest value the left-hand side can take.
    pub fn bounds(&self) -> (i32, i32) {
        self.terms.values().fold((0, 0), |(low, high), &c| {
            if c < 0 {
                (low + c, high)
            } else {
                (low, high + c)
            }
        })
    }

    pub fn is_feasible(&self) -> bool {
        let (low, high) = self.bounds();
        (low..=high).contains(&self.value)
    }

    /// When the value sits on one of the bounds, every variable is forced:
    /// at the upper bound positive terms are mines and negative terms safe,
    /// at the lower bound the reverse.
    pub fn conclusion(&self) -> Option<Resolution> {
        if self.is_empty() {
            return None;
        }

        let (low, high) = self.bounds();
        let (positive, negative): (Vec<_>, Vec<_>) =
            self.terms.iter().partition(|&(_, &coeff)| coeff > 0);
        let positive: Vec<Var> = positive.into_iter().map(|(&var, _)| var).collect();
        let negative: Vec<Var> = negative.into_iter().map(|(&var, _)| var).collect();

        if self.value == high {
            Some(Resolution {
                mines: positive,
                safe: negative,
            })
        } else if self.value == low {
            Some(Resolution {
                mines: negative,
                safe: positive,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            write!(f, "0")?;
        }
        for (i, (var, &coeff)) in self.terms.iter().enumerate() {
            let sign = if coeff < 0 { "-" } else { "+" };
            match (i, coeff.abs()) {
                (0, 1) if coeff > 0 => write!(f, "{}", var)?,
                (0, 1) => write!(f, "-{}", var)?,
                (0, n) if coeff > 0 => write!(f, "{}{}", n, var)?,
                (0, n) => write!(f, "-{}{}", n, var)?,
                (_, 1) => write!(f, " {} {}", sign, var)?,
                (_, n) => write!(f, " {} {}{}", sign, n, var)?,
            }
        }
        write!(f, " = {}", self.value)
    }
}
