//! Working formula of the search.
//!
//! A [`Formula`] is a value: simplifying it under an assignment produces a new formula and
//! leaves the old one intact, so a parent search node can still try the other polarity after a
//! failed branch. Clauses are reference counted and shared between a formula and the formulas
//! derived from it; only clauses that actually lose a literal are copied.
use std::rc::Rc;

use rustc_hash::FxHashMap;

use dpll_formula::{CnfFormula, Lit};

/// Simplification ran into an empty clause.
///
/// The assignment leading to it is inconsistent with the formula. Within the search this just
/// means the current branch fails.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Conflict;

/// Conjunction of non-empty clauses.
///
/// An empty clause never appears in a `Formula`; simplification steps that would create one
/// return [`Conflict`] instead. A formula without clauses is satisfied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Formula {
    clauses: Vec<Rc<[Lit]>>,
}

impl Formula {
    /// Working formula for an input formula.
    ///
    /// Fails if the input contains an empty clause.
    pub fn from_cnf(cnf: &CnfFormula) -> Result<Formula, Conflict> {
        let mut clauses = Vec::with_capacity(cnf.len());
        for clause in cnf.iter() {
            if clause.is_empty() {
                return Err(Conflict);
            }
            clauses.push(Rc::from(clause));
        }
        Ok(Formula { clauses })
    }

    /// Number of remaining clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether all clauses are satisfied.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Remaining clauses in order.
    pub fn iter(&self) -> impl Iterator<Item = &[Lit]> {
        self.clauses.iter().map(|clause| &clause[..])
    }

    /// Formula obtained by making `lit` true.
    ///
    /// Clauses containing `lit` are satisfied and dropped, the negation of `lit` is removed from
    /// all other clauses. Returns [`Conflict`] if that leaves a clause empty.
    pub fn assign(&self, lit: Lit) -> Result<Formula, Conflict> {
        let mut clauses = Vec::with_capacity(self.clauses.len());

        for clause in self.clauses.iter() {
            if clause.contains(&lit) {
                continue;
            }

            if clause.contains(&!lit) {
                let shrunk = clause
                    .iter()
                    .copied()
                    .filter(|&other| other != !lit)
                    .collect::<Rc<[Lit]>>();
                if shrunk.is_empty() {
                    return Err(Conflict);
                }
                clauses.push(shrunk);
            } else {
                clauses.push(clause.clone());
            }
        }

        Ok(Formula { clauses })
    }

    /// Makes all `lits` true in order, stopping at the first [`Conflict`].
    pub fn assign_many(&self, lits: impl IntoIterator<Item = Lit>) -> Result<Formula, Conflict> {
        let mut formula = self.clone();
        for lit in lits {
            formula = formula.assign(lit)?;
        }
        Ok(formula)
    }

    /// Keeps only the clauses for which `keep` returns true.
    pub(crate) fn filter(&self, mut keep: impl FnMut(&[Lit]) -> bool) -> Formula {
        Formula {
            clauses: self
                .clauses
                .iter()
                .filter(|clause| keep(&clause[..]))
                .cloned()
                .collect(),
        }
    }

    /// Literal of the first unit clause, if any.
    pub fn first_unit(&self) -> Option<Lit> {
        self.clauses.iter().find_map(|clause| match clause[..] {
            [lit] => Some(lit),
            _ => None,
        })
    }

    /// Occurrence counts of all literals.
    pub fn occurrences(&self) -> Occurrences {
        let mut occurrences = Occurrences::default();
        for clause in self.clauses.iter() {
            for &lit in clause.iter() {
                let count = occurrences.counts.entry(lit).or_insert(0);
                if *count == 0 {
                    occurrences.order.push(lit);
                }
                *count += 1;
            }
        }
        occurrences
    }
}

/// How often each literal occurs in a formula.
#[derive(Default)]
pub struct Occurrences {
    counts: FxHashMap<Lit, usize>,
    /// Occurring literals in order of their first occurrence.
    order: Vec<Lit>,
}

impl Occurrences {
    pub fn count(&self, lit: Lit) -> usize {
        self.counts.get(&lit).copied().unwrap_or(0)
    }

    /// Occurring literals in the order they first appear in the formula.
    pub fn lits(&self) -> &[Lit] {
        &self.order
    }
}
