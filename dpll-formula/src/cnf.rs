//! CNF input formulas.
use std::cmp::max;
use std::fmt;
use std::iter::Extend;
use std::ops::Range;

use crate::lit::Lit;

/// A formula in conjunctive normal form, as handed to the solver.
///
/// All literals live in one buffer; each clause is a range into it. Besides the clauses the
/// formula tracks a variable count, which is at least one more than the largest variable index
/// used but can be raised further, e.g. by a DIMACS header declaring unused variables.
#[derive(Default, Clone, Eq)]
pub struct CnfFormula {
    var_count: usize,
    literals: Vec<Lit>,
    clause_ranges: Vec<Range<usize>>,
}

impl CnfFormula {
    pub fn new() -> CnfFormula {
        CnfFormula::default()
    }

    /// Number of variables of the formula, including unused ones below the largest index.
    pub fn var_count(&self) -> usize {
        self.var_count
    }

    /// Raise the variable count to `count`.
    ///
    /// Does nothing if the formula already has at least `count` variables.
    pub fn set_var_count(&mut self, count: usize) {
        self.var_count = max(self.var_count, count)
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.clause_ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clause_ranges.is_empty()
    }

    /// Appends a clause.
    ///
    /// Accepts anything iterating over `Lit` or `&Lit`.
    pub fn add_clause<L>(&mut self, literals: impl IntoIterator<Item = L>)
    where
        Vec<Lit>: Extend<L>,
    {
        let begin = self.literals.len();
        self.literals.extend(literals);
        let end = self.literals.len();

        if let Some(max_index) = self.literals[begin..end].iter().map(|lit| lit.index()).max() {
            self.var_count = max(self.var_count, max_index + 1);
        }

        self.clause_ranges.push(begin..end);
    }

    /// Appends all clauses of another formula and raises the variable count to match it.
    pub fn append(&mut self, other: &CnfFormula) {
        self.set_var_count(other.var_count());
        for clause in other.iter() {
            self.add_clause(clause);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Lit]> {
        let literals = &self.literals;
        self.clause_ranges
            .iter()
            .map(move |range| &literals[range.clone()])
    }
}

/// Builds a formula from nested iterables of literals.
impl<F, I, L> From<F> for CnfFormula
where
    F: IntoIterator<Item = I>,
    I: IntoIterator<Item = L>,
    Vec<Lit>: Extend<L>,
{
    fn from(formula: F) -> CnfFormula {
        let mut cnf_formula = CnfFormula::new();
        for clause in formula {
            cnf_formula.add_clause(clause);
        }
        cnf_formula
    }
}

impl fmt::Debug for CnfFormula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.var_count(), f)?;
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Two formulas are equal when they have the same variable count and the same clauses in the
/// same order, independent of how the literal buffer is laid out.
impl PartialEq for CnfFormula {
    fn eq(&self, other: &CnfFormula) -> bool {
        self.var_count() == other.var_count()
            && self.len() == other.len()
            && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

#[cfg(any(test, feature = "proptest-strategies"))]
#[doc(hidden)]
pub mod strategy {
    use super::*;

    use proptest::{collection::SizeRange, prelude::*, *};

    use crate::lit::strategy::lit;

    /// Random clause lists over `vars` variables.
    pub fn vec_formula(
        vars: impl Strategy<Value = usize>,
        clauses: impl Into<SizeRange>,
        clause_len: impl Into<SizeRange>,
    ) -> impl Strategy<Value = Vec<Vec<Lit>>> {
        let clauses = clauses.into();
        let clause_len = clause_len.into();

        // Independent flat map keeps shrinking cheap
        vars.prop_ind_flat_map(move |vars| {
            collection::vec(
                collection::vec(lit(0..vars), clause_len.clone()),
                clauses.clone(),
            )
        })
    }

    /// Random formulas over exactly `vars` variables.
    ///
    /// Unlike [`vec_formula`] the variable count is taken from `vars`, even if the highest
    /// variables do not occur in any clause.
    pub fn cnf_formula(
        vars: impl Strategy<Value = usize>,
        clauses: impl Into<SizeRange>,
        clause_len: impl Into<SizeRange>,
    ) -> impl Strategy<Value = CnfFormula> {
        let clauses = clauses.into();
        let clause_len = clause_len.into();

        vars.prop_flat_map(move |vars| {
            collection::vec(
                collection::vec(lit(0..vars), clause_len.clone()),
                clauses.clone(),
            )
            .prop_map(move |clauses| {
                let mut formula = CnfFormula::from(clauses);
                formula.set_var_count(vars);
                formula
            })
        })
    }
}
