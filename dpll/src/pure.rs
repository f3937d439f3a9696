//! Pure literal elimination.
use log::trace;
use rustc_hash::FxHashSet;

use dpll_formula::Lit;

use crate::formula::Formula;

/// Makes all pure literals true.
///
/// A literal is pure if it occurs in the formula while its negation does not. Making a pure
/// literal true only satisfies clauses and never shortens one, so this cannot produce a
/// conflict.
///
/// Returns the simplified formula and the pure literals in order of their first occurrence.
pub fn eliminate_pure(formula: &Formula) -> (Formula, Vec<Lit>) {
    let occurrences = formula.occurrences();

    let pure = occurrences
        .lits()
        .iter()
        .copied()
        .filter(|&lit| occurrences.count(!lit) == 0)
        .collect::<Vec<_>>();

    if pure.is_empty() {
        return (formula.clone(), pure);
    }

    trace!("pure literals {:?}", pure);

    let pure_set = pure.iter().copied().collect::<FxHashSet<_>>();
    let simplified = formula.filter(|clause| !clause.iter().any(|lit| pure_set.contains(lit)));

    (simplified, pure)
}
