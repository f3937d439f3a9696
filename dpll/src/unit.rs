//! Unit propagation.
use log::trace;

use dpll_formula::Lit;

use crate::formula::{Conflict, Formula};

/// Makes unit clauses true until none are left.
///
/// Always picks the first unit clause of the current formula. Stops early on a conflict, in
/// which case the returned literals include the one that caused it.
///
/// Returns the result of the propagation and all literals made true, in propagation order.
pub fn propagate(formula: &Formula) -> (Result<Formula, Conflict>, Vec<Lit>) {
    let mut assigned = vec![];
    let mut formula = formula.clone();

    while let Some(lit) = formula.first_unit() {
        trace!("unit {}", lit);
        assigned.push(lit);
        formula = match formula.assign(lit) {
            Ok(formula) => formula,
            Err(conflict) => return (Err(conflict), assigned),
        };
    }

    (Ok(formula), assigned)
}
