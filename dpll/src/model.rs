//! Total assignments from search results.
use dpll_formula::{Lit, Var};

/// Extend a partial valuation to all `var_count` variables.
///
/// Variables without a value are set to true. The result has exactly one literal per variable,
/// sorted by variable index.
pub fn complete_model(valuation: &[Lit], var_count: usize) -> Vec<Lit> {
    let mut values: Vec<Option<bool>> = vec![None; var_count];

    for &lit in valuation {
        let value = &mut values[lit.index()];
        debug_assert!(
            value.map_or(true, |polarity| polarity == lit.is_positive()),
            "both polarities of {} assigned",
            lit.var()
        );
        *value = Some(lit.is_positive());
    }

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| Lit::from_var(Var::from_index(index), value.unwrap_or(true)))
        .collect()
}
