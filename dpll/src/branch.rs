//! Branching heuristics.
use std::fmt;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use dpll_formula::Lit;

use crate::formula::Formula;

/// Rule for picking the literal to branch on.
///
/// The chosen literal is tried first, its negation second. All heuristics are deterministic and
/// break ties in favor of the literal occurring first in the formula.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BranchHeuristic {
    /// First literal of the first clause.
    FirstLiteral,
    /// Literal with the most occurrences.
    MostOccurrences,
    /// Literal maximizing the Jeroslow-Wang score, the sum of `2^-len` over all clauses
    /// containing it.
    JeroslowWang,
}

impl Default for BranchHeuristic {
    fn default() -> BranchHeuristic {
        BranchHeuristic::FirstLiteral
    }
}

impl fmt::Display for BranchHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            BranchHeuristic::FirstLiteral => "first-literal",
            BranchHeuristic::MostOccurrences => "most-occurrences",
            BranchHeuristic::JeroslowWang => "jeroslow-wang",
        };
        f.write_str(name)
    }
}

impl BranchHeuristic {
    /// Select the branching literal.
    ///
    /// Returns `None` only for an empty formula.
    pub fn select(self, formula: &Formula) -> Option<Lit> {
        match self {
            BranchHeuristic::FirstLiteral => first_literal(formula),
            BranchHeuristic::MostOccurrences => most_occurrences(formula),
            BranchHeuristic::JeroslowWang => jeroslow_wang(formula),
        }
    }
}

fn first_literal(formula: &Formula) -> Option<Lit> {
    formula.iter().next().map(|clause| clause[0])
}

fn most_occurrences(formula: &Formula) -> Option<Lit> {
    let occurrences = formula.occurrences();

    let mut best: Option<(Lit, usize)> = None;
    for &lit in occurrences.lits() {
        let count = occurrences.count(lit);
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((lit, count));
        }
    }
    best.map(|(lit, _)| lit)
}

fn jeroslow_wang(formula: &Formula) -> Option<Lit> {
    let mut scores: FxHashMap<Lit, f64> = FxHashMap::default();
    let mut order = vec![];

    for clause in formula.iter() {
        let weight = (-(clause.len() as f64)).exp2();
        for &lit in clause {
            let score = scores.entry(lit).or_insert_with(|| {
                order.push(lit);
                0.0
            });
            *score += weight;
        }
    }

    let mut best: Option<(Lit, f64)> = None;
    for lit in order {
        let score = scores[&lit];
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((lit, score));
        }
    }
    best.map(|(lit, _)| lit)
}

#[cfg(test)]
mod tests {
    use super::*;

    use dpll_formula::{cnf_formula, lit};

    fn formula() -> Formula {
        Formula::from_cnf(&cnf_formula![
            3, -1, 4, 5;
            -1, 2;
            2, 5, 6;
            -2, 4;
            -1, 6, 5;
        ])
        .unwrap()
    }

    #[test]
    fn first_literal_of_first_clause() {
        assert_eq!(BranchHeuristic::FirstLiteral.select(&formula()), Some(lit!(3)));
    }

    #[test]
    fn most_occurrences_breaks_ties_by_position() {
        // -1 and 5 both occur three times, -1 is seen first
        assert_eq!(BranchHeuristic::MostOccurrences.select(&formula()), Some(lit!(-1)));
    }

    #[test]
    fn jeroslow_wang_prefers_short_clauses() {
        // -1: 1/16 + 1/4 + 1/8, 2: 1/4 + 1/8, 4: 1/16 + 1/4, 5: 1/16 + 1/8 + 1/8
        assert_eq!(BranchHeuristic::JeroslowWang.select(&formula()), Some(lit!(-1)));

        let formula = Formula::from_cnf(&cnf_formula![
            1, 2, 3;
            1, 4, 5;
            6, -2;
        ])
        .unwrap();
        // 1: 1/8 + 1/8, 6: 1/4, tie goes to 1
        assert_eq!(BranchHeuristic::JeroslowWang.select(&formula), Some(lit!(1)));
        assert_eq!(
            BranchHeuristic::JeroslowWang.select(&formula.assign(lit!(-4)).unwrap()),
            Some(lit!(1))
        );
        assert_eq!(
            BranchHeuristic::JeroslowWang.select(&formula.assign(lit!(1)).unwrap()),
            Some(lit!(6))
        );
    }

    #[test]
    fn empty_formula() {
        for &heuristic in [
            BranchHeuristic::FirstLiteral,
            BranchHeuristic::MostOccurrences,
            BranchHeuristic::JeroslowWang,
        ]
        .iter()
        {
            assert_eq!(heuristic.select(&Formula::default()), None);
        }
    }
}
