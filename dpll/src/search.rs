//! Recursive DPLL search.
//!
//! Every search node first simplifies its formula using pure literal elimination and unit
//! propagation. If that neither fails nor satisfies all clauses, the node branches on a literal
//! and recurses into both polarities, positive first. As formulas are values, a failed branch is
//! simply dropped; there is nothing to undo before trying the other polarity.
//!
//! The recursion depth is bounded by the number of variables, as every level assigns at least
//! one variable that does not occur in the formula below it.
use log::debug;

use dpll_formula::Lit;

use crate::config::SolverConfig;
use crate::formula::{Conflict, Formula};
use crate::pure::eliminate_pure;
use crate::solver::SolverError;
use crate::unit::propagate;

/// Result of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// All clauses satisfied by the contained partial assignment.
    Success(Vec<Lit>),
    /// No assignment extending the initial one satisfies the formula.
    Failure,
}

/// Counters collected during a search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Branching literals tried.
    pub decisions: u64,
    /// Search nodes or branches that ended in a conflict.
    pub conflicts: u64,
    /// Literals assigned by unit propagation.
    pub unit_lits: u64,
    /// Literals assigned by pure literal elimination.
    pub pure_lits: u64,
    /// Deepest recursion level reached.
    pub max_depth: usize,
}

/// State of a single search run.
pub struct Search<'a> {
    config: &'a SolverConfig,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    pub fn new(config: &'a SolverConfig) -> Search<'a> {
        Search {
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Search for a satisfying assignment of `formula`.
    ///
    /// Only fails when the configured decision limit is exceeded.
    pub fn run(&mut self, formula: &Formula) -> Result<SearchOutcome, SolverError> {
        self.search(formula, vec![], 0)
    }

    fn search(
        &mut self,
        formula: &Formula,
        mut valuation: Vec<Lit>,
        depth: usize,
    ) -> Result<SearchOutcome, SolverError> {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let (formula, pure) = eliminate_pure(formula);
        self.stats.pure_lits += pure.len() as u64;
        valuation.extend(pure);

        let (formula, units) = propagate(&formula);
        self.stats.unit_lits += units.len() as u64;
        valuation.extend(units);

        let formula = match formula {
            Ok(formula) => formula,
            Err(Conflict) => {
                self.stats.conflicts += 1;
                debug!("depth {}: conflict during propagation", depth);
                return Ok(SearchOutcome::Failure);
            }
        };

        // Only a formula without clauses has no literal to branch on
        let branch_lit = match self.config.branching.select(&formula) {
            Some(lit) => lit,
            None => return Ok(SearchOutcome::Success(valuation)),
        };

        for &lit in [branch_lit, !branch_lit].iter() {
            self.decide(depth, lit)?;

            let branch = match formula.assign(lit) {
                Ok(branch) => branch,
                Err(Conflict) => {
                    self.stats.conflicts += 1;
                    continue;
                }
            };

            let mut branch_valuation = valuation.clone();
            branch_valuation.push(lit);

            if let SearchOutcome::Success(model) =
                self.search(&branch, branch_valuation, depth + 1)?
            {
                return Ok(SearchOutcome::Success(model));
            }
        }

        debug!("depth {}: backtracking", depth);
        Ok(SearchOutcome::Failure)
    }

    fn decide(&mut self, depth: usize, lit: Lit) -> Result<(), SolverError> {
        if let Some(limit) = self.config.decision_limit {
            if self.stats.decisions >= limit {
                return Err(SolverError::DecisionLimit { limit });
            }
        }
        self.stats.decisions += 1;
        debug!("depth {}: deciding {}", depth, lit);
        Ok(())
    }
}
