//! Boolean satisfiability solver.
use std::io;

use anyhow::Error;
use log::info;
use thiserror::Error;

use dpll_formula::{CnfFormula, Lit};

use crate::config::{SolverConfig, SolverConfigUpdate};
use crate::dimacs::DimacsParser;
use crate::formula::{Conflict, Formula};
use crate::model::complete_model;
use crate::search::{Search, SearchOutcome, SearchStats};

/// Reasons for [`Solver::solve`] to give up without an answer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("Decision limit of {} reached", limit)]
    DecisionLimit { limit: u64 },
}

/// A boolean satisfiability solver.
#[derive(Default)]
pub struct Solver {
    config: SolverConfig,
    formula: CnfFormula,
    model: Option<Vec<Lit>>,
    stats: SearchStats,
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Solver {
        Solver::default()
    }

    /// Change the solver configuration.
    pub fn config(&mut self, update: &SolverConfigUpdate) {
        update.apply(&mut self.config);
    }

    /// Add a formula to the solver.
    pub fn add_formula(&mut self, formula: &CnfFormula) {
        self.formula.append(formula);
        self.model = None;
    }

    /// Reads and adds a formula in DIMACS CNF format.
    pub fn add_dimacs_cnf(&mut self, input: impl io::Read) -> Result<(), Error> {
        let parser = DimacsParser::parse_incremental(input, |parser| {
            self.add_formula(&parser.take_formula());
            Ok(())
        })?;

        info!(
            "Parsed formula with {} variables and {} clauses",
            parser.var_count(),
            parser.clause_count()
        );

        Ok(())
    }

    /// Check the satisfiability of the current formula.
    ///
    /// Returns an error only if the configured decision limit is reached.
    pub fn solve(&mut self) -> Result<bool, SolverError> {
        self.model = None;
        self.stats = SearchStats::default();

        let formula = match Formula::from_cnf(&self.formula) {
            Ok(formula) => formula,
            Err(Conflict) => {
                info!("Formula contains an empty clause");
                return Ok(false);
            }
        };

        let outcome = {
            let mut search = Search::new(&self.config);
            let outcome = search.run(&formula);
            self.stats = search.stats().clone();
            outcome
        };

        info!(
            "decisions: {} conflicts: {} unit: {} pure: {} max depth: {}",
            self.stats.decisions,
            self.stats.conflicts,
            self.stats.unit_lits,
            self.stats.pure_lits,
            self.stats.max_depth
        );

        match outcome? {
            SearchOutcome::Success(valuation) => {
                self.model = Some(complete_model(&valuation, self.formula.var_count()));
                Ok(true)
            }
            SearchOutcome::Failure => Ok(false),
        }
    }

    /// Total assignment satisfying the formula.
    ///
    /// Contains one literal per variable, sorted by variable. Only available after a call to
    /// [`solve`](Solver::solve) returned true.
    pub fn model(&self) -> Option<Vec<Lit>> {
        self.model.clone()
    }

    /// Counters of the last call to [`solve`](Solver::solve).
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

/// Solve a formula with the default configuration.
///
/// Returns a total assignment sorted by variable or `None` if the formula is unsatisfiable.
pub fn solve_formula(formula: &CnfFormula) -> Option<Vec<Lit>> {
    let mut solver = Solver::new();
    solver.add_formula(formula);
    let result = solver.solve();
    debug_assert!(
        result.is_ok(),
        "search without a decision limit gave up: {:?}",
        result
    );
    match result {
        Ok(true) => solver.model(),
        _ => None,
    }
}
