//! A [DPLL][dpll] based SAT solver. Given a boolean formula in [conjunctive normal form][cnf], it
//! either finds a variable assignment that makes the formula true or determines that there is
//! none.
//!
//! The search alternates pure literal elimination and unit propagation with branching on a
//! literal, backtracking chronologically when a branch fails. There is no clause learning.
//!
//! [dpll]: https://en.wikipedia.org/wiki/DPLL_algorithm
//! [cnf]: https://en.wikipedia.org/wiki/Conjunctive_normal_form

pub mod branch;
pub mod config;
pub mod formula;
pub mod pure;
pub mod search;
pub mod solver;
pub mod unit;

mod model;


pub use dpll_formula::{cnf, lit, CnfFormula, Lit, Var};
pub use solver::{solve_formula, Solver};

pub mod dimacs {
    //! DIMACS CNF parser and writer.
    pub use dpll_dimacs::*;
}
