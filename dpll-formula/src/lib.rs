//! Literal, variable and CNF formula types used by the dpll SAT solver.

/// DIMACS literal, for tests.
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! lit {
    ($number:expr) => {
        $crate::Lit::from_dimacs($number)
    };
}

/// Array of DIMACS literals, for tests.
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! lits {
    ( $( $number:expr ),* $(,)? ) => {
        [ $( $crate::Lit::from_dimacs($number) ),* ]
    };
}

/// Array of clause slices, each clause terminated by `;`, for tests.
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! cnf {
    ( $( $( $number:expr ),* ; )* ) => {
        [ $( &$crate::lits![ $( $number ),* ] as &[$crate::Lit] ),* ]
    };
}

/// [`CnfFormula`] built from clauses in the syntax of [`cnf!`], for tests.
#[cfg(any(test, feature = "internal-testing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! cnf_formula {
    ( $( $clauses:tt )* ) => {{
        let mut formula = $crate::CnfFormula::new();
        for clause in $crate::cnf![ $( $clauses )* ].iter() {
            formula.add_clause(clause.iter());
        }
        formula
    }};
}

pub mod cnf;
pub mod lit;

#[cfg(any(test, feature = "internal-testing"))]
pub mod test;

pub use cnf::CnfFormula;
pub use lit::{Lit, Var};
