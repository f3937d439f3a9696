//! Random formula generators for tests.
use proptest::{prelude::*, *};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cnf::CnfFormula;
use crate::lit::Lit;

/// Generate small but hard unsatisfiable instances.
///
/// Follows the sgen1 construction (http://www.cs.qub.ac.uk/~i.spence/sgen/) with random
/// partitions. The `4 * blocks + 1` literals are split into one group of five and groups of four.
/// Every group gets all 3-literal clauses over it, so more than half of each group is true. A
/// second random partition over the negated literals asks for more than half of each group to be
/// false, which needs more variables than there are.
pub fn sgen_unsat_formula(
    blocks: impl Strategy<Value = usize>,
) -> impl Strategy<Value = CnfFormula> {
    blocks.prop_flat_map(|blocks| {
        collection::vec(bool::ANY, blocks * 4 + 1).prop_perturb(|polarities, mut rng| {
            let mut lits = polarities
                .into_iter()
                .enumerate()
                .map(|(index, polarity)| Lit::from_index(index, polarity))
                .collect::<Vec<_>>();

            let mut clauses: Vec<Vec<Lit>> = vec![];

            for &negate in [false, true].iter() {
                lits.shuffle(&mut rng);
                let (first, rest) = lits.split_at(lits.len().min(5));

                for group in Some(first).into_iter().chain(rest.chunks_exact(4)) {
                    for (i, &a) in group.iter().enumerate() {
                        for (j, &b) in group[..i].iter().enumerate() {
                            for &c in group[..j].iter() {
                                clauses.push(vec![a ^ negate, b ^ negate, c ^ negate]);
                            }
                        }
                    }
                }
            }

            for clause in clauses.iter_mut() {
                clause.shuffle(&mut rng);
            }
            clauses.shuffle(&mut rng);
            CnfFormula::from(clauses)
        })
    })
}

/// Generate a satisfiable instance with a planted solution.
///
/// A random total assignment is fixed first; every generated clause contains at least one
/// literal that is true under it. `density` is the probability of adding each further variable
/// to a clause and `agreement` the probability that such a literal also agrees with the planted
/// assignment.
pub fn sat_formula(
    vars: impl Strategy<Value = usize>,
    clause_count: impl Strategy<Value = usize>,
    density: impl Strategy<Value = f64>,
    agreement: impl Strategy<Value = f64>,
) -> impl Strategy<Value = CnfFormula> {
    (vars, clause_count, density, agreement).prop_flat_map(
        |(vars, clause_count, density, agreement)| {
            collection::vec(bool::ANY, vars).prop_perturb(move |polarities, mut rng| {
                let planted = polarities
                    .into_iter()
                    .enumerate()
                    .map(|(index, polarity)| Lit::from_index(index, polarity))
                    .collect::<Vec<_>>();

                let mut clauses: Vec<Vec<Lit>> = vec![];

                for _ in 0..clause_count {
                    let &fixed_lit = planted.choose(&mut rng).unwrap();
                    let mut clause = vec![fixed_lit];
                    for &lit in planted.iter() {
                        if lit != fixed_lit && rng.gen_bool(density) {
                            clause.push(lit ^ !rng.gen_bool(agreement));
                        }
                    }
                    clause.shuffle(&mut rng);
                    clauses.push(clause);
                }

                clauses.shuffle(&mut rng);
                let mut formula = CnfFormula::from(clauses);
                formula.set_var_count(vars);
                formula
            })
        },
    )
}

/// Generate a pigeon hole formula: `holes + 1` pigeons that each need one of `holes` holes,
/// with no two pigeons sharing a hole. Always unsatisfiable.
pub fn pigeon_hole(holes: impl Strategy<Value = usize>) -> impl Strategy<Value = CnfFormula> {
    holes.prop_perturb(|holes, mut rng| {
        let pigeons = holes + 1;
        let var = |pigeon: usize, hole: usize| Lit::from_index(pigeon * holes + hole, true);

        let mut clauses: Vec<Vec<Lit>> = vec![];

        for pigeon in 0..pigeons {
            clauses.push((0..holes).map(|hole| var(pigeon, hole)).collect());
        }

        for hole in 0..holes {
            for a in 0..pigeons {
                for b in 0..a {
                    clauses.push(vec![!var(a, hole), !var(b, hole)]);
                }
            }
        }

        clauses.shuffle(&mut rng);
        let mut formula = CnfFormula::from(clauses);
        formula.set_var_count(pigeons * holes);
        formula
    })
}
