//! Benchmark workloads, written once over the capability contract.
//!
//! Every function here is generic over [`Engine`] and compiles to a
//! monomorphized copy per adapter; none of them know (or may depend on)
//! which engine they run against, or on any adapter-internal state.

use crate::engine::Engine;

/// A literal: variable label plus polarity.
pub type Lit = (usize, bool);

/// Disjunction of literals.
pub fn clause<E: Engine>(engine: &E, lits: &[Lit]) -> E::Node {
    let mut acc = engine.leaf_false();
    for &(label, positive) in lits {
        let lit = if positive { engine.ithvar(label) } else { engine.nithvar(label) };
        acc = engine.apply_or(&acc, &lit);
    }
    acc
}

/// Conjunction of clauses.
pub fn cnf<E: Engine>(engine: &E, clauses: &[Vec<Lit>]) -> E::Node {
    let mut acc = engine.leaf_true();
    for lits in clauses {
        let c = clause(engine, lits);
        acc = engine.apply_and(&acc, &c);
        log::trace!("cnf: {} nodes after clause", engine.nodecount(&acc));
    }
    acc
}

/// The N-Queens placement function over `n * n` variables: variable
/// `i * n + j` means a queen on row `i`, column `j`.
///
/// The adapter must have been constructed with `varcount >= n * n`.
pub fn queens<E: Engine>(engine: &E, n: usize) -> E::Node {
    let var = |i: usize, j: usize| engine.ithvar(i * n + j);
    let not_var = |i: usize, j: usize| engine.nithvar(i * n + j);

    let mut result = engine.leaf_true();

    // Row constraints: at least one queen per row, no two in one row.
    for i in 0..n {
        let mut at_least_one = engine.leaf_false();
        for j in 0..n {
            at_least_one = engine.apply_or(&at_least_one, &var(i, j));
        }
        result = engine.apply_and(&result, &at_least_one);

        for j1 in 0..n {
            for j2 in (j1 + 1)..n {
                let not_both = engine.apply_or(&not_var(i, j1), &not_var(i, j2));
                result = engine.apply_and(&result, &not_both);
            }
        }
    }

    // Column constraints.
    for j in 0..n {
        for i1 in 0..n {
            for i2 in (i1 + 1)..n {
                let not_both = engine.apply_or(&not_var(i1, j), &not_var(i2, j));
                result = engine.apply_and(&result, &not_both);
            }
        }
    }

    // Diagonal constraints.
    for i1 in 0..n {
        for j1 in 0..n {
            for i2 in (i1 + 1)..n {
                for j2 in 0..n {
                    let di = i2 - i1;
                    if j2 == j1 + di || (j1 >= di && j2 == j1 - di) {
                        let not_both = engine.apply_or(&not_var(i1, j1), &not_var(i2, j2));
                        result = engine.apply_and(&result, &not_both);
                    }
                }
            }
        }
    }

    result
}

/// Quantify every variable out of `f`, leaving a leaf: the true leaf iff
/// `f` is satisfiable.
pub fn eliminate_all<E: Engine>(engine: &E, f: &E::Node) -> E::Node {
    engine.exists_where(f, |_| true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{LibBdd, OxiddBdd};

    // Solution counts for small boards.
    const QUEENS: [(usize, u32); 4] = [(3, 0), (4, 2), (5, 10), (6, 4)];

    fn queens_counts<E: Engine>() {
        for (n, expected) in QUEENS {
            let engine = E::new(32, n * n).unwrap();
            let board = queens(&engine, n);
            assert_eq!(engine.satcount(&board), expected.into(), "{}-queens", n);
        }
    }

    #[test_log::test]
    fn queens_counts_libbdd() {
        queens_counts::<LibBdd>();
    }

    #[test_log::test]
    fn queens_counts_oxidd() {
        queens_counts::<OxiddBdd>();
    }

    #[test]
    fn cnf_conjunction() {
        let engine = LibBdd::new(8, 3).unwrap();
        // (x0 ∨ x1) ∧ (¬x1 ∨ x2)
        let f = cnf(&engine, &[vec![(0, true), (1, true)], vec![(1, false), (2, true)]]);
        // x1 set forces x2 (two models), x1 clear forces x0 (two models).
        assert_eq!(engine.satcount(&f), 4u32.into());
    }

    #[test]
    fn eliminate_all_is_satisfiability() {
        let engine = LibBdd::new(8, 4).unwrap();
        let f = clause(&engine, &[(0, true), (2, false)]);
        let swept = eliminate_all(&engine, &f);
        assert!(swept == engine.leaf_true());

        let g = engine.apply_and(&engine.ithvar(1), &engine.nithvar(1));
        let swept = eliminate_all(&engine, &g);
        assert!(swept == engine.leaf_false());
    }
}
