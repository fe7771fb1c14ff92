//! Cross-engine contract properties.
//!
//! Every property is a generic function over the capability traits,
//! instantiated for each adapter below. A new adapter earns its place by
//! passing this suite unchanged.

use bdd_bench::adapters::{LibBdd, OxiddBcdd, OxiddBdd};
use bdd_bench::engine::{Engine, IncrementalBuild, UniversalQuant};

#[cfg(feature = "cudd")]
use bdd_bench::adapters::Cudd;

fn mk<E: Engine>(vars: usize) -> E {
    E::new(8, vars).unwrap()
}

fn leaves<E: Engine>() {
    let engine = mk::<E>(3);
    assert!(engine.leaf_true() != engine.leaf_false());
    assert_eq!(engine.satcount(&engine.leaf_true()), 8u32.into());
    assert_eq!(engine.satcount(&engine.leaf_false()), 0u32.into());
    assert_eq!(engine.nodecount(&engine.leaf_true()), 0);
    assert_eq!(engine.nodecount(&engine.leaf_false()), 0);
}

fn canonical_literal<E: Engine>() {
    let engine = mk::<E>(3);
    for label in 0..engine.varcount() {
        let var = engine.ithvar(label);
        let rebuilt = engine.ite(&var, &engine.leaf_true(), &engine.leaf_false());
        assert!(rebuilt == var);
        assert_eq!(engine.nodecount(&rebuilt), engine.nodecount(&var));
    }
}

fn ops_agree_with_ite<E: Engine>() {
    let engine = mk::<E>(3);
    let f = engine.ithvar(0);
    let g = engine.apply_or(&engine.ithvar(1), &engine.nithvar(2));
    assert!(engine.apply_and(&f, &g) == engine.ite(&f, &g, &engine.leaf_false()));
    assert!(engine.apply_or(&f, &g) == engine.ite(&f, &engine.leaf_true(), &g));
    assert!(engine.apply_not(&f) == engine.ite(&f, &engine.leaf_false(), &engine.leaf_true()));
}

fn exists_idempotent<E: Engine>() {
    let engine = mk::<E>(3);
    let f = engine.apply_and(&engine.ithvar(0), &engine.ithvar(1));
    let once = engine.exists(&f, 0);
    let twice = engine.exists(&once, 0);
    assert!(once == twice);
}

fn exists_order_independent<E: Engine>() {
    let engine = mk::<E>(3);
    // Both variables free in f.
    let f = engine.apply_and(&engine.ithvar(0), &engine.ithvar(1));
    let ab = engine.exists(&engine.exists(&f, 0), 1);
    let ba = engine.exists(&engine.exists(&f, 1), 0);
    assert!(ab == ba);
    // Set registration order does not matter either.
    assert!(engine.exists_set(&f, &[0, 1]) == engine.exists_set(&f, &[1, 0]));
}

fn exists_dispatch_shapes_agree<E: Engine>() {
    let engine = mk::<E>(4);
    let f = engine.apply_and(&engine.ithvar(1), &engine.ithvar(3));
    let by_set = engine.exists_set(&f, &[1, 3]);
    let by_pred = engine.exists_where(&f, |v| v % 2 == 1);
    assert!(by_set == by_pred);
    // An empty selection is the identity.
    assert!(engine.exists_where(&f, |_| false) == f);
}

fn exists_single_var_to_true<E: Engine>() {
    let engine = mk::<E>(1);
    let swept = engine.exists(&engine.ithvar(0), 0);
    assert!(swept == engine.leaf_true());
}

fn clause_scenario<E: Engine>() {
    // varcount = 3, M = 8: the clause (x0 ∨ ¬x1) keeps 6 of 8 assignments
    // through 2 decision nodes.
    let engine = mk::<E>(3);
    let clause = engine.apply_or(&engine.ithvar(0), &engine.nithvar(1));
    assert_eq!(engine.satcount(&clause), 6u32.into());
    assert_eq!(engine.nodecount(&clause), 2);
}

fn build_finalize_when_empty<E: Engine + IncrementalBuild>() {
    let mut engine = mk::<E>(2);
    assert!(engine.build() == engine.leaf_false());
}

fn build_leaf_round_trip<E: Engine + IncrementalBuild>() {
    let mut engine = mk::<E>(2);
    engine.build_leaf(true);
    assert!(engine.build() == engine.leaf_true());
    // The slot was consumed.
    assert!(engine.build() == engine.leaf_false());
}

fn build_two_var_and<E: Engine + IncrementalBuild>() {
    let mut engine = mk::<E>(2);
    let top = engine.build_leaf(true);
    let bottom = engine.leaf_false();
    let x1 = engine.build_node(1, &bottom, &top);
    engine.build_node(0, &bottom, &x1);
    let and = engine.build();
    assert!(and == engine.apply_and(&engine.ithvar(0), &engine.ithvar(1)));
    assert_eq!(engine.satcount(&and), 1u32.into());
    assert_eq!(engine.nodecount(&and), 2);
    assert!(engine.build() == engine.leaf_false());
}

fn forall_drops_to_false<E: UniversalQuant>() {
    let engine = mk::<E>(2);
    let swept = engine.forall(&engine.ithvar(0), 0);
    assert!(swept == engine.leaf_false());
}

fn forall_keeps_free_var<E: UniversalQuant>() {
    let engine = mk::<E>(2);
    let f = engine.apply_or(&engine.ithvar(0), &engine.ithvar(1));
    // ∀x0 (x0 ∨ x1) = x1
    assert!(engine.forall(&f, 0) == engine.ithvar(1));
}

fn forall_dispatch_shapes_agree<E: UniversalQuant>() {
    let engine = mk::<E>(4);
    let f = engine.apply_or(&engine.ithvar(0), &engine.ithvar(2));
    assert!(engine.forall_set(&f, &[0, 2]) == engine.forall_where(&f, |v| v % 2 == 0));
}

macro_rules! engine_suite {
    ($name:ident, $engine:ty) => {
        mod $name {
            use super::*;

            #[test]
            fn leaves() {
                super::leaves::<$engine>();
            }

            #[test]
            fn canonical_literal() {
                super::canonical_literal::<$engine>();
            }

            #[test]
            fn ops_agree_with_ite() {
                super::ops_agree_with_ite::<$engine>();
            }

            #[test]
            fn exists_idempotent() {
                super::exists_idempotent::<$engine>();
            }

            #[test]
            fn exists_order_independent() {
                super::exists_order_independent::<$engine>();
            }

            #[test]
            fn exists_dispatch_shapes_agree() {
                super::exists_dispatch_shapes_agree::<$engine>();
            }

            #[test]
            fn exists_single_var_to_true() {
                super::exists_single_var_to_true::<$engine>();
            }

            #[test]
            fn clause_scenario() {
                super::clause_scenario::<$engine>();
            }

            #[test]
            fn build_finalize_when_empty() {
                super::build_finalize_when_empty::<$engine>();
            }

            #[test]
            fn build_leaf_round_trip() {
                super::build_leaf_round_trip::<$engine>();
            }

            #[test]
            fn build_two_var_and() {
                super::build_two_var_and::<$engine>();
            }

            #[test]
            fn stats_never_fail() {
                let engine = mk::<$engine>(3);
                let report = engine.stats();
                assert!(!report.to_string().is_empty());
                engine.print_stats();
            }
        }
    };
}

macro_rules! quant_suite {
    ($name:ident, $engine:ty) => {
        mod $name {
            use super::*;

            #[test]
            fn forall_drops_to_false() {
                super::forall_drops_to_false::<$engine>();
            }

            #[test]
            fn forall_keeps_free_var() {
                super::forall_keeps_free_var::<$engine>();
            }

            #[test]
            fn forall_dispatch_shapes_agree() {
                super::forall_dispatch_shapes_agree::<$engine>();
            }
        }
    };
}

engine_suite!(oxidd_bdd, OxiddBdd);
engine_suite!(oxidd_bcdd, OxiddBcdd);
engine_suite!(lib_bdd, LibBdd);
#[cfg(feature = "cudd")]
engine_suite!(cudd, Cudd);

quant_suite!(oxidd_bdd_quant, OxiddBdd);
quant_suite!(oxidd_bcdd_quant, OxiddBcdd);
#[cfg(feature = "cudd")]
quant_suite!(cudd_quant, Cudd);
