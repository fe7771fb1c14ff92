//! Adapter for `biodivine-lib-bdd`.
//!
//! lib-bdd is array-backed: every `Bdd` is a standalone, canonically sorted
//! node vector, and the `BddVariableSet` only carries the variable ordering.
//! There is no shared node table and no operation cache to size, so the
//! megabyte budget has no pools to partition; the engine grows each result
//! vector as needed. Consequently [`Engine::allocated_nodes`] reports
//! nothing and the statistics are mostly unavailable, which the report
//! prints explicitly.
//!
//! The engine has no native universal quantification, so this adapter does
//! not implement [`UniversalQuant`](crate::engine::UniversalQuant);
//! requesting `forall` on it is a compile error rather than a hidden
//! emulation.
//!
//! Satisfying assignments are counted by the engine in floating point; the
//! adapter rounds to the nearest integer. For variable counts large enough
//! that the count leaves `f64` range, it falls back to the engine's exact
//! (and slower) counter.

use biodivine_lib_bdd::{Bdd, BddVariable, BddVariableSet};
use num_bigint::BigUint;
use num_traits::FromPrimitive;

use crate::engine::{Build, Engine, IncrementalBuild};
use crate::error::Error;
use crate::stats::{Counter, StatsReport};

/// biodivine-lib-bdd engine adapter.
pub struct LibBdd {
    set: BddVariableSet,
    vars: Vec<BddVariable>,
    varcount: usize,
    build: Build<Bdd>,
}

impl Engine for LibBdd {
    type Node = Bdd;

    const NAME: &'static str = "lib-bdd";

    fn new(budget_mb: u64, varcount: usize) -> Result<Self, Error> {
        if budget_mb == 0 {
            return Err(Error::InsufficientBudget {
                engine: Self::NAME,
                budget_mb,
                varcount: Some(varcount),
            });
        }
        if varcount > u16::MAX as usize {
            return Err(Error::TooManyVariables {
                engine: Self::NAME,
                requested: varcount,
                max: u16::MAX as usize,
            });
        }

        let set = BddVariableSet::new_anonymous(varcount as u16);
        let vars = set.variables();
        log::debug!("lib-bdd: {} variables, per-object storage (budget unmanaged)", varcount);

        Ok(LibBdd { set, vars, varcount, build: Build::Empty })
    }

    fn varcount(&self) -> usize {
        self.varcount
    }

    fn leaf_true(&self) -> Bdd {
        self.set.mk_true()
    }

    fn leaf_false(&self) -> Bdd {
        self.set.mk_false()
    }

    fn ithvar(&self, label: usize) -> Bdd {
        self.set.mk_var(self.vars[label])
    }

    fn nithvar(&self, label: usize) -> Bdd {
        self.set.mk_not_var(self.vars[label])
    }

    fn ite(&self, f: &Bdd, g: &Bdd, h: &Bdd) -> Bdd {
        // The engine works through binary operations; this is its standard
        // if-then-else decomposition.
        f.and(g).or(&f.not().and(h))
    }

    fn apply_not(&self, f: &Bdd) -> Bdd {
        f.not()
    }

    fn apply_and(&self, f: &Bdd, g: &Bdd) -> Bdd {
        f.and(g)
    }

    fn apply_or(&self, f: &Bdd, g: &Bdd) -> Bdd {
        f.or(g)
    }

    fn exists_set(&self, f: &Bdd, labels: &[usize]) -> Bdd {
        let vars: Vec<BddVariable> = labels.iter().map(|&l| self.vars[l]).collect();
        f.project(&vars)
    }

    fn nodecount(&self, f: &Bdd) -> usize {
        // The node vector includes the terminal entries.
        f.size().saturating_sub(2)
    }

    fn satcount(&self, f: &Bdd) -> BigUint {
        let count = f.cardinality();
        match BigUint::from_f64(count.round()) {
            Some(n) => n,
            // Beyond f64 range; take the exact path instead of saturating.
            None => f.exact_cardinality().to_biguint().unwrap_or_default(),
        }
    }

    fn allocated_nodes(&self) -> Option<usize> {
        None
    }

    fn stats(&self) -> StatsReport {
        StatsReport {
            engine: Self::NAME,
            varcount: self.varcount,
            allocated_nodes: None,
            counters: vec![
                Counter::unavailable("gc runs"),
                Counter::unavailable("cache hits"),
                Counter::unavailable("cache misses"),
            ],
        }
    }

    fn export_dot(&self, f: &Bdd, w: &mut dyn std::io::Write) -> Result<(), Error> {
        w.write_all(f.to_dot_string(&self.set, true).as_bytes())?;
        Ok(())
    }
}

impl IncrementalBuild for LibBdd {
    fn build_slot(&mut self) -> &mut Build<Bdd> {
        &mut self.build
    }
}
