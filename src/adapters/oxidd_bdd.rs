//! Adapter for oxidd's plain (terminal-pair) BDD representation.
//!
//! oxidd is a concurrent, manager-centric framework: a `BDDManagerRef` owns
//! the node store and apply cache, and `BDDFunction` handles keep nodes
//! alive through reference counting. The adapter pre-allocates one literal
//! pair per variable at construction, so `ithvar`/`nithvar` are handle
//! clones, and it keeps a model-counting cache across `satcount` calls the
//! way the engine intends it to be reused. oxidd performs no automatic
//! variable reordering, so node identity is stable without extra
//! configuration.

use std::cell::RefCell;
use std::hash::BuildHasherDefault;

use num_bigint::BigUint;
use oxidd::bdd::{BDDFunction, BDDManagerRef};
use oxidd::util::{FxHasher, SatCountCache};
use oxidd::{BooleanFunction, BooleanFunctionQuant, Function, LevelNo, Manager, ManagerRef};

use crate::budget::{self, Sizing};
use crate::engine::{Build, Engine, IncrementalBuild, UniversalQuant};
use crate::error::Error;
use crate::stats::{Counter, StatsReport};

const OOM: &str = "oxidd-bdd: allocation failed after garbage collection";

/// oxidd plain-BDD engine adapter.
pub struct OxiddBdd {
    manager: BDDManagerRef,
    sizing: Sizing,
    varcount: usize,
    vars: Vec<BDDFunction>,
    nvars: Vec<BDDFunction>,
    zero: BDDFunction,
    one: BDDFunction,
    satcache: RefCell<SatCountCache<BigUint, BuildHasherDefault<FxHasher>>>,
    build: Build<BDDFunction>,
}

impl OxiddBdd {
    /// Like [`Engine::new`], but with an explicit worker thread count for
    /// the engine's internal task runtime.
    pub fn with_threads(budget_mb: u64, varcount: usize, threads: u32) -> Result<Self, Error> {
        let sizing = budget::oxidd(budget_mb)?;
        log::debug!(
            "oxidd-bdd: {} MiB -> {} nodes, {} cache entries",
            budget_mb,
            sizing.table_capacity,
            sizing.cache_capacity
        );

        let manager = oxidd::bdd::new_manager(sizing.table_capacity, sizing.cache_capacity, threads);
        let (zero, one) =
            manager.with_manager_shared(|m| (BDDFunction::f(m), BDDFunction::t(m)));
        let vars: Vec<BDDFunction> = manager
            .with_manager_exclusive(|m| {
                (0..varcount).map(|_| BDDFunction::new_var(m)).collect::<Result<_, _>>()
            })
            .map_err(|_| Error::OutOfMemory { engine: <Self as Engine>::NAME })?;
        let nvars: Vec<BDDFunction> = vars
            .iter()
            .map(|v| v.not())
            .collect::<Result<_, _>>()
            .map_err(|_| Error::OutOfMemory { engine: <Self as Engine>::NAME })?;

        Ok(OxiddBdd {
            manager,
            sizing,
            varcount,
            vars,
            nvars,
            zero,
            one,
            satcache: RefCell::new(SatCountCache::default()),
            build: Build::Empty,
        })
    }

    /// Conjunction of the positive literals for `labels`, the cube shape
    /// oxidd's quantification primitives take.
    fn cube(&self, labels: &[usize]) -> BDDFunction {
        let mut cube = self.one.clone();
        for &label in labels {
            cube = cube.and(&self.vars[label]).expect(OOM);
        }
        cube
    }
}

impl Engine for OxiddBdd {
    type Node = BDDFunction;

    const NAME: &'static str = "oxidd-bdd";

    fn new(budget_mb: u64, varcount: usize) -> Result<Self, Error> {
        Self::with_threads(budget_mb, varcount, 1)
    }

    fn varcount(&self) -> usize {
        self.varcount
    }

    fn leaf_true(&self) -> BDDFunction {
        self.one.clone()
    }

    fn leaf_false(&self) -> BDDFunction {
        self.zero.clone()
    }

    fn ithvar(&self, label: usize) -> BDDFunction {
        self.vars[label].clone()
    }

    fn nithvar(&self, label: usize) -> BDDFunction {
        self.nvars[label].clone()
    }

    fn ite(&self, f: &BDDFunction, g: &BDDFunction, h: &BDDFunction) -> BDDFunction {
        f.ite(g, h).expect(OOM)
    }

    fn apply_not(&self, f: &BDDFunction) -> BDDFunction {
        f.not().expect(OOM)
    }

    fn apply_and(&self, f: &BDDFunction, g: &BDDFunction) -> BDDFunction {
        f.and(g).expect(OOM)
    }

    fn apply_or(&self, f: &BDDFunction, g: &BDDFunction) -> BDDFunction {
        f.or(g).expect(OOM)
    }

    fn exists_set(&self, f: &BDDFunction, labels: &[usize]) -> BDDFunction {
        f.exist(&self.cube(labels)).expect(OOM)
    }

    fn nodecount(&self, f: &BDDFunction) -> usize {
        // The native count includes reachable terminals: one for a constant
        // function, both otherwise (a reduced BDD reaching only one terminal
        // is constant).
        let terminals = if f == &self.zero || f == &self.one { 1 } else { 2 };
        f.node_count() - terminals
    }

    fn satcount(&self, f: &BDDFunction) -> BigUint {
        let mut cache = self.satcache.borrow_mut();
        f.sat_count(self.varcount as LevelNo, &mut cache)
    }

    fn allocated_nodes(&self) -> Option<usize> {
        Some(self.manager.with_manager_shared(|m| m.num_inner_nodes()))
    }

    fn stats(&self) -> StatsReport {
        let (nodes, reorders) =
            self.manager.with_manager_shared(|m| (m.num_inner_nodes(), m.reorder_count()));
        StatsReport {
            engine: Self::NAME,
            varcount: self.varcount,
            allocated_nodes: Some(nodes),
            counters: vec![
                Counter::new("node table capacity", self.sizing.table_capacity as u64),
                Counter::new("apply cache capacity", self.sizing.cache_capacity as u64),
                Counter::new("reorderings", reorders),
                Counter::unavailable("gc runs"),
            ],
        }
    }

    fn print_stats(&self) {
        println!("{}", self.stats());
        // Operation counters, if the engine was compiled with them.
        oxidd::bdd::print_stats();
    }
}

impl UniversalQuant for OxiddBdd {
    fn forall_set(&self, f: &BDDFunction, labels: &[usize]) -> BDDFunction {
        f.forall(&self.cube(labels)).expect(OOM)
    }
}

impl IncrementalBuild for OxiddBdd {
    fn build_slot(&mut self) -> &mut Build<BDDFunction> {
        &mut self.build
    }
}
