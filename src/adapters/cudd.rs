//! Adapter for the CUDD C library, via the `cudd-sys` bindings.
//!
//! CUDD keeps one subtable bucket per declared variable, so its sizing
//! subtracts the bucket bytes from the budget before solving for node and
//! cache capacities (see [`crate::budget::cudd`]). The remaining budget is
//! also
//! handed to `Cudd_Init` as `maxMemory`, which caps the manager's own
//! resizing. Dynamic reordering is switched off right after initialization;
//! it would change node identity under the benchmark's feet.
//!
//! Node handles are raw `DdNode` pointers with manual reference counting.
//! [`CuddNode`] wraps them RAII-style: cloning refs, dropping
//! recursively derefs. CUDD uses complement pointers, so pointer equality
//! is function equality and there is a single terminal node.
//!
//! # Usage constraints
//!
//! Every [`CuddNode`] must be dropped before the adapter that produced it;
//! dropping the adapter calls `Cudd_Quit` and frees the arena the nodes
//! live in. This is a documented caller obligation, not checked at runtime.

use std::os::raw::{c_int, c_uint, c_ulong};

use cudd_sys::cudd::{
    Cudd_AutodynDisable, Cudd_CountMinterm, Cudd_DagSize, Cudd_Init, Cudd_Quit,
    Cudd_ReadCacheHits, Cudd_ReadCacheLookUps, Cudd_ReadGarbageCollections, Cudd_ReadLogicZero,
    Cudd_ReadNodeCount, Cudd_ReadOne, Cudd_RecursiveDeref, Cudd_Ref, Cudd_bddAnd,
    Cudd_bddExistAbstract, Cudd_bddIte, Cudd_bddIthVar, Cudd_bddNand, Cudd_bddOr,
    Cudd_bddUnivAbstract,
};
use cudd_sys::{DdManager, DdNode};
use num_bigint::BigUint;
use num_traits::FromPrimitive;

use crate::budget::{self, Sizing, MIB};
use crate::engine::{Build, Engine, IncrementalBuild, UniversalQuant};
use crate::error::Error;
use crate::stats::{Counter, StatsReport};

const OOM: &str = "cudd: allocation failed after garbage collection";

/// Initial unique-table slots per variable; CUDD grows the subtables on
/// demand, bounded by `maxMemory`.
const INIT_SLOTS_PER_VAR: c_uint = 256;

/// A reference-counted CUDD node handle.
pub struct CuddNode {
    mgr: *mut DdManager,
    node: *mut DdNode,
}

impl Clone for CuddNode {
    fn clone(&self) -> Self {
        unsafe { Cudd_Ref(self.node) };
        CuddNode { mgr: self.mgr, node: self.node }
    }
}

impl Drop for CuddNode {
    fn drop(&mut self) {
        unsafe { Cudd_RecursiveDeref(self.mgr, self.node) };
    }
}

impl PartialEq for CuddNode {
    fn eq(&self, other: &Self) -> bool {
        // Hash consing plus complement pointers: equal functions are equal
        // pointers.
        std::ptr::eq(self.node, other.node)
    }
}

/// CUDD engine adapter.
pub struct Cudd {
    mgr: *mut DdManager,
    sizing: Sizing,
    varcount: usize,
    build: Build<CuddNode>,
}

impl Cudd {
    /// Take ownership of a node returned by a CUDD operation.
    fn claim(&self, raw: *mut DdNode) -> CuddNode {
        assert!(!raw.is_null(), "{}", OOM);
        unsafe { Cudd_Ref(raw) };
        CuddNode { mgr: self.mgr, node: raw }
    }

    /// Conjunction of positive literals, the cube shape CUDD's abstraction
    /// primitives take.
    fn cube(&self, labels: &[usize]) -> CuddNode {
        let mut cube = self.leaf_true();
        for &label in labels {
            let var = self.ithvar(label);
            cube = self.claim(unsafe { Cudd_bddAnd(self.mgr, cube.node, var.node) });
        }
        cube
    }
}

impl Engine for Cudd {
    type Node = CuddNode;

    const NAME: &'static str = "cudd";

    fn new(budget_mb: u64, varcount: usize) -> Result<Self, Error> {
        let sizing = budget::cudd(budget_mb, varcount)?;
        log::debug!(
            "cudd: {} MiB -> {} nodes, {} cache entries, {} bucket bytes",
            budget_mb,
            sizing.table_capacity,
            sizing.cache_capacity,
            sizing.fixed_bytes
        );

        let mgr = unsafe {
            Cudd_Init(
                varcount as c_uint,
                0,
                INIT_SLOTS_PER_VAR,
                sizing.cache_capacity as c_uint,
                (budget_mb * MIB) as c_ulong,
            )
        };
        if mgr.is_null() {
            return Err(Error::OutOfMemory { engine: Self::NAME });
        }
        unsafe { Cudd_AutodynDisable(mgr) };

        Ok(Cudd { mgr, sizing, varcount, build: Build::Empty })
    }

    fn varcount(&self) -> usize {
        self.varcount
    }

    fn leaf_true(&self) -> CuddNode {
        self.claim(unsafe { Cudd_ReadOne(self.mgr) })
    }

    fn leaf_false(&self) -> CuddNode {
        self.claim(unsafe { Cudd_ReadLogicZero(self.mgr) })
    }

    fn ithvar(&self, label: usize) -> CuddNode {
        self.claim(unsafe { Cudd_bddIthVar(self.mgr, label as c_int) })
    }

    fn nithvar(&self, label: usize) -> CuddNode {
        let var = self.ithvar(label);
        self.apply_not(&var)
    }

    fn ite(&self, f: &CuddNode, g: &CuddNode, h: &CuddNode) -> CuddNode {
        self.claim(unsafe { Cudd_bddIte(self.mgr, f.node, g.node, h.node) })
    }

    fn apply_not(&self, f: &CuddNode) -> CuddNode {
        // Negation without touching complement pointers directly.
        self.claim(unsafe { Cudd_bddNand(self.mgr, f.node, f.node) })
    }

    fn apply_and(&self, f: &CuddNode, g: &CuddNode) -> CuddNode {
        self.claim(unsafe { Cudd_bddAnd(self.mgr, f.node, g.node) })
    }

    fn apply_or(&self, f: &CuddNode, g: &CuddNode) -> CuddNode {
        self.claim(unsafe { Cudd_bddOr(self.mgr, f.node, g.node) })
    }

    fn exists_set(&self, f: &CuddNode, labels: &[usize]) -> CuddNode {
        let cube = self.cube(labels);
        self.claim(unsafe { Cudd_bddExistAbstract(self.mgr, f.node, cube.node) })
    }

    fn nodecount(&self, f: &CuddNode) -> usize {
        // DagSize counts the single terminal.
        (unsafe { Cudd_DagSize(f.node) } - 1) as usize
    }

    fn satcount(&self, f: &CuddNode) -> BigUint {
        let count = unsafe { Cudd_CountMinterm(self.mgr, f.node, self.varcount as c_int) };
        // The native count is a double; rounding error for large variable
        // counts is a documented limit of this engine.
        BigUint::from_f64(count.round()).unwrap_or_default()
    }

    fn allocated_nodes(&self) -> Option<usize> {
        Some(unsafe { Cudd_ReadNodeCount(self.mgr) } as usize)
    }

    fn stats(&self) -> StatsReport {
        let (gc, hits, lookups) = unsafe {
            (
                Cudd_ReadGarbageCollections(self.mgr),
                Cudd_ReadCacheHits(self.mgr),
                Cudd_ReadCacheLookUps(self.mgr),
            )
        };
        StatsReport {
            engine: Self::NAME,
            varcount: self.varcount,
            allocated_nodes: self.allocated_nodes(),
            counters: vec![
                Counter::new("node table capacity", self.sizing.table_capacity as u64),
                Counter::new("cache capacity", self.sizing.cache_capacity as u64),
                Counter::new("gc runs", gc as u64),
                Counter::new("cache hits", hits as u64),
                Counter::new("cache lookups", lookups as u64),
            ],
        }
    }
}

impl UniversalQuant for Cudd {
    fn forall_set(&self, f: &CuddNode, labels: &[usize]) -> CuddNode {
        let cube = self.cube(labels);
        self.claim(unsafe { Cudd_bddUnivAbstract(self.mgr, f.node, cube.node) })
    }
}

impl IncrementalBuild for Cudd {
    fn build_slot(&mut self) -> &mut Build<CuddNode> {
        &mut self.build
    }
}

impl Drop for Cudd {
    fn drop(&mut self) {
        unsafe { Cudd_Quit(self.mgr) };
    }
}
