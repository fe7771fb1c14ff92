//! The capability contract every engine adapter implements.
//!
//! Benchmark algorithms are written once, generically over [`Engine`], and
//! monomorphized per adapter: dispatch happens at compile time, so the hot
//! BDD operations pay no virtual-call overhead and an engine that lacks a
//! capability simply does not implement the corresponding extension trait.
//! Callers cannot invoke universal quantification on an engine without it;
//! the program does not compile.
//!
//! # Node handles
//!
//! [`Engine::Node`] is an opaque, engine-specific handle into a decision
//! diagram owned by the engine. Handles are cheap to clone, compare equal
//! exactly when the engine considers the underlying functions identical
//! (hash consing makes this structural), and stay valid for as long as the
//! adapter is alive. Physical node lifetime is managed by the engine's own
//! garbage collection; adapters never reimplement it.
//!
//! # Variable labels
//!
//! Variables are zero-based `usize` labels into an ordering fixed at
//! construction. Passing a label `>= varcount()` is delegated to the
//! engine's own bounds behavior (typically a panic); adapters neither wrap
//! out-of-range labels nor add a second, possibly disagreeing bounds check.
//!
//! # Concurrency
//!
//! Adapters are synchronous: every operation issues one logical native call
//! and blocks until it returns. Engines that parallelize internally through
//! worker pools do so transparently behind that call; nothing here is
//! asynchronous or cancellable.
//!
//! # Lifecycle
//!
//! An adapter is constructed with [`Engine::new`] and torn down by `Drop`,
//! which releases native engine resources exactly once. All operations
//! require a live adapter, which the borrow checker enforces. Engines whose
//! native library keeps process-wide state additionally require that at most
//! one adapter instance is alive at a time; that constraint is documented on
//! the adapter and owned by the caller.

use std::io;
use std::mem;

use num_bigint::BigUint;

use crate::error::Error;
use crate::stats::StatsReport;

/// A BDD engine presented through the uniform capability contract.
///
/// Operations that allocate nodes (`ite`, `apply_*`, quantification) panic
/// if the engine exhausts its configured pools even after garbage
/// collection; a benchmark run that outgrows its budget is not recoverable.
pub trait Engine: Sized {
    /// Opaque node handle; equality is the engine's canonical identity.
    type Node: Clone + PartialEq;

    /// Name under which the driver selects this adapter.
    const NAME: &'static str;

    /// Construct the adapter with `budget_mb` MiB of native memory and a
    /// fixed ordering of `varcount` variables.
    ///
    /// Sizing is derived by the engine's calculator in [`crate::budget`];
    /// a budget too small for a usable table fails with
    /// [`Error::InsufficientBudget`]. Automatic variable reordering is
    /// disabled here for every engine that has it, so node identity stays
    /// stable for the adapter's lifetime.
    fn new(budget_mb: u64, varcount: usize) -> Result<Self, Error>;

    /// Number of variables in the fixed ordering.
    fn varcount(&self) -> usize;

    /// The true terminal.
    fn leaf_true(&self) -> Self::Node;

    /// The false terminal.
    fn leaf_false(&self) -> Self::Node;

    /// The positive literal for `label`.
    fn ithvar(&self, label: usize) -> Self::Node;

    /// The negative literal for `label`.
    fn nithvar(&self, label: usize) -> Self::Node;

    /// If-then-else: `(f ∧ g) ∨ (¬f ∧ h)`, canonical per the engine's
    /// representation.
    fn ite(&self, f: &Self::Node, g: &Self::Node, h: &Self::Node) -> Self::Node;

    /// Negation. The default goes through [`Engine::ite`]; adapters override
    /// it with the engine's native operation.
    fn apply_not(&self, f: &Self::Node) -> Self::Node {
        self.ite(f, &self.leaf_false(), &self.leaf_true())
    }

    /// Conjunction, `ite(f, g, ⊥)` by default.
    fn apply_and(&self, f: &Self::Node, g: &Self::Node) -> Self::Node {
        self.ite(f, g, &self.leaf_false())
    }

    /// Disjunction, `ite(f, ⊤, g)` by default.
    fn apply_or(&self, f: &Self::Node, g: &Self::Node) -> Self::Node {
        self.ite(f, &self.leaf_true(), g)
    }

    /// Existentially quantify every label in `labels` out of `f`.
    ///
    /// This is the engine primitive behind all quantification shapes: the
    /// labels are registered with the engine in the given order, but the
    /// result is a set-wise projection and does not depend on that order.
    fn exists_set(&self, f: &Self::Node, labels: &[usize]) -> Self::Node;

    /// Existentially quantify a single variable.
    fn exists(&self, f: &Self::Node, label: usize) -> Self::Node {
        self.exists_set(f, &[label])
    }

    /// Existentially quantify every label in `[0, varcount)` accepted by
    /// `pred`, scanned in increasing order.
    ///
    /// The scan always costs O(varcount); callers that already hold a small
    /// label set should prefer [`Engine::exists_set`].
    fn exists_where(&self, f: &Self::Node, pred: impl Fn(usize) -> bool) -> Self::Node {
        let labels: Vec<usize> = (0..self.varcount()).filter(|&v| pred(v)).collect();
        self.exists_set(f, &labels)
    }

    /// Number of internal (non-terminal) nodes reachable from `f`.
    ///
    /// Engines whose native count includes terminals subtract them, so every
    /// adapter reports the same semantic quantity.
    fn nodecount(&self, f: &Self::Node) -> usize;

    /// Number of satisfying assignments of `f` over the declared variable
    /// count.
    ///
    /// Engines exposing a floating-point count scale and round it; the
    /// resulting precision loss for very large variable counts is a
    /// documented limit of those adapters, not corrected here.
    fn satcount(&self, f: &Self::Node) -> BigUint;

    /// Live count of nodes currently resident in the engine's shared table,
    /// or `None` for engines without one.
    fn allocated_nodes(&self) -> Option<usize>;

    /// Engine-internal counters in the uniform report shape.
    ///
    /// Counters the engine cannot report are included as unavailable rather
    /// than silently omitted.
    fn stats(&self) -> StatsReport;

    /// Print the statistics report; never fails the caller.
    fn print_stats(&self) {
        println!("{}", self.stats());
    }

    /// Best-effort DOT export of `f`.
    ///
    /// The default reports [`Error::Unsupported`]; adapters with a native
    /// dump override it. There is no compatibility contract on the output.
    fn export_dot(&self, _f: &Self::Node, _w: &mut dyn io::Write) -> Result<(), Error> {
        Err(Error::Unsupported { engine: Self::NAME, what: "DOT export" })
    }
}

/// Universal quantification, offered only by adapters whose engine supports
/// it natively.
///
/// Emulating `forall` on top of `exists` and complementation would hide a
/// performance cliff from benchmark results, so engines without the native
/// operation simply do not implement this trait and the gap surfaces at
/// compile time.
pub trait UniversalQuant: Engine {
    /// Universally quantify every label in `labels` out of `f`.
    fn forall_set(&self, f: &Self::Node, labels: &[usize]) -> Self::Node;

    /// Universally quantify a single variable.
    fn forall(&self, f: &Self::Node, label: usize) -> Self::Node {
        self.forall_set(f, &[label])
    }

    /// Universally quantify every label accepted by `pred`; O(varcount).
    fn forall_where(&self, f: &Self::Node, pred: impl Fn(usize) -> bool) -> Self::Node {
        let labels: Vec<usize> = (0..self.varcount()).filter(|&v| pred(v)).collect();
        self.forall_set(f, &labels)
    }
}

/// State of the incremental build slot: either nothing has been built since
/// the last finalize, or the most recently built node is pending.
#[derive(Debug, Clone, Default)]
pub enum Build<N> {
    #[default]
    Empty,
    Pending(N),
}

/// Caller-driven bottom-up construction for engines that assemble diagrams
/// through pairwise combinators.
///
/// Each `build_*` call creates a node and remembers it in the adapter's
/// single build slot; [`IncrementalBuild::build`] finalizes by returning the
/// slot's content and resetting it, so a finalized build cannot be obtained
/// again without an intervening `build_*` call. Finalizing with nothing
/// pending yields the false leaf. At most one build may be in flight per
/// adapter; interleaving two is a caller error that adapters do not detect.
pub trait IncrementalBuild: Engine {
    /// The adapter's build slot. An implementation detail for adapters;
    /// benchmark code should only use the `build_*` methods.
    fn build_slot(&mut self) -> &mut Build<Self::Node>;

    /// Build a terminal and remember it.
    fn build_leaf(&mut self, value: bool) -> Self::Node {
        let leaf = if value { self.leaf_true() } else { self.leaf_false() };
        *self.build_slot() = Build::Pending(leaf.clone());
        leaf
    }

    /// Build the internal node `ite(ithvar(label), high, low)` and remember
    /// it.
    fn build_node(&mut self, label: usize, low: &Self::Node, high: &Self::Node) -> Self::Node {
        let var = self.ithvar(label);
        let node = self.ite(&var, high, low);
        *self.build_slot() = Build::Pending(node.clone());
        node
    }

    /// Finalize: return the pending node and reset the slot.
    fn build(&mut self) -> Self::Node {
        match mem::replace(self.build_slot(), Build::Empty) {
            Build::Pending(node) => node,
            Build::Empty => self.leaf_false(),
        }
    }
}
