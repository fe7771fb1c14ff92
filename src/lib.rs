//! # bdd-bench: one benchmark, many BDD engines
//!
//! **`bdd-bench`** runs identical symbolic algorithms, unmodified, against
//! several independent Binary Decision Diagram (BDD) engines. Each engine
//! has its own node representation, memory-sizing rules, quantification API,
//! and build conventions; this crate hides those differences behind a
//! single capability contract without giving up engine-appropriate
//! performance.
//!
//! ## How it fits together
//!
//! - **[`engine`]**: the capability contract. Algorithms are written once,
//!   generically over [`engine::Engine`], and dispatched at compile time to
//!   whichever adapter is selected. Capabilities an engine lacks (such as
//!   native universal quantification) are separate traits, so asking the
//!   wrong engine for them is a compile error, not a runtime surprise.
//! - **[`budget`]**: pure calculators that turn a single megabyte budget
//!   (and, where the engine needs it, the variable count) into node-table
//!   and operation-cache capacities, honoring each engine's record sizes
//!   and cache-to-table ratio, and never exceeding the budget.
//! - **[`adapters`]**: one adapter per engine, owning the native lifecycle
//!   and translating each contract call into native calls. The engines
//!   themselves stay black boxes.
//! - **[`workload`]**: the benchmark algorithms (clause conjunction,
//!   N-Queens, quantifier sweeps) consumed by the driver binary, the tests,
//!   and the criterion benches.
//!
//! ## Basic usage
//!
//! ```rust
//! use bdd_bench::adapters::LibBdd;
//! use bdd_bench::engine::Engine;
//!
//! // 8 MiB budget, 3 variables.
//! let engine = LibBdd::new(8, 3).unwrap();
//!
//! // x0 ∨ ¬x1
//! let clause = engine.apply_or(&engine.ithvar(0), &engine.nithvar(1));
//!
//! // 6 of the 8 assignments satisfy it, through 2 decision nodes.
//! assert_eq!(engine.satcount(&clause), 6u32.into());
//! assert_eq!(engine.nodecount(&clause), 2);
//! ```
//!
//! The same code runs against any other adapter by swapping the type.

pub mod adapters;
pub mod budget;
pub mod engine;
pub mod error;
pub mod stats;
pub mod workload;
