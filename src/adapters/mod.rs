//! One adapter per engine.
//!
//! Each adapter binds the [`Engine`](crate::engine::Engine) contract to one
//! concrete library: it owns the engine's initialization and teardown,
//! derives its pool sizes from the megabyte budget, registers the fixed
//! variable ordering, and keeps whatever incremental state the engine needs.
//! Nothing outside this module touches a native engine API.

pub mod libbdd;
pub mod oxidd_bcdd;
pub mod oxidd_bdd;

#[cfg(feature = "cudd")]
pub mod cudd;

pub use libbdd::LibBdd;
pub use oxidd_bcdd::OxiddBcdd;
pub use oxidd_bdd::OxiddBdd;

#[cfg(feature = "cudd")]
pub use cudd::Cudd;
