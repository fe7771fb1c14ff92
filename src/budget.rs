//! Memory sizing: mapping a megabyte budget to engine pool capacities.
//!
//! Every engine partitions its memory between a node (unique) table and an
//! operation cache, but each has its own record sizes and its own preferred
//! cache-to-table ratio. The calculators here are pure functions from a
//! budget (and, for engines with per-variable subtables, a variable count)
//! to integer capacities. They guarantee that the derived pools never exceed
//! the budget, and they fail with [`Error::InsufficientBudget`] instead of
//! handing an engine a degenerate table.
//!
//! Two shapes cover all supported engines:
//!
//! - **Flat split** ([`flat_split`]): the engine allocates one big node pool
//!   and one cache, with no per-variable overhead. A calibrated nodes-per-MiB
//!   constant converts the budget into a total slot count, which is then
//!   divided `R : 1` between table and cache.
//! - **Subtable solve** ([`subtable_solve`]): the engine keeps a bucket
//!   structure per declared variable, so the fixed bucket bytes are deducted
//!   first and the remainder is solved for node and cache-entry counts with
//!   the ratio as the second equation. Declaring more variables genuinely
//!   shrinks the table, and a budget that cannot even hold the buckets is an
//!   error, not a zero-capacity table.

use crate::error::Error;

/// Bytes per MiB.
pub const MIB: u64 = 1024 * 1024;

const I32_MAX: u64 = i32::MAX as u64;

/// Derived pool sizes for one engine instance.
///
/// Invariant: `table_bytes + cache_bytes + fixed_bytes <= budget_mb * MIB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sizing {
    /// The budget the sizes were derived from.
    pub budget_mb: u64,
    /// Node table capacity, in nodes.
    pub table_capacity: usize,
    /// Operation cache capacity, in entries.
    pub cache_capacity: usize,
    /// Native bytes consumed by the node table.
    pub table_bytes: u64,
    /// Native bytes consumed by the operation cache.
    pub cache_bytes: u64,
    /// Native bytes consumed before any node is allocated (per-variable
    /// buckets); zero for flat engines.
    pub fixed_bytes: u64,
}

impl Sizing {
    /// Total native bytes accounted for by this sizing.
    pub fn total_bytes(&self) -> u64 {
        self.table_bytes + self.cache_bytes + self.fixed_bytes
    }
}

/// Split a budget into node and cache capacities for engines without
/// per-variable subtables.
///
/// `nodes_per_mb` is the engine's calibrated slot density; `ratio` is the
/// target node-to-cache-entry ratio `R`, giving the table `R/(R+1)` of the
/// slots and the cache the rest. Both capacities are clamped to `i32::MAX`;
/// when the table clamps, the cache is re-derived as `i32::MAX / R` so the
/// ratio survives approximately.
pub fn flat_split(
    engine: &'static str,
    budget_mb: u64,
    nodes_per_mb: u64,
    node_bytes: u64,
    cache_entry_bytes: u64,
    ratio: u64,
) -> Result<Sizing, Error> {
    let total = budget_mb * nodes_per_mb;
    if total == 0 {
        return Err(Error::InsufficientBudget { engine, budget_mb, varcount: None });
    }

    let mut table = total * ratio / (ratio + 1);
    let cache;
    if table > I32_MAX {
        table = I32_MAX;
        cache = I32_MAX / ratio;
    } else {
        cache = total / (ratio + 1);
    }
    if table == 0 || cache == 0 {
        return Err(Error::InsufficientBudget { engine, budget_mb, varcount: None });
    }

    Ok(Sizing {
        budget_mb,
        table_capacity: table as usize,
        cache_capacity: cache as usize,
        table_bytes: table * node_bytes,
        cache_bytes: cache * cache_entry_bytes,
        fixed_bytes: 0,
    })
}

/// Solve node and cache capacities for engines with per-variable subtables.
///
/// The `varcount * subtable_bytes` fixed cost comes off the budget first;
/// the remainder satisfies `node_bytes * x + cache_entry_bytes * y = rest`
/// with `x = ratio * y`, solved in integers.
pub fn subtable_solve(
    engine: &'static str,
    budget_mb: u64,
    varcount: usize,
    node_bytes: u64,
    subtable_bytes: u64,
    cache_entry_bytes: u64,
    ratio: u64,
) -> Result<Sizing, Error> {
    let budget_bytes = budget_mb * MIB;
    let fixed = varcount as u64 * subtable_bytes;
    if fixed >= budget_bytes {
        return Err(Error::InsufficientBudget { engine, budget_mb, varcount: Some(varcount) });
    }

    let remaining = budget_bytes - fixed;
    let mut cache = remaining / (node_bytes * ratio + cache_entry_bytes);
    let mut table = cache * ratio;
    if table > I32_MAX {
        table = I32_MAX;
        cache = I32_MAX / ratio;
    }
    if table == 0 || cache == 0 {
        return Err(Error::InsufficientBudget { engine, budget_mb, varcount: Some(varcount) });
    }

    Ok(Sizing {
        budget_mb,
        table_capacity: table as usize,
        cache_capacity: cache as usize,
        table_bytes: table * node_bytes,
        cache_bytes: cache * cache_entry_bytes,
        fixed_bytes: fixed,
    })
}

// Calibrated record sizes. The oxidd figures cover the index-based manager:
// a 16-byte inner node plus the unique table slot, and a 32-byte apply cache
// entry. The CUDD figures match sizeof(DdNode), sizeof(DdSubtable) and
// sizeof(DdCache) on 64-bit platforms.
const OXIDD_NODES_PER_MB: u64 = 32 * 1024;
const OXIDD_NODE_BYTES: u64 = 24;
const OXIDD_CACHE_ENTRY_BYTES: u64 = 32;
const OXIDD_RATIO: u64 = 64;

const CUDD_NODE_BYTES: u64 = 32;
const CUDD_SUBTABLE_BYTES: u64 = 64;
const CUDD_CACHE_ENTRY_BYTES: u64 = 48;
const CUDD_RATIO: u64 = 4;

/// Sizing for the oxidd engine family (plain and complement-edge BDDs).
///
/// Nodes outnumber cache entries 64:1.
pub fn oxidd(budget_mb: u64) -> Result<Sizing, Error> {
    flat_split(
        "oxidd",
        budget_mb,
        OXIDD_NODES_PER_MB,
        OXIDD_NODE_BYTES,
        OXIDD_CACHE_ENTRY_BYTES,
        OXIDD_RATIO,
    )
}

/// Sizing for CUDD, which keeps one subtable bucket per declared variable.
///
/// Nodes outnumber cache entries 4:1.
pub fn cudd(budget_mb: u64, varcount: usize) -> Result<Sizing, Error> {
    subtable_solve(
        "cudd",
        budget_mb,
        varcount,
        CUDD_NODE_BYTES,
        CUDD_SUBTABLE_BYTES,
        CUDD_CACHE_ENTRY_BYTES,
        CUDD_RATIO,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oxidd_never_over_budget() {
        for mb in [1, 2, 3, 7, 8, 64, 100, 1024, 4096, 65536, 1 << 20] {
            let s = oxidd(mb).unwrap();
            assert!(
                s.total_bytes() <= mb * MIB,
                "oxidd sizing for {} MiB uses {} bytes",
                mb,
                s.total_bytes()
            );
        }
    }

    #[test]
    fn cudd_never_over_budget() {
        for mb in [1, 8, 64, 1024, 65536] {
            for vars in [1, 16, 256, 4096] {
                let s = cudd(mb, vars).unwrap();
                assert!(s.total_bytes() <= mb * MIB);
                assert_eq!(s.fixed_bytes, vars as u64 * CUDD_SUBTABLE_BYTES);
            }
        }
    }

    #[test]
    fn oxidd_ratio_is_64_to_1() {
        let s = oxidd(128).unwrap();
        let ratio = s.table_capacity / s.cache_capacity;
        // Integer truncation allows one slot of slack around the target.
        assert!((63..=65).contains(&ratio), "ratio was {}", ratio);
    }

    #[test]
    fn oxidd_clamps_to_i32() {
        // Large enough that the unclamped table would exceed i32::MAX slots.
        let s = oxidd(1 << 20).unwrap();
        assert_eq!(s.table_capacity, i32::MAX as usize);
        assert_eq!(s.cache_capacity, (i32::MAX / 64) as usize);
    }

    #[test]
    fn oxidd_zero_budget_fails() {
        assert!(matches!(oxidd(0), Err(Error::InsufficientBudget { .. })));
    }

    #[test]
    fn cudd_more_variables_means_fewer_nodes() {
        let few = cudd(8, 16).unwrap();
        let many = cudd(8, 4096).unwrap();
        assert!(many.table_capacity <= few.table_capacity);
    }

    #[test]
    fn cudd_bucket_overflow_is_an_error() {
        // 1 MiB holds 16384 buckets of 64 bytes; 20000 variables cannot fit
        // before a single node is allocated.
        let res = cudd(1, 20_000);
        assert!(matches!(res, Err(Error::InsufficientBudget { varcount: Some(20_000), .. })));
    }

    #[test]
    fn cudd_ratio_is_4_to_1() {
        let s = cudd(64, 32).unwrap();
        assert_eq!(s.table_capacity, s.cache_capacity * 4);
    }
}
