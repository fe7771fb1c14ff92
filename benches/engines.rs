//! Engine comparison benchmarks.
//!
//! The same workloads, one group per algorithm, one measurement per engine.
//!
//! Run with:
//! ```bash
//! cargo bench --bench engines
//! ```

use bdd_bench::adapters::{LibBdd, OxiddBcdd, OxiddBdd};
use bdd_bench::engine::Engine;
use bdd_bench::workload;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const BUDGET_MB: u64 = 64;

fn queens<E: Engine>(n: usize) -> E::Node {
    let engine = E::new(BUDGET_MB, n * n).unwrap();
    workload::queens(&engine, n)
}

fn bench_queens(c: &mut Criterion) {
    let n = 6;
    let mut group = c.benchmark_group("queens");
    group.bench_with_input(BenchmarkId::new("oxidd-bdd", n), &n, |b, &n| {
        b.iter(|| queens::<OxiddBdd>(n))
    });
    group.bench_with_input(BenchmarkId::new("oxidd-bcdd", n), &n, |b, &n| {
        b.iter(|| queens::<OxiddBcdd>(n))
    });
    group.bench_with_input(BenchmarkId::new("lib-bdd", n), &n, |b, &n| {
        b.iter(|| queens::<LibBdd>(n))
    });
    group.finish();
}

fn count_queens<E: Engine>(n: usize) -> num_bigint::BigUint {
    let engine = E::new(BUDGET_MB, n * n).unwrap();
    let board = workload::queens(&engine, n);
    engine.satcount(&board)
}

fn bench_satcount(c: &mut Criterion) {
    let n = 6;
    let mut group = c.benchmark_group("queens-satcount");
    group.bench_with_input(BenchmarkId::new("oxidd-bdd", n), &n, |b, &n| {
        b.iter(|| count_queens::<OxiddBdd>(n))
    });
    group.bench_with_input(BenchmarkId::new("lib-bdd", n), &n, |b, &n| {
        b.iter(|| count_queens::<LibBdd>(n))
    });
    group.finish();
}

fn bench_exists_sweep(c: &mut Criterion) {
    let n = 5;
    let mut group = c.benchmark_group("exists-sweep");
    group.bench_function(BenchmarkId::new("oxidd-bdd", n), |b| {
        b.iter(|| {
            let engine = OxiddBdd::new(BUDGET_MB, n * n).unwrap();
            let board = workload::queens(&engine, n);
            workload::eliminate_all(&engine, &board)
        })
    });
    group.bench_function(BenchmarkId::new("lib-bdd", n), |b| {
        b.iter(|| {
            let engine = LibBdd::new(BUDGET_MB, n * n).unwrap();
            let board = workload::queens(&engine, n);
            workload::eliminate_all(&engine, &board)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_queens, bench_satcount, bench_exists_sweep);
criterion_main!(benches);
