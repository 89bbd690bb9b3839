//! Benchmarks for `faultline_core` sharding operations.
//!
//! Run with: `cargo bench -p faultline_core`
//!
//! The simple sharder is a per-request operation in the intended usage, so
//! its cost is measured per call over a fixed lattice. The stateful sharder
//! is a control-plane operation; its benchmark measures the first issuance
//! against a fresh history, separated from setup with `iter_batched`.

#![allow(missing_docs)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use faultline_core::{Lattice, StatefulSharder};

mod generators {
    use faultline_core::Lattice;

    /// A fully populated 2-D lattice: `zones × versions` cells of
    /// `per_cell` endpoints each.
    pub(super) fn grid_lattice(zones: usize, versions: usize, per_cell: usize) -> Lattice {
        let mut lattice = Lattice::new(["az", "version"]).expect("two dimensions");
        for zone in 0..zones {
            for version in 0..versions {
                let endpoints = (0..per_cell).map(|i| format!("ep-{zone}-{version}-{i}"));
                lattice
                    .add_endpoints_for_sector([format!("az{zone}"), format!("v{version}")], endpoints)
                    .expect("arity matches");
            }
        }
        lattice
    }
}

fn simple_shuffle_shard(c: &mut Criterion) {
    let lattice = generators::grid_lattice(4, 4, 16);
    let mut group = c.benchmark_group("simple_shuffle_shard");
    group.bench_function("grid_4x4x16", |b| {
        let mut identifier = 0u64;
        b.iter(|| {
            identifier = identifier.wrapping_add(1);
            lattice
                .simple_shuffle_shard(&identifier.to_le_bytes(), 2)
                .expect("fully populated lattice")
        });
    });
    group.finish();
}

fn stateful_shuffle_shard(c: &mut Criterion) {
    let lattice = generators::grid_lattice(2, 2, 10);
    let mut group = c.benchmark_group("stateful_shuffle_shard");
    group.bench_function("grid_2x2x10_first_shard", |b| {
        b.iter_batched(
            || StatefulSharder::with_rng_seed(42),
            |mut sharder| {
                sharder
                    .shuffle_shard(&lattice, 2, 2)
                    .expect("fresh history always admits a shard")
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, simple_shuffle_shard, stateful_shuffle_shard);
criterion_main!(benches);
