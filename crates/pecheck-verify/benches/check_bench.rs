//! Benchmarks for the partial equivalence check
//!
//! Run with: cargo bench -p pecheck-verify

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pecheck_bench::{BenchmarkConfig, GarbageLayout};
use pecheck_dd::Package;
use pecheck_verify::partial_equivalence_check;

/// Benchmark circuits without ancillae (composition with the inverse)
fn bench_zero_ancilla(c: &mut Criterion) {
    let mut group = c.benchmark_group("zero_ancilla");

    for n in [4_u32, 6, 8] {
        let (a, b) = BenchmarkConfig::new(n, n, n / 2).generate().unwrap();
        group.bench_with_input(BenchmarkId::new("qubits", n), &(a, b), |bench, (a, b)| {
            bench.iter(|| {
                let mut package = Package::default();
                partial_equivalence_check(black_box(a.clone()), black_box(b.clone()), &mut package)
                    .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark circuits with ancillae (alignment plus channel comparison)
fn bench_with_ancillae(c: &mut Criterion) {
    let mut group = c.benchmark_group("with_ancillae");

    for (n, d, m) in [(4_u32, 2_u32, 2_u32), (6, 4, 2), (8, 5, 3), (10, 9, 2), (12, 11, 4)] {
        let (a, b) = BenchmarkConfig::new(n, d, m)
            .with_layout(GarbageLayout::Leading)
            .generate()
            .unwrap();
        group.bench_with_input(
            BenchmarkId::new("n_d_m", format!("{n}_{d}_{m}")),
            &(a, b),
            |bench, (a, b)| {
                bench.iter(|| {
                    let mut package = Package::default();
                    partial_equivalence_check(
                        black_box(a.clone()),
                        black_box(b.clone()),
                        &mut package,
                    )
                    .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_zero_ancilla, bench_with_ancillae);
criterion_main!(benches);
