//! Criterion benchmarks for Web Mercator projection.
//! Focus sizes: n in {1, 10, 100, 1000, 10000} coordinates.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use wktplot::projection::{geographic_to_mercator, geographic_to_mercator_batch};

fn random_coords(n: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (rng.gen_range(-85.0..85.0), rng.gen_range(-180.0..180.0)))
        .unzip()
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("mercator");
    for &n in &[1usize, 10, 100, 1000, 10000] {
        group.bench_with_input(BenchmarkId::new("batch", n), &n, |b, &n| {
            b.iter_batched(
                || random_coords(n, 41),
                |(lat, lng)| {
                    let _xy = geographic_to_mercator_batch(&lat, &lng);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("scalar", n), &n, |b, &n| {
            b.iter_batched(
                || random_coords(n, 41),
                |(lat, lng)| {
                    let _xy: Vec<(f64, f64)> = lat
                        .iter()
                        .zip(&lng)
                        .map(|(&la, &lo)| geographic_to_mercator(la, lo))
                        .collect();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_projection);
criterion_main!(benches);
