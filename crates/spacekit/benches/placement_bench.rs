//! Criterion benchmarks for rejection-sampling placement.
//! Fill ratio = shape area / bound area in {0.05, 0.25, 0.5}; seeds come from replay tokens.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector2;
use spacekit::geom2::rand::ReplayToken;
use spacekit::geom2::Compass;
use spacekit::{Space, Spacer};

fn square(side: f64) -> Space {
    let mut s = Space::default();
    s.make_box(Vector2::zeros(), side, side).unwrap();
    s
}

fn bench_placement(c: &mut Criterion) {
    let mut site = Space::default();
    site.make_cross(Vector2::zeros(), 100.0, 100.0, Default::default())
        .unwrap();
    let spacer = Spacer::new();
    let mut group = c.benchmark_group("placement");
    for &fill in &[0.05f64, 0.25, 0.5] {
        let side = (site.area() * fill).sqrt();
        let mut tok = ReplayToken::new(2025, 0);
        group.bench_with_input(BenchmarkId::new("place_within", fill), &side, |b, &side| {
            b.iter_batched(
                || {
                    tok = tok.next();
                    (square(side), tok.to_std_rng())
                },
                |(mut shape, mut rng)| spacer.place_within_rng(&mut shape, &site, &mut rng),
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("place_within_line", fill), &side, |b, &side| {
            b.iter_batched(
                || {
                    tok = tok.next();
                    (square(side), tok.to_std_rng())
                },
                |(mut shape, mut rng)| {
                    spacer.place_within_line_rng(&mut shape, &site, Compass::N, &mut rng)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_placement);
criterion_main!(benches);
