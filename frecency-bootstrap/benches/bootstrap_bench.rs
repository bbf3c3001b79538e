use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use frecency_bootstrap::WeightedBootstrap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use test_fixtures::{after, fixed_now};

fn populated(n: usize) -> WeightedBootstrap<usize> {
    let now = fixed_now();
    let mut b = WeightedBootstrap::new(3600.0).unwrap();
    for i in 0..n {
        b.add_sample_at(i, 1.0 + (i % 7) as f64, after(now, i as f64))
            .unwrap();
    }
    b
}

fn bench_draws(c: &mut Criterion) {
    let mut group = c.benchmark_group("bootstrap_draws");
    for &n in &[100usize, 10_000, 1_000_000] {
        let b = populated(n);
        group.bench_with_input(BenchmarkId::new("single_x1000", n), &b, |bench, b| {
            let mut rng = StdRng::seed_from_u64(1);
            bench.iter(|| {
                for _ in 0..1000 {
                    black_box(b.sample_with(&mut rng).unwrap());
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("batched_1000", n), &b, |bench, b| {
            let mut rng = StdRng::seed_from_u64(1);
            bench.iter(|| black_box(b.samples_with(1000, &mut rng).unwrap()))
        });
    }
    group.finish();
}

fn bench_add(c: &mut Criterion) {
    c.bench_function("bootstrap_add_10k", |bench| {
        bench.iter(|| black_box(populated(10_000)))
    });
}

criterion_group!(benches, bench_draws, bench_add);
criterion_main!(benches);
