//! Criterion benchmarks for the angle-split solve.
//! Focus sizes: p in {3, 5, 8, 12, 20} with seeded irregular signatures.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use hypertile::hyperbolic::{check_feasible, solve_angle_splits, ReflectionGroupSignature};
use hypertile::SolverCfg;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_feasible_signature(p: usize, seed: u64) -> ReflectionGroupSignature {
    let mut rng = StdRng::seed_from_u64(seed);
    loop {
        let entries: Vec<u32> = (0..p).map(|_| rng.gen_range(3..=12)).collect();
        let Ok(sig) = ReflectionGroupSignature::new(entries) else {
            continue;
        };
        if check_feasible(&sig.angles(), SolverCfg::default().feasibility_margin).is_ok() {
            return sig;
        }
    }
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    let cfg = SolverCfg::default();
    for &p in &[3usize, 5, 8, 12, 20] {
        group.bench_with_input(BenchmarkId::new("irregular", p), &p, |b, &p| {
            b.iter_batched(
                || random_feasible_signature(p, 43).angles(),
                |angles| {
                    let _res = solve_angle_splits(&angles, &cfg);
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("regular", p), &p, |b, &p| {
            let angles = ReflectionGroupSignature::regular(p, 8).unwrap().angles();
            b.iter(|| {
                let _res = solve_angle_splits(&angles, &cfg);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
