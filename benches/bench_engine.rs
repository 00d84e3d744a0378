use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mayfly::{
    optimizer::{OptimizationLauncher, OptimizationOptions},
    problem::Problem,
    rng::RandomNumberGenerator,
    variants::{
        BareBonesParams, EliteSearchParams, GoldenSineParams, MedianGravityParams,
        OrthogonalChaosParams, RaptorParams, Variant,
    },
};

fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

fn all_variants() -> Vec<Variant> {
    vec![
        Variant::Baseline,
        Variant::EliteSearch(EliteSearchParams::default()),
        Variant::OrthogonalChaos(OrthogonalChaosParams::default()),
        Variant::BareBones(BareBonesParams::default()),
        Variant::GoldenSineAnnealing(GoldenSineParams::default()),
        Variant::MedianGravity(MedianGravityParams::default()),
        Variant::RaptorHybrid(RaptorParams::default()),
    ]
}

fn bench_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("variants");
    let launcher = OptimizationLauncher::new(sphere);

    for variant in all_variants() {
        let name = variant.name();
        let options = OptimizationOptions::new(Problem::new(10, -10.0, 10.0), 50, variant);
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut rng = RandomNumberGenerator::from_seed(42);
                let result = launcher.run(black_box(&options), &mut rng);
                assert!(result.is_ok());
            })
        });
    }
    group.finish();
}

fn bench_dimensions(c: &mut Criterion) {
    let mut group = c.benchmark_group("baseline_dimensions");
    let launcher = OptimizationLauncher::new(sphere);

    for dimensions in [2, 10, 50].iter() {
        let options = OptimizationOptions::new(
            Problem::new(*dimensions, -10.0, 10.0),
            50,
            Variant::Baseline,
        );
        group.bench_with_input(
            BenchmarkId::from_parameter(dimensions),
            &options,
            |b, options| {
                b.iter(|| {
                    let mut rng = RandomNumberGenerator::from_seed(7);
                    launcher.run(black_box(options), &mut rng)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_variants, bench_dimensions);
criterion_main!(benches);
