use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use mayfly::{
    objective::Objective,
    optimizer::{OptimizationLauncher, OptimizationOptions},
    problem::Problem,
    rng::RandomNumberGenerator,
    variants::{
        BareBonesParams, EliteSearchParams, GoldenSineParams, GravitySchedule,
        MedianGravityParams, OrthogonalChaosParams, RaptorParams, Variant,
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

fn options_for(variant: Variant, iterations: usize) -> OptimizationOptions {
    OptimizationOptions::builder()
        .problem(Problem::new(5, -5.0, 5.0))
        .max_iterations(iterations)
        .variant(variant)
        .build()
}

#[derive(Clone)]
struct BoundsWatcher {
    problem: Problem,
    violated: Arc<AtomicBool>,
}

impl Objective for BoundsWatcher {
    fn evaluate(&self, position: &[f64]) -> f64 {
        if !self.problem.contains(position) {
            self.violated.store(true, Ordering::SeqCst);
        }
        sphere(position)
    }
}

#[test]
fn test_every_variant_improves_sphere() {
    for variant in all_variants() {
        let name = variant.name();
        let launcher = OptimizationLauncher::new(sphere);
        let mut rng = RandomNumberGenerator::from_seed(2024);
        let result = launcher.run(&options_for(variant, 200), &mut rng).unwrap();

        assert_eq!(result.variant, name);
        assert!(
            result.global_best.cost < 1.0,
            "{} ended at {}",
            name,
            result.global_best.cost
        );
        assert!(
            result.cost_history.windows(2).all(|w| w[1] <= w[0]),
            "{} history increased",
            name
        );
    }
}

#[test]
fn test_every_variant_stays_in_bounds() {
    let problem = Problem::new(3, -2.0, 2.0);
    for variant in all_variants() {
        let watcher = BoundsWatcher {
            problem: problem.clone(),
            violated: Arc::new(AtomicBool::new(false)),
        };
        let options = OptimizationOptions::builder()
            .problem(problem.clone())
            .max_iterations(40)
            .variant(variant.clone())
            .build();

        let launcher = OptimizationLauncher::new(watcher.clone());
        let mut rng = RandomNumberGenerator::from_seed(8);
        let result = launcher.run(&options, &mut rng).unwrap();

        assert!(
            !watcher.violated.load(Ordering::SeqCst),
            "{} evaluated outside the box",
            variant.name()
        );
        assert!(problem.contains(&result.global_best.position));
    }
}

#[test]
fn test_every_variant_is_reproducible() {
    for variant in all_variants() {
        let options = options_for(variant, 30);
        let launcher = OptimizationLauncher::new(sphere);
        let mut rng1 = RandomNumberGenerator::from_seed(77);
        let mut rng2 = RandomNumberGenerator::from_seed(77);
        let first = launcher.run(&options, &mut rng1).unwrap();
        let second = launcher.run(&options, &mut rng2).unwrap();
        assert_eq!(first, second, "{} is not reproducible", first.variant);
    }
}

#[test]
fn test_variants_spend_extra_evaluations() {
    let launcher = OptimizationLauncher::new(sphere);
    let mut rng = RandomNumberGenerator::from_seed(1);
    let baseline = launcher
        .run(&options_for(Variant::Baseline, 20), &mut rng)
        .unwrap();

    let mut rng = RandomNumberGenerator::from_seed(1);
    let elite = launcher
        .run(
            &options_for(Variant::EliteSearch(EliteSearchParams::default()), 20),
            &mut rng,
        )
        .unwrap();

    // Ten trust-region samples per iteration
    assert_eq!(elite.evaluation_count, baseline.evaluation_count + 20 * 10);

    let mut rng = RandomNumberGenerator::from_seed(1);
    let median = launcher
        .run(
            &options_for(Variant::MedianGravity(MedianGravityParams::default()), 20),
            &mut rng,
        )
        .unwrap();
    assert_eq!(median.evaluation_count, baseline.evaluation_count);
}

#[test]
fn test_median_gravity_schedules() {
    for schedule in [
        GravitySchedule::Linear,
        GravitySchedule::Exponential,
        GravitySchedule::Sigmoid,
    ] {
        let variant = Variant::MedianGravity(MedianGravityParams {
            schedule,
            weighted: schedule != GravitySchedule::Linear,
            ..MedianGravityParams::default()
        });
        let launcher = OptimizationLauncher::new(sphere);
        let mut rng = RandomNumberGenerator::from_seed(12);
        let result = launcher.run(&options_for(variant, 50), &mut rng).unwrap();
        assert!(result.global_best.cost.is_finite());
    }
}

#[test]
fn test_only_raptor_reports_a_front() {
    for variant in all_variants() {
        let is_raptor = matches!(variant, Variant::RaptorHybrid(_));
        let launcher = OptimizationLauncher::new(sphere);
        let mut rng = RandomNumberGenerator::from_seed(4);
        let result = launcher.run(&options_for(variant, 10), &mut rng).unwrap();
        assert_eq!(!result.pareto_front.is_empty(), is_raptor);
    }
}

#[test]
fn test_invalid_variant_rejected_by_launcher() {
    let variant = Variant::GoldenSineAnnealing(GoldenSineParams {
        opposition_interval: 0,
        ..GoldenSineParams::default()
    });
    let launcher = OptimizationLauncher::new(sphere);
    let mut rng = RandomNumberGenerator::from_seed(4);
    assert!(launcher.run(&options_for(variant, 10), &mut rng).is_err());
}
