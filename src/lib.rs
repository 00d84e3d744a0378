//! # mayfly
//!
//! A population-based metaheuristic that minimizes a black-box objective over a
//! box-bounded real vector space. Two sub-populations evolve side by side: males
//! move under inertia and attraction toward their personal best and the global
//! best, females are attracted by the male of equal rank, and both are refreshed
//! by crossover, mutation and (μ+λ) truncation selection every iteration.
//!
//! On top of that loop one [`Variant`] may be active. Each variant hooks into the
//! loop at fixed points through the [`VariantStrategy`] trait instead of
//! duplicating it.
//!
//! ```rust
//! use mayfly::{OptimizationLauncher, OptimizationOptions, Problem, RandomNumberGenerator};
//! use mayfly::variants::{MedianGravityParams, Variant};
//!
//! let rastrigin = |x: &[f64]| {
//!     x.iter()
//!         .map(|v| v * v - 10.0 * (2.0 * std::f64::consts::PI * v).cos() + 10.0)
//!         .sum::<f64>()
//! };
//!
//! let options = OptimizationOptions::builder()
//!     .problem(Problem::new(4, -5.12, 5.12))
//!     .max_iterations(100)
//!     .variant(Variant::MedianGravity(MedianGravityParams::default()))
//!     .build();
//!
//! let launcher = OptimizationLauncher::new(rastrigin);
//! let mut rng = RandomNumberGenerator::from_seed(2024);
//! let result = launcher.run(&options, &mut rng)?;
//!
//! assert_eq!(result.variant, "median-gravity");
//! assert!(result.cost_history.windows(2).all(|w| w[1] <= w[0]));
//! # Ok::<(), mayfly::MayflyError>(())
//! ```
pub mod agent;
pub mod caching;
pub mod error;
pub mod genetic;
pub mod movement;
pub mod objective;
pub mod optimizer;
pub mod pareto;
pub mod population;
pub mod problem;
pub mod rng;
pub mod sampling;
pub mod selection;
pub mod variants;

// Re-export commonly used types for convenience
pub use agent::{Agent, GlobalBest, Solution};
pub use caching::{CachedObjective, CachingObjective, ThreadLocalCachedObjective};
pub use error::{MayflyError, OptionExt, Result};
pub use movement::{Coefficients, MovementEngine};
pub use objective::{Objective, WeightedSum};
pub use optimizer::{
    LogLevel, MatingOptions, OptimizationLauncher, OptimizationOptions, OptimizationResult,
};
pub use pareto::{ParetoArchive, ParetoSolution};
pub use population::Population;
pub use problem::{Problem, VelocityBounds};
pub use rng::RandomNumberGenerator;
pub use variants::{Variant, VariantStrategy};
