//! # Optimizer
//!
//! The driver of a run: [`OptimizationOptions`] configure it, [`SearchContext`]
//! carries the objective, the random number generator and the iteration clock
//! through every stochastic step, and [`OptimizationLauncher`] executes the loop.
//!
//! ## Example
//!
//! ```rust
//! use mayfly::optimizer::{OptimizationLauncher, OptimizationOptions};
//! use mayfly::problem::Problem;
//! use mayfly::rng::RandomNumberGenerator;
//!
//! let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
//! let options = OptimizationOptions::builder()
//!     .problem(Problem::new(5, -10.0, 10.0))
//!     .max_iterations(50)
//!     .build();
//!
//! let launcher = OptimizationLauncher::new(sphere);
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let result = launcher.run(&options, &mut rng).unwrap();
//!
//! assert_eq!(result.cost_history.len(), 50);
//! assert!(result.global_best.cost < 100.0);
//! ```
pub mod context;
pub mod launcher;
pub mod options;

pub use context::SearchContext;
pub use launcher::{OptimizationLauncher, OptimizationResult};
pub use options::{LogLevel, MatingOptions, OptimizationOptions, OptimizationOptionsBuilder};
