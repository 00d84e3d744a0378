//! # OptimizationOptions
//!
//! The `OptimizationOptions` struct holds every setting of a run except the
//! objective and the random number generator: the search box, the movement
//! coefficients, the mating parameters, the velocity bounds, the active variant
//! and the logging level.
//!
//! Options are checked once by [`OptimizationOptions::validate`] before the first
//! evaluation; the launcher calls it for you.
//!
//! ## Example
//!
//! ```rust
//! use mayfly::optimizer::{LogLevel, OptimizationOptions};
//! use mayfly::problem::Problem;
//! use mayfly::variants::{EliteSearchParams, Variant};
//!
//! let options = OptimizationOptions::builder()
//!     .problem(Problem::new(30, -100.0, 100.0))
//!     .max_iterations(500)
//!     .male_population_size(30)
//!     .female_population_size(30)
//!     .variant(Variant::EliteSearch(EliteSearchParams::default()))
//!     .log_level(LogLevel::Minimal)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! assert_eq!(options.get_mating().resolved_mutant_count(30), 2);
//! ```
//!
//! ## LogLevel
//!
//! - `Verbose`: per-iteration progress plus `debug!` details of every sub-population
//!   and hook.
//! - `Minimal`: start, per-iteration best cost and finish at `info!`.
//! - `None`: disables logging.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{MayflyError, Result},
    genetic::MutationOperator,
    movement::Coefficients,
    problem::{Problem, VelocityBounds},
    variants::Variant,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LogLevel {
    Verbose,
    Minimal,
    #[default]
    None,
}

/// Offspring and mutant production.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MatingOptions {
    /// Number of crossover children per iteration (`NC`).
    pub offspring_count: usize,
    /// Number of mutants per iteration (`NM`). `None` means 5% of the males.
    pub mutant_count: Option<usize>,
    /// Fraction of coordinates perturbed by a mutation (`mu`).
    pub mutation_rate: f64,
    pub mutation_operator: MutationOperator,
}

impl MatingOptions {
    /// The mutant count, defaulting to `round(0.05 · males)` with a floor of 1.
    pub fn resolved_mutant_count(&self, male_population_size: usize) -> usize {
        self.mutant_count
            .unwrap_or_else(|| ((0.05 * male_population_size as f64).round() as usize).max(1))
    }
}

impl Default for MatingOptions {
    fn default() -> Self {
        Self {
            offspring_count: 20,
            mutant_count: None,
            mutation_rate: 0.01,
            mutation_operator: MutationOperator::default(),
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationOptions {
    max_iterations: usize,
    male_population_size: usize,
    female_population_size: usize,
    problem: Problem,
    coefficients: Coefficients,
    mating: MatingOptions,
    /// `None` means `±10%` of the search interval.
    velocity_bounds: Option<VelocityBounds>,
    variant: Variant,
    log_level: LogLevel,
    /// Minimum number of seeds for which batch runs go parallel
    parallel_threshold: usize,
}

impl OptimizationOptions {
    pub fn new(problem: Problem, max_iterations: usize, variant: Variant) -> Self {
        Self {
            problem,
            max_iterations,
            variant,
            ..Self::default()
        }
    }

    pub fn get_max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn get_male_population_size(&self) -> usize {
        self.male_population_size
    }

    pub fn get_female_population_size(&self) -> usize {
        self.female_population_size
    }

    pub fn get_problem(&self) -> &Problem {
        &self.problem
    }

    pub fn get_coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    pub fn get_mating(&self) -> &MatingOptions {
        &self.mating
    }

    /// The configured velocity bounds, or `±10%` of the search interval.
    pub fn get_velocity_bounds(&self) -> VelocityBounds {
        self.velocity_bounds
            .unwrap_or_else(|| VelocityBounds::for_problem(&self.problem))
    }

    pub fn get_variant(&self) -> &Variant {
        &self.variant
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }

    /// Returns the minimum number of seeds processed in parallel by batch runs.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    pub fn set_male_population_size(&mut self, size: usize) {
        self.male_population_size = size;
    }

    pub fn set_female_population_size(&mut self, size: usize) {
        self.female_population_size = size;
    }

    pub fn set_problem(&mut self, problem: Problem) {
        self.problem = problem;
    }

    pub fn set_coefficients(&mut self, coefficients: Coefficients) {
        self.coefficients = coefficients;
    }

    pub fn set_mating(&mut self, mating: MatingOptions) {
        self.mating = mating;
    }

    pub fn set_velocity_bounds(&mut self, bounds: Option<VelocityBounds>) {
        self.velocity_bounds = bounds;
    }

    pub fn set_variant(&mut self, variant: Variant) {
        self.variant = variant;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Checks every option before a run.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error naming the first offending option.
    pub fn validate(&self) -> Result<()> {
        if self.problem.dimensions == 0 {
            return Err(MayflyError::Configuration(
                "Problem dimensionality must be greater than 0".to_string(),
            ));
        }
        if !(self.problem.lower_bound.is_finite() && self.problem.upper_bound.is_finite()) {
            return Err(MayflyError::Configuration(
                "Problem bounds must be finite".to_string(),
            ));
        }
        if self.problem.lower_bound >= self.problem.upper_bound {
            return Err(MayflyError::Configuration(format!(
                "Lower bound ({}) must be less than upper bound ({})",
                self.problem.lower_bound, self.problem.upper_bound
            )));
        }
        if self.max_iterations == 0 {
            return Err(MayflyError::Configuration(
                "Maximum iterations cannot be zero".to_string(),
            ));
        }
        if self.male_population_size == 0 || self.female_population_size == 0 {
            return Err(MayflyError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }

        self.validate_coefficients()?;

        let mating = &self.mating;
        if !(0.0..=1.0).contains(&mating.mutation_rate) {
            return Err(MayflyError::Configuration(format!(
                "Mutation rate must be between 0.0 and 1.0, got {}",
                mating.mutation_rate
            )));
        }
        if let MutationOperator::Hybrid { cauchy_probability } = mating.mutation_operator {
            if !(0.0..=1.0).contains(&cauchy_probability) {
                return Err(MayflyError::Configuration(format!(
                    "Cauchy probability must be between 0.0 and 1.0, got {}",
                    cauchy_probability
                )));
            }
        }

        if let Some(bounds) = self.velocity_bounds {
            // Agents start and dance at rest, so zero must be admissible
            if !(bounds.min.is_finite() && bounds.max.is_finite() && bounds.min < bounds.max)
                || bounds.min > 0.0
                || bounds.max < 0.0
            {
                return Err(MayflyError::Configuration(format!(
                    "Velocity bounds must be finite with min < 0 < max, got [{}, {}]",
                    bounds.min, bounds.max
                )));
            }
        }

        self.variant.validate()
    }

    fn validate_coefficients(&self) -> Result<()> {
        let c = &self.coefficients;
        let non_negative = [
            ("g", c.g),
            ("a1", c.a1),
            ("a2", c.a2),
            ("a3", c.a3),
            ("beta", c.beta),
            ("dance", c.dance),
            ("flight", c.flight),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(MayflyError::Configuration(format!(
                    "Coefficient {} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let damping = [
            ("g_damp", c.g_damp),
            ("dance_damp", c.dance_damp),
            ("flight_damp", c.flight_damp),
        ];
        for (name, value) in damping {
            if !(value > 0.0 && value <= 1.0) {
                return Err(MayflyError::Configuration(format!(
                    "Damping ratio {} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Returns a builder for creating an `OptimizationOptions` instance.
    pub fn builder() -> OptimizationOptionsBuilder {
        OptimizationOptionsBuilder::default()
    }
}

impl Default for OptimizationOptions {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            male_population_size: 20,
            female_population_size: 20,
            problem: Problem::default(),
            coefficients: Coefficients::default(),
            mating: MatingOptions::default(),
            velocity_bounds: None,
            variant: Variant::Baseline,
            log_level: LogLevel::None,
            parallel_threshold: 4,
        }
    }
}

/// Builder for `OptimizationOptions`.
///
/// Unset fields take the values of `OptimizationOptions::default()`.
#[derive(Debug, Clone, Default)]
pub struct OptimizationOptionsBuilder {
    max_iterations: Option<usize>,
    male_population_size: Option<usize>,
    female_population_size: Option<usize>,
    problem: Option<Problem>,
    coefficients: Option<Coefficients>,
    mating: Option<MatingOptions>,
    velocity_bounds: Option<VelocityBounds>,
    variant: Option<Variant>,
    log_level: Option<LogLevel>,
    parallel_threshold: Option<usize>,
}

impl OptimizationOptionsBuilder {
    pub fn max_iterations(mut self, value: usize) -> Self {
        self.max_iterations = Some(value);
        self
    }

    pub fn male_population_size(mut self, value: usize) -> Self {
        self.male_population_size = Some(value);
        self
    }

    pub fn female_population_size(mut self, value: usize) -> Self {
        self.female_population_size = Some(value);
        self
    }

    pub fn problem(mut self, value: Problem) -> Self {
        self.problem = Some(value);
        self
    }

    pub fn coefficients(mut self, value: Coefficients) -> Self {
        self.coefficients = Some(value);
        self
    }

    pub fn mating(mut self, value: MatingOptions) -> Self {
        self.mating = Some(value);
        self
    }

    /// Sets explicit velocity bounds.
    pub fn velocity_bounds(mut self, min: f64, max: f64) -> Self {
        self.velocity_bounds = Some(VelocityBounds::new(min, max));
        self
    }

    pub fn variant(mut self, value: Variant) -> Self {
        self.variant = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Sets the parallel threshold.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `OptimizationOptions` instance. Call `validate` before use.
    pub fn build(self) -> OptimizationOptions {
        let defaults = OptimizationOptions::default();
        OptimizationOptions {
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            male_population_size: self
                .male_population_size
                .unwrap_or(defaults.male_population_size),
            female_population_size: self
                .female_population_size
                .unwrap_or(defaults.female_population_size),
            problem: self.problem.unwrap_or(defaults.problem),
            coefficients: self.coefficients.unwrap_or(defaults.coefficients),
            mating: self.mating.unwrap_or(defaults.mating),
            velocity_bounds: self.velocity_bounds,
            variant: self.variant.unwrap_or(defaults.variant),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(defaults.parallel_threshold),
        }
    }
}
