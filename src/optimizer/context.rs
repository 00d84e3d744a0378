use crate::{
    error::{ensure_dimensions, MayflyError, Result},
    objective::Objective,
    problem::Problem,
    rng::RandomNumberGenerator,
};

use super::options::LogLevel;

/// Everything a stochastic step of one run may touch besides the population:
/// the objective, the search box, the run's random number generator and the
/// iteration clock.
///
/// All objective evaluations of a run go through [`SearchContext::evaluate`], so
/// the evaluation count in the result is exact.
pub struct SearchContext<'a> {
    objective: &'a dyn Objective,
    problem: &'a Problem,
    rng: &'a mut RandomNumberGenerator,
    log_level: LogLevel,
    evaluations: usize,
    iteration: usize,
    max_iterations: usize,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        objective: &'a dyn Objective,
        problem: &'a Problem,
        rng: &'a mut RandomNumberGenerator,
        max_iterations: usize,
        log_level: LogLevel,
    ) -> Self {
        Self {
            objective,
            problem,
            rng,
            log_level,
            evaluations: 0,
            iteration: 0,
            max_iterations,
        }
    }

    /// Evaluates `position` and counts the evaluation.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` for a position of the wrong length and
    /// `InvalidNumericValue` if the objective returns NaN.
    pub fn evaluate(&mut self, position: &[f64]) -> Result<f64> {
        ensure_dimensions(self.problem.dimensions, position.len())?;
        let cost = self.objective.evaluate(position);
        self.evaluations += 1;
        if cost.is_nan() {
            return Err(MayflyError::InvalidNumericValue(format!(
                "Objective returned NaN at iteration {}",
                self.iteration
            )));
        }
        Ok(cost)
    }

    /// The objective vector of an already evaluated position.
    ///
    /// Single-objective problems reuse `cost` without another evaluation.
    pub fn objective_values(&mut self, position: &[f64], cost: f64) -> Vec<f64> {
        if self.objective.objective_count() == 1 {
            return vec![cost];
        }
        self.evaluations += 1;
        self.objective.evaluate_objectives(position)
    }

    pub fn problem(&self) -> &'a Problem {
        self.problem
    }

    pub fn rng(&mut self) -> &mut RandomNumberGenerator {
        &mut *self.rng
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Zero-based index of the current iteration.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Fraction of the run completed: `0.0` in the first iteration, `1.0` in the last.
    pub fn progress(&self) -> f64 {
        if self.max_iterations <= 1 {
            return 1.0;
        }
        (self.iteration as f64 / (self.max_iterations - 1) as f64).min(1.0)
    }

    pub fn log_level(&self) -> &LogLevel {
        &self.log_level
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self.log_level, LogLevel::Verbose)
    }

    pub(crate) fn set_iteration(&mut self, iteration: usize) {
        self.iteration = iteration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_evaluations() {
        let problem = Problem::new(2, -1.0, 1.0);
        let objective = |x: &[f64]| x[0] + x[1];
        let mut rng = RandomNumberGenerator::from_seed(1);
        let mut ctx = SearchContext::new(&objective, &problem, &mut rng, 10, LogLevel::None);

        assert_eq!(ctx.evaluate(&[0.5, 0.25]).unwrap(), 0.75);
        assert_eq!(ctx.objective_values(&[0.5, 0.25], 0.75), vec![0.75]);
        assert_eq!(ctx.evaluations(), 1);
    }

    #[test]
    fn test_nan_is_rejected() {
        let problem = Problem::new(1, -1.0, 1.0);
        let objective = |_: &[f64]| f64::NAN;
        let mut rng = RandomNumberGenerator::from_seed(1);
        let mut ctx = SearchContext::new(&objective, &problem, &mut rng, 10, LogLevel::None);

        assert!(matches!(
            ctx.evaluate(&[0.0]),
            Err(MayflyError::InvalidNumericValue(_))
        ));
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        let problem = Problem::new(3, -1.0, 1.0);
        let objective = |_: &[f64]| 0.0;
        let mut rng = RandomNumberGenerator::from_seed(1);
        let mut ctx = SearchContext::new(&objective, &problem, &mut rng, 10, LogLevel::None);

        assert!(ctx.evaluate(&[0.0]).is_err());
        assert_eq!(ctx.evaluations(), 0);
    }

    #[test]
    fn test_progress() {
        let problem = Problem::new(1, -1.0, 1.0);
        let objective = |_: &[f64]| 0.0;
        let mut rng = RandomNumberGenerator::from_seed(1);
        let mut ctx = SearchContext::new(&objective, &problem, &mut rng, 5, LogLevel::None);

        assert_eq!(ctx.progress(), 0.0);
        ctx.set_iteration(2);
        assert_eq!(ctx.progress(), 0.5);
        ctx.set_iteration(4);
        assert_eq!(ctx.progress(), 1.0);
    }
}
