//! # Problem
//!
//! The search space: dimensionality plus a scalar lower and upper bound shared by
//! every coordinate, and the velocity limits applied to moving agents.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::rng::RandomNumberGenerator;

/// The box `[lower_bound, upper_bound]^dimensions`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub dimensions: usize,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl Problem {
    pub fn new(dimensions: usize, lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            dimensions,
            lower_bound,
            upper_bound,
        }
    }

    /// Width of the search interval.
    pub fn range(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower_bound, self.upper_bound)
    }

    /// Clamps every coordinate of `position` into the bounds.
    pub fn clamp_position(&self, position: &mut [f64]) {
        for x in position.iter_mut() {
            *x = self.clamp(*x);
        }
    }

    pub fn contains(&self, position: &[f64]) -> bool {
        position
            .iter()
            .all(|x| (self.lower_bound..=self.upper_bound).contains(x))
    }

    /// Draws a position uniformly from the box.
    pub fn random_position(&self, rng: &mut RandomNumberGenerator) -> Vec<f64> {
        rng.fetch_uniform(self.lower_bound, self.upper_bound, self.dimensions)
    }

    /// The opposition point `lower + upper - x`.
    pub fn opposition(&self, position: &[f64]) -> Vec<f64> {
        position
            .iter()
            .map(|x| self.clamp(self.lower_bound + self.upper_bound - x))
            .collect()
    }
}

impl Default for Problem {
    fn default() -> Self {
        Self::new(10, -10.0, 10.0)
    }
}

/// Component-wise limits on velocities.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityBounds {
    pub min: f64,
    pub max: f64,
}

impl VelocityBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `±10%` of the search interval.
    pub fn for_problem(problem: &Problem) -> Self {
        let max = 0.1 * problem.range();
        Self { min: -max, max }
    }

    pub fn clamp_velocity(&self, velocity: &mut [f64]) {
        for v in velocity.iter_mut() {
            *v = v.clamp(self.min, self.max);
        }
    }

    pub fn contains(&self, velocity: &[f64]) -> bool {
        velocity.iter().all(|v| (self.min..=self.max).contains(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_position() {
        let problem = Problem::new(3, -1.0, 1.0);
        let mut position = vec![-3.0, 0.5, 7.0];
        problem.clamp_position(&mut position);
        assert_eq!(position, vec![-1.0, 0.5, 1.0]);
        assert!(problem.contains(&position));
    }

    #[test]
    fn test_opposition() {
        let problem = Problem::new(2, 0.0, 10.0);
        assert_eq!(problem.opposition(&[2.0, 7.5]), vec![8.0, 2.5]);
    }

    #[test]
    fn test_random_position_in_bounds() {
        let problem = Problem::new(5, -2.0, 3.0);
        let mut rng = RandomNumberGenerator::from_seed(5);
        let position = problem.random_position(&mut rng);
        assert_eq!(position.len(), 5);
        assert!(problem.contains(&position));
    }

    #[test]
    fn test_default_velocity_bounds() {
        let bounds = VelocityBounds::for_problem(&Problem::new(2, -10.0, 10.0));
        assert_eq!(bounds.max, 2.0);
        assert_eq!(bounds.min, -2.0);

        let mut velocity = vec![5.0, -0.5, -9.0];
        bounds.clamp_velocity(&mut velocity);
        assert_eq!(velocity, vec![2.0, -0.5, -2.0]);
    }
}
