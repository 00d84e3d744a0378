//! # Objective
//!
//! The `Objective` trait is the contract between the optimizer and the problem it
//! minimizes: a deterministic map from a position of fixed length to a scalar cost.
//! Any closure `Fn(&[f64]) -> f64` is an objective.
//!
//! Vector-valued problems expose their raw objective values through
//! `evaluate_objectives`, which the Pareto archive consumes, while the engine keeps
//! minimizing the scalar returned by `evaluate`. [`WeightedSum`] builds such an
//! objective from a vector-valued closure.
//!
//! ## Example
//!
//! ```rust
//! use mayfly::objective::{Objective, WeightedSum};
//!
//! let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
//! assert_eq!(sphere.evaluate(&[1.0, 2.0]), 5.0);
//!
//! let bi = WeightedSum::new(|x: &[f64]| vec![x[0], 1.0 - x[0]], vec![0.5, 0.5]);
//! assert_eq!(bi.objective_count(), 2);
//! assert_eq!(bi.evaluate(&[0.2]), 0.5);
//! ```

use std::fmt;

/// A deterministic cost function to be minimized.
pub trait Objective: Send + Sync {
    /// Returns the scalar cost of `position`.
    fn evaluate(&self, position: &[f64]) -> f64;

    /// The number of objective values reported by `evaluate_objectives`.
    fn objective_count(&self) -> usize {
        1
    }

    /// Returns the raw objective vector of `position`.
    ///
    /// Single-objective problems return their scalar cost.
    fn evaluate_objectives(&self, position: &[f64]) -> Vec<f64> {
        vec![self.evaluate(position)]
    }
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, position: &[f64]) -> f64 {
        self(position)
    }
}

/// Scalarises a vector-valued objective by a fixed weighted sum.
#[derive(Clone)]
pub struct WeightedSum<F>
where
    F: Fn(&[f64]) -> Vec<f64> + Send + Sync,
{
    objectives: F,
    weights: Vec<f64>,
}

impl<F> WeightedSum<F>
where
    F: Fn(&[f64]) -> Vec<f64> + Send + Sync,
{
    /// Creates a weighted-sum objective. One weight per objective value.
    pub fn new(objectives: F, weights: Vec<f64>) -> Self {
        Self {
            objectives,
            weights,
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl<F> Objective for WeightedSum<F>
where
    F: Fn(&[f64]) -> Vec<f64> + Send + Sync,
{
    fn evaluate(&self, position: &[f64]) -> f64 {
        (self.objectives)(position)
            .iter()
            .zip(&self.weights)
            .map(|(value, weight)| value * weight)
            .sum()
    }

    fn objective_count(&self) -> usize {
        self.weights.len()
    }

    fn evaluate_objectives(&self, position: &[f64]) -> Vec<f64> {
        (self.objectives)(position)
    }
}

impl<F> fmt::Debug for WeightedSum<F>
where
    F: Fn(&[f64]) -> Vec<f64> + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedSum")
            .field("weights", &self.weights)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_objective() {
        let objective = |x: &[f64]| x.iter().sum::<f64>();
        assert_eq!(objective.evaluate(&[1.0, 2.0, 3.0]), 6.0);
        assert_eq!(objective.objective_count(), 1);
        assert_eq!(objective.evaluate_objectives(&[1.0, 2.0]), vec![3.0]);
    }

    #[test]
    fn test_weighted_sum() {
        let objective = WeightedSum::new(|x: &[f64]| vec![x[0] * x[0], (x[0] - 2.0).powi(2)], vec![1.0, 2.0]);
        assert_eq!(objective.objective_count(), 2);
        assert_eq!(objective.evaluate_objectives(&[1.0]), vec![1.0, 1.0]);
        assert_eq!(objective.evaluate(&[1.0]), 3.0);
    }
}
