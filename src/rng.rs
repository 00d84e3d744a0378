//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single source of randomness for a run.
//! It wraps a seedable `StdRng` and exposes the handful of deviates the optimizer
//! needs: uniform, normal, Cauchy and index sampling.
//!
//! Every stochastic operation receives the generator explicitly, so two runs that
//! start from the same seed consume the same stream in the same order.
//!
//! ## Example
//!
//! ```rust
//! use mayfly::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let position = rng.fetch_uniform(-5.0, 5.0, 3);
//!
//! assert_eq!(position.len(), 3);
//! assert!(position.iter().all(|x| (-5.0..5.0).contains(x)));
//! ```

use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};
use rand_distr::{Cauchy, Distribution, Normal, StandardNormal};

/// A wrapper around the `rand` crate's `StdRng` that provides the deviates used
/// by the optimizer.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is what makes runs reproducible.
    ///
    /// # Arguments
    ///
    /// * `seed` - The seed to use for the random number generator.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns a uniform deviate in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Returns a uniform deviate in `[from, to)`. A degenerate range yields `from`.
    pub fn uniform_range(&mut self, from: f64, to: f64) -> f64 {
        if from >= to {
            return from;
        }
        self.rng.gen_range(from..to)
    }

    /// Generates a specified number of random floating-point numbers within the given range.
    ///
    /// # Parameters
    ///
    /// - `from`: The lower bound of the range (inclusive).
    /// - `to`: The upper bound of the range (exclusive).
    /// - `num`: The number of random numbers to generate.
    pub fn fetch_uniform(&mut self, from: f64, to: f64, num: usize) -> Vec<f64> {
        (0..num).map(|_| self.uniform_range(from, to)).collect()
    }

    /// Returns `true` with probability `probability`.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.uniform() < probability
    }

    /// Returns a standard normal deviate.
    pub fn standard_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.rng)
    }

    /// Returns a deviate of `N(mean, std_dev)`.
    ///
    /// A zero, negative or non-finite standard deviation collapses the
    /// distribution onto its mean.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        if !(std_dev.is_finite() && std_dev > 0.0) {
            return mean;
        }
        match Normal::new(mean, std_dev) {
            Ok(distribution) => distribution.sample(&mut self.rng),
            Err(_) => mean,
        }
    }

    /// Returns a deviate of a Cauchy distribution centred on `location`.
    ///
    /// An invalid scale collapses the distribution onto its location.
    pub fn cauchy(&mut self, location: f64, scale: f64) -> f64 {
        if !(scale.is_finite() && scale > 0.0) {
            return location;
        }
        match Cauchy::new(location, scale) {
            Ok(distribution) => distribution.sample(&mut self.rng),
            Err(_) => location,
        }
    }

    /// Returns a uniformly chosen index in `0..len`. `len` must be positive.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Samples `amount` distinct indices from `0..len` without replacement.
    ///
    /// `amount` is capped at `len`.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.rng, len, amount.min(len)).into_vec()
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_uniform_with_negative_range() {
        let mut rng = RandomNumberGenerator::new();
        let result = rng.fetch_uniform(-1.0, 1.0, 3);

        assert_eq!(result.len(), 3);

        for &num in result.iter() {
            assert!((-1.0..1.0).contains(&num));
        }
    }

    #[test]
    fn test_fetch_uniform_with_empty_result() {
        let mut rng = RandomNumberGenerator::new();
        assert!(rng.fetch_uniform(1.0, 2.0, 0).is_empty());
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        assert_eq!(rng.uniform_range(2.0, 2.0), 2.0);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut rng1 = RandomNumberGenerator::from_seed(42);
        let mut rng2 = RandomNumberGenerator::from_seed(42);

        for _ in 0..10 {
            assert_eq!(rng1.uniform().to_bits(), rng2.uniform().to_bits());
            assert_eq!(rng1.standard_normal().to_bits(), rng2.standard_normal().to_bits());
            assert_eq!(rng1.cauchy(0.0, 1.0).to_bits(), rng2.cauchy(0.0, 1.0).to_bits());
        }
    }

    #[test]
    fn test_clone() {
        let mut rng1 = RandomNumberGenerator::from_seed(42);
        let mut rng2 = rng1.clone();

        assert_eq!(rng1.fetch_uniform(0.0, 1.0, 5), rng2.fetch_uniform(0.0, 1.0, 5));
    }

    #[test]
    fn test_normal_with_zero_deviation_returns_mean() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        assert_eq!(rng.normal(1.5, 0.0), 1.5);
        assert_eq!(rng.normal(1.5, f64::NAN), 1.5);
        assert_eq!(rng.cauchy(-2.0, 0.0), -2.0);
    }

    #[test]
    fn test_sample_indices_are_distinct() {
        let mut rng = RandomNumberGenerator::from_seed(9);
        let mut indices = rng.sample_indices(10, 4);
        assert_eq!(indices.len(), 4);
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), 4);
        assert!(indices.iter().all(|&i| i < 10));

        assert_eq!(rng.sample_indices(3, 8).len(), 3);
    }
}
