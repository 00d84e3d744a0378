#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{problem::Problem, rng::RandomNumberGenerator};

/// Ratio between the perturbation scale and the width of the search interval.
const SCALE_RATIO: f64 = 0.1;

/// Cauchy draws are clipped to this many interval widths.
const CAUCHY_CLIP: f64 = 3.0;

/// The perturbation used when a mutant is produced.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MutationOperator {
    /// `N(0, 0.1·range)` noise.
    #[default]
    Gaussian,
    /// Cauchy noise of scale `0.1·range`, clipped to `±3·range`.
    Cauchy,
    /// Cauchy with probability `cauchy_probability`, Gaussian otherwise.
    Hybrid { cauchy_probability: f64 },
}

impl MutationOperator {
    /// Applies the operator to `position` and returns the mutant.
    pub fn apply(
        &self,
        rng: &mut RandomNumberGenerator,
        position: &[f64],
        rate: f64,
        problem: &Problem,
    ) -> Vec<f64> {
        match *self {
            MutationOperator::Gaussian => gaussian_mutation(rng, position, rate, problem),
            MutationOperator::Cauchy => cauchy_mutation(rng, position, rate, problem),
            MutationOperator::Hybrid { cauchy_probability } => {
                hybrid_mutation(rng, position, rate, cauchy_probability, problem)
            }
        }
    }
}

/// Number of coordinates touched by a mutation: `⌈rate · dimensions⌉`, at most `dimensions`.
pub fn mutated_dimensions(rate: f64, dimensions: usize) -> usize {
    if rate <= 0.0 {
        return 0;
    }
    ((rate * dimensions as f64).ceil() as usize).min(dimensions)
}

/// Perturbs `⌈rate·n⌉` distinct coordinates with Gaussian noise.
///
/// A zero rate returns an exact copy of `position`.
pub fn gaussian_mutation(
    rng: &mut RandomNumberGenerator,
    position: &[f64],
    rate: f64,
    problem: &Problem,
) -> Vec<f64> {
    let sigma = SCALE_RATIO * problem.range();
    perturb(rng, position, rate, problem, |rng| rng.normal(0.0, sigma))
}

/// Perturbs `⌈rate·n⌉` distinct coordinates with clipped Cauchy noise.
pub fn cauchy_mutation(
    rng: &mut RandomNumberGenerator,
    position: &[f64],
    rate: f64,
    problem: &Problem,
) -> Vec<f64> {
    let scale = SCALE_RATIO * problem.range();
    let limit = CAUCHY_CLIP * problem.range();
    perturb(rng, position, rate, problem, |rng| {
        cauchy_draw(rng, scale).clamp(-limit, limit)
    })
}

/// Chooses Cauchy noise with probability `cauchy_probability`, Gaussian otherwise.
pub fn hybrid_mutation(
    rng: &mut RandomNumberGenerator,
    position: &[f64],
    rate: f64,
    cauchy_probability: f64,
    problem: &Problem,
) -> Vec<f64> {
    if rng.chance(cauchy_probability) {
        cauchy_mutation(rng, position, rate, problem)
    } else {
        gaussian_mutation(rng, position, rate, problem)
    }
}

fn perturb<F>(
    rng: &mut RandomNumberGenerator,
    position: &[f64],
    rate: f64,
    problem: &Problem,
    mut noise: F,
) -> Vec<f64>
where
    F: FnMut(&mut RandomNumberGenerator) -> f64,
{
    let mut mutant = position.to_vec();
    let count = mutated_dimensions(rate, position.len());
    if count == 0 {
        return mutant;
    }

    for idx in rng.sample_indices(position.len(), count) {
        mutant[idx] = problem.clamp(mutant[idx] + noise(rng));
    }
    mutant
}

/// One Cauchy deviate centred on zero; retried once, then the centre.
fn cauchy_draw(rng: &mut RandomNumberGenerator, scale: f64) -> f64 {
    for _ in 0..2 {
        let value = rng.cauchy(0.0, scale);
        if value.is_finite() {
            return value;
        }
    }
    warn!(scale, "non-finite Cauchy draw, using the distribution centre");
    0.0
}
