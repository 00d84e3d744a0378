//! # Sampling
//!
//! Stochastic building blocks shared by the variant strategies: Lévy-flight steps
//! drawn with Mantegna's algorithm, the logistic chaotic map and the Metropolis
//! acceptance rule.
//!
//! Heavy-tailed draws can overflow for extreme parameters. Such draws are retried
//! once and then replaced by a plain normal draw, so nothing non-finite reaches the
//! population.

use std::f64::consts::PI;

use tracing::warn;

use crate::rng::RandomNumberGenerator;

/// Lanczos coefficients for `g = 7`, `n = 9`.
const LANCZOS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// The gamma function via the Lanczos approximation.
pub fn gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection formula
        PI / ((PI * x).sin() * gamma(1.0 - x))
    } else {
        let x = x - 1.0;
        let t = x + 7.5;
        let series = LANCZOS
            .iter()
            .enumerate()
            .skip(1)
            .fold(LANCZOS[0], |acc, (i, c)| acc + c / (x + i as f64));
        (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * series
    }
}

/// Standard deviation of the numerator in Mantegna's algorithm.
pub fn mantegna_sigma(alpha: f64) -> f64 {
    let numerator = gamma(1.0 + alpha) * (PI * alpha / 2.0).sin();
    let denominator = gamma((1.0 + alpha) / 2.0) * alpha * 2f64.powf((alpha - 1.0) / 2.0);
    (numerator / denominator).powf(1.0 / alpha)
}

/// Draws one Lévy-flight step of stability index `alpha` (Mantegna's algorithm).
///
/// The step is `u / |v|^(1/alpha)` with `u ~ N(0, sigma_u)` and `v ~ N(0, 1)`.
pub fn levy_step(rng: &mut RandomNumberGenerator, alpha: f64) -> f64 {
    let sigma = mantegna_sigma(alpha);
    for _ in 0..2 {
        let u = rng.normal(0.0, sigma);
        let v = rng.standard_normal();
        let step = u / v.abs().powf(1.0 / alpha);
        if step.is_finite() {
            return step;
        }
    }
    warn!(alpha, "non-finite Lévy step, falling back to a normal draw");
    rng.standard_normal()
}

/// Draws a Lévy-flight vector of `dimensions` independent steps.
pub fn levy_vector(rng: &mut RandomNumberGenerator, alpha: f64, dimensions: usize) -> Vec<f64> {
    (0..dimensions).map(|_| levy_step(rng, alpha)).collect()
}

/// The logistic map `z' = 4 z (1 - z)`, reseeded whenever it collapses.
#[derive(Debug, Clone)]
pub struct LogisticMap {
    state: f64,
}

impl LogisticMap {
    const EPSILON: f64 = 1e-10;

    /// Creates a map seeded from `rng`.
    pub fn new(rng: &mut RandomNumberGenerator) -> Self {
        Self {
            state: Self::fresh_state(rng),
        }
    }

    pub fn state(&self) -> f64 {
        self.state
    }

    /// Advances the map and returns the new state in `(0, 1)`.
    pub fn next_value(&mut self, rng: &mut RandomNumberGenerator) -> f64 {
        let next = 4.0 * self.state * (1.0 - self.state);
        self.state = if Self::is_degenerate(next) || (next - self.state).abs() < Self::EPSILON {
            Self::fresh_state(rng)
        } else {
            next
        };
        self.state
    }

    fn is_degenerate(value: f64) -> bool {
        !value.is_finite() || value <= Self::EPSILON || value >= 1.0 - Self::EPSILON
    }

    fn fresh_state(rng: &mut RandomNumberGenerator) -> f64 {
        // 0.25, 0.5 and 0.75 lead straight to a fixed point
        loop {
            let z = rng.uniform_range(0.1, 0.9);
            if [0.25, 0.5, 0.75].iter().all(|p| (z - p).abs() > 1e-3) {
                return z;
            }
        }
    }
}

/// Probability of accepting a move whose cost changes by `delta` at `temperature`.
///
/// Improvements are always accepted. Any other move is accepted with
/// `exp(-delta / temperature)`, kept strictly inside `(0, 1)`.
pub fn metropolis_probability(delta: f64, temperature: f64) -> f64 {
    if delta < 0.0 {
        return 1.0;
    }
    let probability = if temperature > 0.0 && temperature.is_finite() {
        (-delta / temperature).exp()
    } else {
        0.0
    };
    if probability.is_nan() {
        return f64::MIN_POSITIVE;
    }
    probability.clamp(f64::MIN_POSITIVE, 1.0 - f64::EPSILON)
}

/// Applies the Metropolis criterion, consuming one uniform draw for non-improving moves.
pub fn metropolis_accept(rng: &mut RandomNumberGenerator, delta: f64, temperature: f64) -> bool {
    if delta < 0.0 {
        return true;
    }
    rng.uniform() < metropolis_probability(delta, temperature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamma_known_values() {
        assert!((gamma(1.0) - 1.0).abs() < 1e-10);
        assert!((gamma(5.0) - 24.0).abs() < 1e-8);
        assert!((gamma(0.5) - PI.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_mantegna_sigma_for_alpha_one_and_a_half() {
        // Commonly quoted value for alpha = 1.5
        assert!((mantegna_sigma(1.5) - 0.696_574_5).abs() < 1e-4);
    }

    #[test]
    fn test_levy_steps_are_finite() {
        let mut rng = RandomNumberGenerator::from_seed(11);
        for alpha in [0.3, 1.0, 1.5, 2.0] {
            let steps = levy_vector(&mut rng, alpha, 200);
            assert!(steps.iter().all(|s| s.is_finite()));
        }
    }

    #[test]
    fn test_logistic_map_stays_in_unit_interval() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let mut map = LogisticMap::new(&mut rng);
        for _ in 0..10_000 {
            let z = map.next_value(&mut rng);
            assert!(z > 0.0 && z < 1.0);
        }
    }

    #[test]
    fn test_logistic_map_reseeds_on_collapse() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let mut map = LogisticMap { state: 0.5 };
        // 0.5 maps to exactly 1.0
        let z = map.next_value(&mut rng);
        assert!(z > 0.0 && z < 1.0);
        assert_ne!(z, 1.0);
    }

    #[test]
    fn test_metropolis_improvement_always_accepted() {
        assert_eq!(metropolis_probability(-1.0, 10.0), 1.0);
        assert_eq!(metropolis_probability(-1e-12, 1e-12), 1.0);
    }

    #[test]
    fn test_metropolis_worse_strictly_between_zero_and_one() {
        for temperature in [1e3, 1.0, 1e-3, 1e-9, 0.0] {
            let p = metropolis_probability(0.5, temperature);
            assert!(p > 0.0 && p < 1.0, "p = {} at T = {}", p, temperature);
        }
        assert!(metropolis_probability(1.0, 1e-6) < 1e-100);
        assert!(metropolis_probability(1.0, 1.0) > metropolis_probability(1.0, 0.1));
    }
}
