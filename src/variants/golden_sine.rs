//! Golden-sine moves under simulated annealing.
//!
//! After movement, the best males take a golden-sine step toward the global best:
//!
//! `x' = x + f·(2 - p)·r1·sin(r2)·|r3·g - x|`, with `r1, r2 ∈ [0, 2π]`, `r3 ∈ [0, 2]`
//!
//! where `p` is the run progress. The step is accepted by the Metropolis rule at a
//! temperature cooling geometrically per iteration, so an elite may get worse.
//! Mutants use a hybrid Gaussian/Cauchy operator whose Cauchy share moves from 0.7
//! to `cauchy_rate` over the run, and every `opposition_interval` iterations the
//! opposition of the global best is tried.

use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{check_count, check_positive, check_probability, elite_indices, VariantStrategy};
use crate::{
    agent::{GlobalBest, Solution},
    error::{MayflyError, Result},
    genetic::MutationOperator,
    optimizer::SearchContext,
    population::Population,
    sampling::metropolis_accept,
};

pub(crate) const NAME: &str = "golden-sine-annealing";

/// Cauchy share of the hybrid mutation at the start of a run.
const INITIAL_CAUCHY_PROBABILITY: f64 = 0.7;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GoldenSineParams {
    pub elite_count: usize,
    /// Scale of the golden-sine step.
    pub factor: f64,
    pub initial_temperature: f64,
    /// Geometric cooling factor per iteration, in `(0, 1)`.
    pub cooling_rate: f64,
    /// Cauchy share of the hybrid mutation at the end of a run.
    pub cauchy_rate: f64,
    /// Iterations between two opposition trials of the global best.
    pub opposition_interval: usize,
}

impl Default for GoldenSineParams {
    fn default() -> Self {
        Self {
            elite_count: 3,
            factor: 1.0,
            initial_temperature: 1.0,
            cooling_rate: 0.95,
            cauchy_rate: 0.2,
            opposition_interval: 10,
        }
    }
}

impl GoldenSineParams {
    pub fn validate(&self) -> Result<()> {
        check_count("elite_count", self.elite_count)?;
        check_count("opposition_interval", self.opposition_interval)?;
        check_positive("factor", self.factor)?;
        check_positive("initial_temperature", self.initial_temperature)?;
        check_probability("cauchy_rate", self.cauchy_rate)?;
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(MayflyError::Configuration(format!(
                "cooling_rate must be between 0.0 and 1.0 (exclusive), got {}",
                self.cooling_rate
            )));
        }
        Ok(())
    }

    /// Temperature during iteration `iteration`.
    pub fn temperature(&self, iteration: usize) -> f64 {
        self.initial_temperature * self.cooling_rate.powf(iteration as f64)
    }

    /// Cauchy share of the hybrid mutation at `progress`.
    pub fn cauchy_probability(&self, progress: f64) -> f64 {
        INITIAL_CAUCHY_PROBABILITY + (self.cauchy_rate - INITIAL_CAUCHY_PROBABILITY) * progress
    }
}

#[derive(Debug, Clone)]
pub struct GoldenSineAnnealing {
    params: GoldenSineParams,
    temperature: f64,
}

impl GoldenSineAnnealing {
    pub fn new(params: GoldenSineParams) -> Self {
        let temperature = params.initial_temperature;
        Self {
            params,
            temperature,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl VariantStrategy for GoldenSineAnnealing {
    fn name(&self) -> &'static str {
        NAME
    }

    fn begin_iteration(
        &mut self,
        ctx: &mut SearchContext<'_>,
        _population: &Population,
        _best: &GlobalBest,
    ) -> Result<()> {
        self.temperature = self.params.temperature(ctx.iteration());
        Ok(())
    }

    fn after_movement(
        &mut self,
        ctx: &mut SearchContext<'_>,
        population: &mut Population,
        best: &mut GlobalBest,
    ) -> Result<()> {
        let problem = ctx.problem();
        let scale = self.params.factor * (2.0 - ctx.progress());
        let global_best = best.position().to_vec();

        for idx in elite_indices(&population.males, self.params.elite_count) {
            let male = &mut population.males[idx];
            let candidate: Vec<f64> = male
                .position
                .iter()
                .zip(&global_best)
                .map(|(x, g)| {
                    let rng = ctx.rng();
                    let r1 = rng.uniform_range(0.0, 2.0 * PI);
                    let r2 = rng.uniform_range(0.0, 2.0 * PI);
                    let r3 = rng.uniform_range(0.0, 2.0);
                    problem.clamp(x + scale * r1 * r2.sin() * (r3 * g - x).abs())
                })
                .collect();

            let cost = ctx.evaluate(&candidate)?;
            if metropolis_accept(ctx.rng(), cost - male.cost, self.temperature) {
                male.relocate(candidate, cost);
                male.record_personal_best();
                best.offer_agent(male);
            }
        }
        Ok(())
    }

    fn mutation_operator(&self, ctx: &SearchContext<'_>) -> Option<MutationOperator> {
        Some(MutationOperator::Hybrid {
            cauchy_probability: self.params.cauchy_probability(ctx.progress()),
        })
    }

    fn after_selection(
        &mut self,
        ctx: &mut SearchContext<'_>,
        population: &mut Population,
        best: &mut GlobalBest,
    ) -> Result<()> {
        if (ctx.iteration() + 1) % self.params.opposition_interval != 0 {
            return Ok(());
        }

        let position = ctx.problem().opposition(best.position());
        let cost = ctx.evaluate(&position)?;
        if best.offer(&position, cost) {
            if ctx.is_verbose() {
                debug!(cost, "opposition of the global best improved it");
            }
            population.replace_worst_male(&Solution::new(position, cost));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        agent::Agent, optimizer::LogLevel, problem::Problem, rng::RandomNumberGenerator,
    };

    #[test]
    fn test_schedules() {
        let params = GoldenSineParams::default();
        assert_eq!(params.temperature(0), 1.0);
        assert!((params.temperature(2) - 0.9025).abs() < 1e-12);
        assert!((params.cauchy_probability(0.0) - 0.7).abs() < 1e-12);
        assert!((params.cauchy_probability(1.0) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_cooling_rejected() {
        let params = GoldenSineParams {
            cooling_rate: 1.0,
            ..GoldenSineParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_opposition_only_on_interval() {
        let objective = |x: &[f64]| (x[0] - 4.0).abs();
        let problem = Problem::new(1, -5.0, 5.0);
        let mut rng = RandomNumberGenerator::from_seed(5);
        let mut ctx = SearchContext::new(&objective, &problem, &mut rng, 100, LogLevel::None);

        let mut population = Population::new(vec![Agent::male(vec![-4.0], 8.0)], Vec::new());
        let mut best = GlobalBest::new();
        best.offer(&[-4.0], 8.0);
        let mut strategy = GoldenSineAnnealing::new(GoldenSineParams::default());

        ctx.set_iteration(3);
        strategy
            .after_selection(&mut ctx, &mut population, &mut best)
            .unwrap();
        assert_eq!(ctx.evaluations(), 0);

        ctx.set_iteration(9);
        strategy
            .after_selection(&mut ctx, &mut population, &mut best)
            .unwrap();
        assert_eq!(best.position(), &[4.0]);
        assert_eq!(population.males[0].cost, 0.0);
    }

    #[test]
    fn test_annealed_moves_stay_in_bounds() {
        let objective = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
        let problem = Problem::new(3, -2.0, 2.0);
        let mut rng = RandomNumberGenerator::from_seed(6);
        let mut ctx = SearchContext::new(&objective, &problem, &mut rng, 10, LogLevel::None);

        let males = (0..4)
            .map(|i| Agent::male(vec![i as f64 * 0.5; 3], 0.75 * (i * i) as f64))
            .collect();
        let mut population = Population::new(males, Vec::new());
        let mut best = GlobalBest::new();
        best.offer(&[0.0; 3], 0.0);

        let mut strategy = GoldenSineAnnealing::new(GoldenSineParams::default());
        for iteration in 0..5 {
            ctx.set_iteration(iteration);
            strategy
                .begin_iteration(&mut ctx, &population, &best)
                .unwrap();
            strategy
                .after_movement(&mut ctx, &mut population, &mut best)
                .unwrap();
        }
        assert!(population.agents().all(|a| problem.contains(&a.position)));
        assert_eq!(best.cost(), 0.0);
        assert!(strategy.temperature() < 1.0);
    }
}
