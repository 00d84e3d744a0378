//! Orthogonal-design learning and chaotic offspring perturbation.
//!
//! Each of the `elite_count` best males builds one candidate per row of the
//! two-level orthogonal array L4(2^3). Dimension `d` reads column `d mod 3`: level 0
//! learns from the male's personal best, level 1 from the global best. The best
//! candidate replaces the male only if it is strictly better.
//!
//! Offspring are nudged by a logistic-map sequence whose amplitude fades over the
//! run, again keeping the perturbed child only on improvement.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{check_count, check_positive, elite_indices, try_improve, VariantStrategy};
use crate::{
    agent::{Agent, GlobalBest},
    error::{MayflyError, Result},
    optimizer::SearchContext,
    population::{compare_costs, Population},
    sampling::LogisticMap,
};

pub(crate) const NAME: &str = "orthogonal-chaos";

/// The two-level orthogonal array L4(2^3).
pub const ORTHOGONAL_ARRAY: [[usize; 3]; 4] = [[0, 0, 0], [0, 1, 1], [1, 0, 1], [1, 1, 0]];

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct OrthogonalChaosParams {
    /// Males that run the orthogonal learning step.
    pub elite_count: usize,
    /// Gaussian noise added to each learned coordinate, relative to the interval.
    pub jitter: f64,
    /// Peak amplitude of the chaotic perturbation, relative to the interval.
    pub chaos_strength: f64,
}

impl Default for OrthogonalChaosParams {
    fn default() -> Self {
        Self {
            elite_count: 3,
            jitter: 0.01,
            chaos_strength: 0.05,
        }
    }
}

impl OrthogonalChaosParams {
    pub fn validate(&self) -> Result<()> {
        check_count("elite_count", self.elite_count)?;
        check_positive("chaos_strength", self.chaos_strength)?;
        if !(self.jitter >= 0.0 && self.jitter.is_finite()) {
            return Err(MayflyError::Configuration(format!(
                "jitter must be non-negative, got {}",
                self.jitter
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct OrthogonalChaos {
    params: OrthogonalChaosParams,
    map: Option<LogisticMap>,
}

impl OrthogonalChaos {
    pub fn new(params: OrthogonalChaosParams) -> Self {
        Self { params, map: None }
    }

    fn orthogonal_candidates(
        &self,
        ctx: &mut SearchContext<'_>,
        male: &Agent,
        global_best: &[f64],
    ) -> Vec<Vec<f64>> {
        let problem = ctx.problem();
        let sigma = self.params.jitter * problem.range();
        let personal_best = male
            .personal_best
            .as_ref()
            .map_or(male.position.as_slice(), |pb| pb.position.as_slice());

        ORTHOGONAL_ARRAY
            .iter()
            .map(|row| {
                male.position
                    .iter()
                    .enumerate()
                    .map(|(d, x)| {
                        let guide = if row[d % 3] == 0 {
                            personal_best[d]
                        } else {
                            global_best[d]
                        };
                        let rng = ctx.rng();
                        let step = rng.uniform() * (guide - x);
                        problem.clamp(x + step + rng.normal(0.0, sigma))
                    })
                    .collect()
            })
            .collect()
    }
}

impl VariantStrategy for OrthogonalChaos {
    fn name(&self) -> &'static str {
        NAME
    }

    fn after_movement(
        &mut self,
        ctx: &mut SearchContext<'_>,
        population: &mut Population,
        best: &mut GlobalBest,
    ) -> Result<()> {
        let global_best = best.position().to_vec();
        for idx in elite_indices(&population.males, self.params.elite_count) {
            let candidates = self.orthogonal_candidates(ctx, &population.males[idx], &global_best);

            let mut winner: Option<(Vec<f64>, f64)> = None;
            for candidate in candidates {
                let cost = ctx.evaluate(&candidate)?;
                if winner
                    .as_ref()
                    .map_or(true, |(_, c)| compare_costs(cost, *c).is_lt())
                {
                    winner = Some((candidate, cost));
                }
            }

            let male = &mut population.males[idx];
            if let Some((position, cost)) = winner {
                if cost < male.cost {
                    if ctx.is_verbose() {
                        trace!(rank = idx, cost, "orthogonal learning improved male");
                    }
                    male.relocate(position, cost);
                    male.record_personal_best();
                    best.offer_agent(male);
                }
            }
        }
        Ok(())
    }

    fn after_mutation(
        &mut self,
        ctx: &mut SearchContext<'_>,
        offspring: &mut [Agent],
        best: &mut GlobalBest,
    ) -> Result<()> {
        let problem = ctx.problem();
        let amplitude = self.params.chaos_strength * problem.range() * (1.0 - 0.5 * ctx.progress());
        let map = self
            .map
            .get_or_insert_with(|| LogisticMap::new(ctx.rng()));

        for child in offspring.iter_mut() {
            let candidate: Vec<f64> = child
                .position
                .iter()
                .map(|x| {
                    let z = map.next_value(ctx.rng());
                    problem.clamp(x + amplitude * (2.0 * z - 1.0))
                })
                .collect();
            try_improve(ctx, child, candidate, best)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{optimizer::LogLevel, problem::Problem, rng::RandomNumberGenerator};

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    #[test]
    fn test_array_is_balanced() {
        for column in 0..3 {
            let ones = ORTHOGONAL_ARRAY.iter().filter(|row| row[column] == 1).count();
            assert_eq!(ones, 2);
        }

        // Every pair of columns shows each level combination exactly once
        for (a, b) in [(0, 1), (0, 2), (1, 2)] {
            let mut seen: Vec<(usize, usize)> =
                ORTHOGONAL_ARRAY.iter().map(|row| (row[a], row[b])).collect();
            seen.sort();
            assert_eq!(seen, vec![(0, 0), (0, 1), (1, 0), (1, 1)], "columns {} and {}", a, b);
        }
    }

    #[test]
    fn test_orthogonal_learning_never_worsens_elites() {
        let objective = sphere;
        let problem = Problem::new(4, -5.0, 5.0);
        let mut rng = RandomNumberGenerator::from_seed(17);
        let mut ctx = SearchContext::new(&objective, &problem, &mut rng, 10, LogLevel::None);

        let mut males: Vec<Agent> = (0..5)
            .map(|i| {
                let position = vec![i as f64; 4];
                let cost = sphere(&position);
                Agent::male(position, cost)
            })
            .collect();
        males[0].personal_best = Some(crate::agent::Solution::new(vec![0.0; 4], 0.0));
        let before: Vec<f64> = males.iter().map(|m| m.cost).collect();
        let mut population = Population::new(males, Vec::new());
        let mut best = GlobalBest::new();
        best.offer(&[0.5; 4], 1.0);

        let mut strategy = OrthogonalChaos::new(OrthogonalChaosParams::default());
        strategy
            .after_movement(&mut ctx, &mut population, &mut best)
            .unwrap();

        for (male, cost) in population.males.iter().zip(before) {
            assert!(male.cost <= cost);
        }
        assert_eq!(ctx.evaluations(), 3 * ORTHOGONAL_ARRAY.len());
    }

    #[test]
    fn test_chaotic_perturbation_is_greedy() {
        let objective = sphere;
        let problem = Problem::new(3, -5.0, 5.0);
        let mut rng = RandomNumberGenerator::from_seed(23);
        let mut ctx = SearchContext::new(&objective, &problem, &mut rng, 10, LogLevel::None);

        let mut offspring = vec![
            Agent::female(vec![0.0; 3], 0.0),
            Agent::female(vec![3.0; 3], 27.0),
        ];
        let mut best = GlobalBest::new();
        best.offer(&[0.0; 3], 0.0);

        let mut strategy = OrthogonalChaos::new(OrthogonalChaosParams::default());
        strategy
            .after_mutation(&mut ctx, &mut offspring, &mut best)
            .unwrap();

        // Nothing beats the optimum itself
        assert_eq!(offspring[0].position, vec![0.0; 3]);
        assert!(offspring[1].cost <= 27.0);
        assert!(offspring.iter().all(|o| problem.contains(&o.position)));
    }
}
