//! Median-guided attraction with a decaying gravity coefficient.
//!
//! At the start of each iteration the per-dimension median of all positions is
//! computed, optionally weighted by fitness. The movement equations then pull
//! males toward a blend of the global best and that median, and every attraction
//! term is scaled by a gravity coefficient that decays over the run.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{check_positive, check_probability, VariantStrategy};
use crate::{
    agent::GlobalBest,
    error::{MayflyError, Result},
    movement::MovementGuide,
    optimizer::SearchContext,
    population::{compare_costs, Population},
};

pub(crate) const NAME: &str = "median-gravity";

/// How the gravity coefficient decays from `gravity_max` toward `gravity_min`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GravitySchedule {
    Linear,
    #[default]
    Exponential,
    Sigmoid,
}

impl GravitySchedule {
    /// The coefficient at `progress ∈ [0, 1]`. Never increases with progress.
    pub fn coefficient(&self, progress: f64, max: f64, min: f64) -> f64 {
        let progress = progress.clamp(0.0, 1.0);
        let span = max - min;
        let gravity = match self {
            GravitySchedule::Linear => max - span * progress,
            GravitySchedule::Exponential => min + span * (-2.0 * progress).exp(),
            GravitySchedule::Sigmoid => min + span / (1.0 + (10.0 * (progress - 0.5)).exp()),
        };
        // Rounding may overshoot either end
        gravity.clamp(min, max)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MedianGravityParams {
    /// Weight each agent by `1 / (1 + cost - best_cost)` when taking the median.
    pub weighted: bool,
    pub schedule: GravitySchedule,
    pub gravity_max: f64,
    pub gravity_min: f64,
    /// Share of the median in the social attraction target.
    pub median_weight: f64,
}

impl Default for MedianGravityParams {
    fn default() -> Self {
        Self {
            weighted: true,
            schedule: GravitySchedule::default(),
            gravity_max: 1.0,
            gravity_min: 0.1,
            median_weight: 0.5,
        }
    }
}

impl MedianGravityParams {
    pub fn validate(&self) -> Result<()> {
        check_positive("gravity_max", self.gravity_max)?;
        check_positive("gravity_min", self.gravity_min)?;
        check_probability("median_weight", self.median_weight)?;
        if self.gravity_min > self.gravity_max {
            return Err(MayflyError::Configuration(format!(
                "gravity_min ({}) must not exceed gravity_max ({})",
                self.gravity_min, self.gravity_max
            )));
        }
        Ok(())
    }
}

/// The median of `values`. An even count averages the two middle values.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| compare_costs(*a, *b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// The weighted median: the smallest value whose cumulative weight reaches half
/// of the total.
///
/// Falls back to [`median`] when the weights are unusable (non-finite, not
/// positive in total, or all equal).
pub fn weighted_median(values: &[f64], weights: &[f64]) -> f64 {
    let total: f64 = weights.iter().sum();
    let uniform = weights.windows(2).all(|w| w[0] == w[1]);
    if values.len() != weights.len() || !total.is_finite() || total <= 0.0 || uniform {
        return median(values);
    }

    let mut pairs: Vec<(f64, f64)> = values.iter().copied().zip(weights.iter().copied()).collect();
    pairs.sort_by(|a, b| compare_costs(a.0, b.0));

    let half = total / 2.0;
    let mut cumulative = 0.0;
    for (value, weight) in pairs.iter() {
        cumulative += weight;
        if cumulative >= half {
            return *value;
        }
    }
    pairs.last().map_or(0.0, |(value, _)| *value)
}

/// Fitness weights `1 / (1 + cost - best_cost)`; non-finite weights become 0.
pub fn fitness_weights(costs: &[f64]) -> Vec<f64> {
    let best = costs
        .iter()
        .copied()
        .min_by(|a, b| compare_costs(*a, *b))
        .unwrap_or(0.0);
    costs
        .iter()
        .map(|cost| {
            let weight = 1.0 / (1.0 + cost - best);
            if weight.is_finite() {
                weight
            } else {
                0.0
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct MedianGravity {
    params: MedianGravityParams,
    guide: Option<MovementGuide>,
}

impl MedianGravity {
    pub fn new(params: MedianGravityParams) -> Self {
        Self {
            params,
            guide: None,
        }
    }

    /// Per-dimension (weighted) median of every position in `population`.
    pub fn population_median(&self, population: &Population, dimensions: usize) -> Vec<f64> {
        let weights = if self.params.weighted {
            let costs: Vec<f64> = population.agents().map(|a| a.cost).collect();
            Some(fitness_weights(&costs))
        } else {
            None
        };

        (0..dimensions)
            .map(|d| {
                let column: Vec<f64> = population.agents().map(|a| a.position[d]).collect();
                match weights.as_ref() {
                    Some(weights) => weighted_median(&column, weights),
                    None => median(&column),
                }
            })
            .collect()
    }
}

impl VariantStrategy for MedianGravity {
    fn name(&self) -> &'static str {
        NAME
    }

    fn begin_iteration(
        &mut self,
        ctx: &mut SearchContext<'_>,
        population: &Population,
        _best: &GlobalBest,
    ) -> Result<()> {
        let target = self.population_median(population, ctx.problem().dimensions);
        let gravity = self.params.schedule.coefficient(
            ctx.progress(),
            self.params.gravity_max,
            self.params.gravity_min,
        );
        if ctx.is_verbose() {
            debug!(gravity, "median guide updated");
        }
        self.guide = Some(MovementGuide {
            target,
            target_weight: self.params.median_weight,
            gravity,
        });
        Ok(())
    }

    fn movement_guide(&self) -> Option<&MovementGuide> {
        self.guide.as_ref()
    }
}
