//! Adaptive trust-region search around the global best.
//!
//! After selection, `elite_count` points are sampled uniformly from a cube centred
//! on the global best. The cube's half-width is a fraction of the search interval
//! that grows after a successful round and shrinks after a failed one.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{check_count, check_positive, VariantStrategy};
use crate::{
    agent::{GlobalBest, Solution},
    error::{MayflyError, Result},
    optimizer::SearchContext,
    population::Population,
};

pub(crate) const NAME: &str = "elite-search";

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EliteSearchParams {
    /// Candidates sampled per iteration.
    pub elite_count: usize,
    /// Initial half-width of the cube, as a fraction of the search interval.
    pub search_range: f64,
    /// Growth factor applied after an improvement.
    pub enlarge_factor: f64,
    /// Shrink factor applied after a failed round.
    pub reduction_factor: f64,
    pub min_range: f64,
    pub max_range: f64,
}

impl Default for EliteSearchParams {
    fn default() -> Self {
        Self {
            elite_count: 10,
            search_range: 0.1,
            enlarge_factor: 1.5,
            reduction_factor: 0.7,
            min_range: 1e-8,
            max_range: 0.5,
        }
    }
}

impl EliteSearchParams {
    pub fn validate(&self) -> Result<()> {
        check_count("elite_count", self.elite_count)?;
        check_positive("min_range", self.min_range)?;
        check_positive("search_range", self.search_range)?;
        check_positive("max_range", self.max_range)?;
        if !(self.min_range <= self.search_range && self.search_range <= self.max_range) {
            return Err(MayflyError::Configuration(format!(
                "search_range must lie within [{}, {}], got {}",
                self.min_range, self.max_range, self.search_range
            )));
        }
        if !(self.enlarge_factor >= 1.0) {
            return Err(MayflyError::Configuration(
                "enlarge_factor must be at least 1.0".to_string(),
            ));
        }
        if !(self.reduction_factor > 0.0 && self.reduction_factor < 1.0) {
            return Err(MayflyError::Configuration(
                "reduction_factor must be between 0.0 and 1.0 (exclusive)".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct EliteSearch {
    params: EliteSearchParams,
    radius: f64,
}

impl EliteSearch {
    pub fn new(params: EliteSearchParams) -> Self {
        let radius = params.search_range;
        Self { params, radius }
    }

    /// Current half-width of the trust region, as a fraction of the search interval.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl VariantStrategy for EliteSearch {
    fn name(&self) -> &'static str {
        NAME
    }

    fn after_selection(
        &mut self,
        ctx: &mut SearchContext<'_>,
        population: &mut Population,
        best: &mut GlobalBest,
    ) -> Result<()> {
        let problem = ctx.problem();
        let half_width = self.radius * problem.range();
        let center = best.position().to_vec();

        let mut winner: Option<Solution> = None;
        for _ in 0..self.params.elite_count {
            let position: Vec<f64> = center
                .iter()
                .map(|c| problem.clamp(c + ctx.rng().uniform_range(-half_width, half_width)))
                .collect();
            let cost = ctx.evaluate(&position)?;
            if winner.as_ref().map_or(true, |w| cost < w.cost) {
                winner = Some(Solution::new(position, cost));
            }
        }

        match winner {
            Some(candidate) if best.offer(&candidate.position, candidate.cost) => {
                population.replace_worst_male(&candidate);
                self.radius = (self.radius * self.params.enlarge_factor).min(self.params.max_range);
                if ctx.is_verbose() {
                    debug!(cost = candidate.cost, radius = self.radius, "elite search improved");
                }
            }
            _ => {
                self.radius =
                    (self.radius * self.params.reduction_factor).max(self.params.min_range);
            }
        }
        Ok(())
    }
}
