//! Bare-bones movement with Lévy and opposition refinement of the elites.
//!
//! Every agent is resampled from `N((x + g) / 2, |x - g| / 2)` per coordinate,
//! where `g` is the global best, instead of following the velocity equations.
//! After selection the best males may additionally try a Lévy jump or their
//! opposition point, both kept only on improvement.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{
    check_count, check_positive, check_probability, elite_indices, try_improve, VariantStrategy,
};
use crate::{
    agent::{Agent, GlobalBest, Solution},
    error::{MayflyError, Result},
    optimizer::SearchContext,
    population::Population,
    sampling::levy_vector,
};

pub(crate) const NAME: &str = "bare-bones";

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BareBonesParams {
    pub elite_count: usize,
    pub levy_probability: f64,
    pub opposition_probability: f64,
    /// Stability index of the Lévy distribution, in `(0, 2]`.
    pub levy_alpha: f64,
    /// Lévy step size relative to the search interval.
    pub levy_scale: f64,
}

impl Default for BareBonesParams {
    fn default() -> Self {
        Self {
            elite_count: 3,
            levy_probability: 0.1,
            opposition_probability: 0.1,
            levy_alpha: 1.5,
            levy_scale: 0.01,
        }
    }
}

impl BareBonesParams {
    pub fn validate(&self) -> Result<()> {
        check_count("elite_count", self.elite_count)?;
        check_probability("levy_probability", self.levy_probability)?;
        check_probability("opposition_probability", self.opposition_probability)?;
        check_positive("levy_scale", self.levy_scale)?;
        check_levy_alpha(self.levy_alpha)
    }
}

pub(crate) fn check_levy_alpha(alpha: f64) -> Result<()> {
    if !(alpha > 0.0 && alpha <= 2.0) {
        return Err(MayflyError::Configuration(format!(
            "levy_alpha must be in (0, 2], got {}",
            alpha
        )));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct BareBones {
    params: BareBonesParams,
}

impl BareBones {
    pub fn new(params: BareBonesParams) -> Self {
        Self { params }
    }
}

impl VariantStrategy for BareBones {
    fn name(&self) -> &'static str {
        NAME
    }

    fn relocate(
        &mut self,
        ctx: &mut SearchContext<'_>,
        agent: &Agent,
        _population: &Population,
        best: &GlobalBest,
    ) -> Result<Option<Solution>> {
        let problem = ctx.problem();
        let position: Vec<f64> = agent
            .position
            .iter()
            .zip(best.position())
            .map(|(x, g)| {
                let mean = (x + g) / 2.0;
                let std = (x - g).abs() / 2.0;
                problem.clamp(ctx.rng().normal(mean, std))
            })
            .collect();
        let cost = ctx.evaluate(&position)?;
        Ok(Some(Solution::new(position, cost)))
    }

    fn after_selection(
        &mut self,
        ctx: &mut SearchContext<'_>,
        population: &mut Population,
        best: &mut GlobalBest,
    ) -> Result<()> {
        let problem = ctx.problem();
        let step = self.params.levy_scale * problem.range();

        for idx in elite_indices(&population.males, self.params.elite_count) {
            let male = &mut population.males[idx];

            if ctx.rng().chance(self.params.levy_probability) {
                let jumps = levy_vector(ctx.rng(), self.params.levy_alpha, problem.dimensions);
                let candidate = male
                    .position
                    .iter()
                    .zip(jumps)
                    .map(|(x, l)| problem.clamp(x + step * l))
                    .collect();
                try_improve(ctx, male, candidate, best)?;
            }

            if ctx.rng().chance(self.params.opposition_probability) {
                let candidate = problem.opposition(&male.position);
                try_improve(ctx, male, candidate, best)?;
            }
        }
        Ok(())
    }
}
