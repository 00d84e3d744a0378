//! Four-phase hunting moves with opposition learning and a Pareto archive.
//!
//! A random share of the agents hunts instead of following the velocity
//! equations. During the first two thirds of the run a hunter either soars over
//! the population mean or circles a random agent with a Lévy flight; afterwards it
//! either descends between the mean and the global best or closes in on the best.
//! Each hunt is also tried from its opposition point, keeping the better of the two.
//!
//! After selection every surviving agent is offered to a bounded Pareto archive,
//! which becomes the run's reported front.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{bare_bones::check_levy_alpha, check_count, check_probability, VariantStrategy};
use crate::{
    agent::{Agent, GlobalBest, Solution},
    error::Result,
    optimizer::SearchContext,
    pareto::{ParetoArchive, ParetoSolution},
    population::{mean_position, Population},
    sampling::levy_vector,
};

pub(crate) const NAME: &str = "raptor-hybrid";

/// Share of the run spent in the exploratory phases.
const EXPLORATION_SHARE: f64 = 2.0 / 3.0;

/// Weight of the mean-to-best direction in the descending phase.
const DESCENT_RATE: f64 = 0.1;

/// Lévy step size relative to the search interval in the close-range phase.
const STRIKE_SCALE: f64 = 0.01;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RaptorParams {
    /// Probability that an agent hunts in a given iteration.
    pub hunt_probability: f64,
    pub opposition_probability: f64,
    pub levy_alpha: f64,
    pub archive_capacity: usize,
}

impl Default for RaptorParams {
    fn default() -> Self {
        Self {
            hunt_probability: 0.5,
            opposition_probability: 0.1,
            levy_alpha: 1.5,
            archive_capacity: 100,
        }
    }
}

impl RaptorParams {
    pub fn validate(&self) -> Result<()> {
        check_probability("hunt_probability", self.hunt_probability)?;
        check_probability("opposition_probability", self.opposition_probability)?;
        check_count("archive_capacity", self.archive_capacity)?;
        check_levy_alpha(self.levy_alpha)
    }
}

/// The hunting phase of one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntPhase {
    /// Broad search around the population mean.
    HighSoar,
    /// Lévy flight around a random agent, steered by the best.
    Contour,
    /// Descent between the mean and the best.
    Descend,
    /// Tightening moves around the best.
    Strike,
}

impl HuntPhase {
    /// Picks the phase from the run progress and a uniform draw `coin ∈ [0, 1)`.
    pub fn choose(progress: f64, coin: f64) -> Self {
        match (progress <= EXPLORATION_SHARE, coin < 0.5) {
            (true, true) => HuntPhase::HighSoar,
            (true, false) => HuntPhase::Contour,
            (false, true) => HuntPhase::Descend,
            (false, false) => HuntPhase::Strike,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RaptorHybrid {
    params: RaptorParams,
    mean: Vec<f64>,
    archive: ParetoArchive,
}

impl RaptorHybrid {
    pub fn new(params: RaptorParams) -> Result<Self> {
        let archive = ParetoArchive::new(params.archive_capacity)?;
        Ok(Self {
            params,
            mean: Vec::new(),
            archive,
        })
    }

    pub fn archive(&self) -> &ParetoArchive {
        &self.archive
    }

    fn hunt(
        &self,
        ctx: &mut SearchContext<'_>,
        agent: &Agent,
        population: &Population,
        best: &[f64],
    ) -> Vec<f64> {
        let problem = ctx.problem();
        let progress = ctx.progress();
        let phase = HuntPhase::choose(progress, ctx.rng().uniform());
        let dimensions = agent.position.len();
        let x = &agent.position;

        let mut position: Vec<f64> = match phase {
            HuntPhase::HighSoar => (0..dimensions)
                .map(|d| {
                    let r = ctx.rng().uniform();
                    best[d] * (1.0 - progress) + (self.mean[d] - best[d] * r)
                })
                .collect(),
            HuntPhase::Contour => {
                let prey = random_agent(ctx, population).unwrap_or(x.as_slice());
                let steps = levy_vector(ctx.rng(), self.params.levy_alpha, dimensions);
                (0..dimensions)
                    .map(|d| prey[d] + steps[d] * (best[d] - x[d]))
                    .collect()
            }
            HuntPhase::Descend => (0..dimensions)
                .map(|d| {
                    let r = ctx.rng().uniform();
                    (best[d] + self.mean[d]) / 2.0
                        + DESCENT_RATE * (best[d] - self.mean[d])
                        + DESCENT_RATE * problem.range() * (r - 0.5)
                })
                .collect(),
            HuntPhase::Strike => {
                let pull = 2.0 * ctx.rng().uniform() - 1.0;
                let flight = 2.0 * (1.0 - progress);
                let steps = levy_vector(ctx.rng(), self.params.levy_alpha, dimensions);
                (0..dimensions)
                    .map(|d| {
                        let r = ctx.rng().uniform();
                        best[d] + pull * r * (best[d] - x[d])
                            - flight * STRIKE_SCALE * problem.range() * steps[d]
                    })
                    .collect()
            }
        };
        problem.clamp_position(&mut position);
        position
    }
}

fn random_agent<'p>(ctx: &mut SearchContext<'_>, population: &'p Population) -> Option<&'p [f64]> {
    if population.is_empty() {
        return None;
    }
    let idx = ctx.rng().index(population.len());
    population
        .agents()
        .nth(idx)
        .map(|agent| agent.position.as_slice())
}

impl VariantStrategy for RaptorHybrid {
    fn name(&self) -> &'static str {
        NAME
    }

    fn begin_iteration(
        &mut self,
        ctx: &mut SearchContext<'_>,
        population: &Population,
        _best: &GlobalBest,
    ) -> Result<()> {
        self.mean = mean_position(population.agents(), ctx.problem().dimensions);
        Ok(())
    }

    fn relocate(
        &mut self,
        ctx: &mut SearchContext<'_>,
        agent: &Agent,
        population: &Population,
        best: &GlobalBest,
    ) -> Result<Option<Solution>> {
        if !ctx.rng().chance(self.params.hunt_probability) {
            return Ok(None);
        }
        if self.mean.len() != agent.position.len() {
            self.mean = mean_position(population.agents(), agent.position.len());
        }

        let position = self.hunt(ctx, agent, population, best.position());
        let cost = ctx.evaluate(&position)?;
        let mut hunted = Solution::new(position, cost);

        if ctx.rng().chance(self.params.opposition_probability) {
            let opposite = ctx.problem().opposition(&hunted.position);
            let cost = ctx.evaluate(&opposite)?;
            if cost < hunted.cost {
                hunted = Solution::new(opposite, cost);
            }
        }
        Ok(Some(hunted))
    }

    fn after_selection(
        &mut self,
        ctx: &mut SearchContext<'_>,
        population: &mut Population,
        _best: &mut GlobalBest,
    ) -> Result<()> {
        let candidates: Vec<ParetoSolution> = population
            .agents()
            .map(|agent| {
                let objectives = ctx.objective_values(&agent.position, agent.cost);
                ParetoSolution::new(agent.position.clone(), objectives)
            })
            .collect();
        self.archive.extend(candidates)?;
        if ctx.is_verbose() {
            trace!(size = self.archive.len(), "archive updated");
        }
        Ok(())
    }

    fn pareto_front(&self) -> Vec<ParetoSolution> {
        self.archive.front()
    }
}
