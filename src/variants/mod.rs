//! # Variant Strategies
//!
//! A variant is an enhancement that plugs into the shared movement, mating and
//! selection loop at fixed hook points instead of duplicating it. Exactly one
//! variant is active per run; [`Variant`] selects it and carries its parameters,
//! and [`Variant::build`] turns it into a [`VariantStrategy`] object.
//!
//! | Variant | Hooks |
//! |---|---|
//! | [`Variant::EliteSearch`] | `after_selection` |
//! | [`Variant::OrthogonalChaos`] | `after_movement`, `after_mutation` |
//! | [`Variant::BareBones`] | `relocate`, `after_selection` |
//! | [`Variant::GoldenSineAnnealing`] | `begin_iteration`, `after_movement`, `mutation_operator`, `after_selection` |
//! | [`Variant::MedianGravity`] | `begin_iteration`, `movement_guide` |
//! | [`Variant::RaptorHybrid`] | `begin_iteration`, `relocate`, `after_selection` |
//!
//! Hooks that evaluate a candidate replace the original only on a strictly lower
//! cost, except the golden-sine variant, which anneals.
pub mod bare_bones;
pub mod elite;
pub mod golden_sine;
pub mod median_gravity;
pub mod orthogonal;
pub mod raptor;

pub use bare_bones::{BareBones, BareBonesParams};
pub use elite::{EliteSearch, EliteSearchParams};
pub use golden_sine::{GoldenSineAnnealing, GoldenSineParams};
pub use median_gravity::{GravitySchedule, MedianGravity, MedianGravityParams};
pub use orthogonal::{OrthogonalChaos, OrthogonalChaosParams, ORTHOGONAL_ARRAY};
pub use raptor::{RaptorHybrid, RaptorParams};

use std::fmt::Debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    agent::{Agent, GlobalBest, Solution},
    error::{MayflyError, Result},
    genetic::MutationOperator,
    movement::MovementGuide,
    optimizer::SearchContext,
    pareto::ParetoSolution,
    population::{compare_costs, Population},
};

/// Behaviour injected into the optimization loop.
///
/// Every hook has a no-op default, so a strategy only implements the points it
/// actually uses.
pub trait VariantStrategy: Debug {
    /// Short name used in logs and results.
    fn name(&self) -> &'static str;

    /// Called once per iteration before anything moves.
    fn begin_iteration(
        &mut self,
        _ctx: &mut SearchContext<'_>,
        _population: &Population,
        _best: &GlobalBest,
    ) -> Result<()> {
        Ok(())
    }

    /// Alternative attraction used by the movement equations this iteration.
    fn movement_guide(&self) -> Option<&MovementGuide> {
        None
    }

    /// Proposes an evaluated replacement for the regular movement of `agent`.
    ///
    /// `None` defers to the default movement rule.
    fn relocate(
        &mut self,
        _ctx: &mut SearchContext<'_>,
        _agent: &Agent,
        _population: &Population,
        _best: &GlobalBest,
    ) -> Result<Option<Solution>> {
        Ok(None)
    }

    /// Called after both sub-populations moved and were evaluated.
    fn after_movement(
        &mut self,
        _ctx: &mut SearchContext<'_>,
        _population: &mut Population,
        _best: &mut GlobalBest,
    ) -> Result<()> {
        Ok(())
    }

    /// Operator for this iteration's mutants. `None` keeps the configured one.
    fn mutation_operator(&self, _ctx: &SearchContext<'_>) -> Option<MutationOperator> {
        None
    }

    /// Called on the evaluated offspring (crossover children, then mutants)
    /// before they are merged into the population.
    fn after_mutation(
        &mut self,
        _ctx: &mut SearchContext<'_>,
        _offspring: &mut [Agent],
        _best: &mut GlobalBest,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after truncation selection, with both sub-populations sorted.
    fn after_selection(
        &mut self,
        _ctx: &mut SearchContext<'_>,
        _population: &mut Population,
        _best: &mut GlobalBest,
    ) -> Result<()> {
        Ok(())
    }

    /// The non-dominated solutions collected during the run, if any.
    fn pareto_front(&self) -> Vec<ParetoSolution> {
        Vec::new()
    }
}

/// Selects the enhancement applied on top of the base algorithm.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Variant {
    /// The plain algorithm.
    #[default]
    Baseline,
    /// Adaptive trust-region sampling around the global best.
    EliteSearch(EliteSearchParams),
    /// Orthogonal-design learning for elite males and chaotic offspring perturbation.
    OrthogonalChaos(OrthogonalChaosParams),
    /// Bare-bones Gaussian sampling with Lévy jumps and opposition for elites.
    BareBones(BareBonesParams),
    /// Golden-sine moves under simulated annealing, hybrid mutation and opposition.
    GoldenSineAnnealing(GoldenSineParams),
    /// Median-guided attraction with a decaying gravity coefficient.
    MedianGravity(MedianGravityParams),
    /// Four-phase hunting moves, opposition and a Pareto archive.
    RaptorHybrid(RaptorParams),
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Baseline => Baseline.name(),
            Variant::EliteSearch(_) => elite::NAME,
            Variant::OrthogonalChaos(_) => orthogonal::NAME,
            Variant::BareBones(_) => bare_bones::NAME,
            Variant::GoldenSineAnnealing(_) => golden_sine::NAME,
            Variant::MedianGravity(_) => median_gravity::NAME,
            Variant::RaptorHybrid(_) => raptor::NAME,
        }
    }

    /// Checks the variant's own parameters.
    pub fn validate(&self) -> Result<()> {
        match self {
            Variant::Baseline => Ok(()),
            Variant::EliteSearch(params) => params.validate(),
            Variant::OrthogonalChaos(params) => params.validate(),
            Variant::BareBones(params) => params.validate(),
            Variant::GoldenSineAnnealing(params) => params.validate(),
            Variant::MedianGravity(params) => params.validate(),
            Variant::RaptorHybrid(params) => params.validate(),
        }
    }

    /// Creates a fresh strategy object for one run.
    pub fn build(&self) -> Result<Box<dyn VariantStrategy>> {
        self.validate()?;
        Ok(match self {
            Variant::Baseline => Box::new(Baseline),
            Variant::EliteSearch(params) => Box::new(EliteSearch::new(params.clone())),
            Variant::OrthogonalChaos(params) => Box::new(OrthogonalChaos::new(params.clone())),
            Variant::BareBones(params) => Box::new(BareBones::new(params.clone())),
            Variant::GoldenSineAnnealing(params) => {
                Box::new(GoldenSineAnnealing::new(params.clone()))
            }
            Variant::MedianGravity(params) => Box::new(MedianGravity::new(params.clone())),
            Variant::RaptorHybrid(params) => Box::new(RaptorHybrid::new(params.clone())?),
        })
    }
}

/// The strategy of the plain algorithm: every hook is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct Baseline;

impl VariantStrategy for Baseline {
    fn name(&self) -> &'static str {
        "baseline"
    }
}

/// Indices of the `k` lowest-cost agents, best first.
pub(crate) fn elite_indices(agents: &[Agent], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..agents.len()).collect();
    order.sort_by(|&a, &b| compare_costs(agents[a].cost, agents[b].cost));
    order.truncate(k);
    order
}

/// Evaluates `position` and moves `agent` there if it is strictly better.
///
/// Returns `true` if the agent moved; the global best is updated accordingly.
pub(crate) fn try_improve(
    ctx: &mut SearchContext<'_>,
    agent: &mut Agent,
    position: Vec<f64>,
    best: &mut GlobalBest,
) -> Result<bool> {
    let cost = ctx.evaluate(&position)?;
    if cost < agent.cost {
        agent.relocate(position, cost);
        agent.record_personal_best();
        best.offer_agent(agent);
        return Ok(true);
    }
    Ok(false)
}

pub(crate) fn check_probability(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(MayflyError::Configuration(format!(
            "{} must be between 0.0 and 1.0, got {}",
            name, value
        )));
    }
    Ok(())
}

pub(crate) fn check_positive(name: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(MayflyError::Configuration(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

pub(crate) fn check_count(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(MayflyError::Configuration(format!(
            "{} must be greater than 0",
            name
        )));
    }
    Ok(())
}
