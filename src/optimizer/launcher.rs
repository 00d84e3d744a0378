use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    context::SearchContext,
    options::{LogLevel, OptimizationOptions},
};
use crate::{
    agent::{Agent, GlobalBest, Solution},
    error::Result,
    genetic::crossover,
    movement::MovementEngine,
    objective::Objective,
    pareto::ParetoSolution,
    population::Population,
    rng::RandomNumberGenerator,
    selection::TruncationSelection,
    variants::VariantStrategy,
};

/// The outcome of one run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// The best position found and its cost.
    pub global_best: Solution,
    /// Global-best cost at the end of every iteration. Non-increasing.
    pub cost_history: Vec<f64>,
    /// Objective evaluations spent, initialization included.
    pub evaluation_count: usize,
    pub iteration_count: usize,
    /// Name of the variant that ran.
    pub variant: String,
    /// Non-dominated solutions collected by the variant. Empty for most variants.
    pub pareto_front: Vec<ParetoSolution>,
}

/// Runs the optimizer on one objective.
#[derive(Debug, Clone)]
pub struct OptimizationLauncher<O>
where
    O: Objective,
{
    objective: O,
}

impl<O> OptimizationLauncher<O>
where
    O: Objective,
{
    /// Creates a new `OptimizationLauncher` for `objective`.
    pub fn new(objective: O) -> Self {
        Self { objective }
    }

    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Minimizes the objective from a random initial population.
    ///
    /// Every stochastic step draws from `rng` in a fixed order, so two runs with
    /// equal options and equally seeded generators return identical results.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The options fail validation
    /// - The objective returns NaN
    /// - The objective expects a different dimensionality
    pub fn run(
        &self,
        options: &OptimizationOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<OptimizationResult> {
        options.validate()?;

        let problem = options.get_problem();
        let max_iterations = options.get_max_iterations();
        let mut strategy = options.get_variant().build()?;
        let mut engine = MovementEngine::new(
            options.get_coefficients().clone(),
            options.get_velocity_bounds(),
        );
        let male_selection = TruncationSelection::new(options.get_male_population_size());
        let female_selection = TruncationSelection::new(options.get_female_population_size());
        let log_level = options.get_log_level().clone();
        let logging = !matches!(log_level, LogLevel::None);

        let mut ctx = SearchContext::new(
            &self.objective,
            problem,
            rng,
            max_iterations,
            log_level,
        );

        let males = (0..options.get_male_population_size())
            .map(|_| spawn(&mut ctx).map(|s| Agent::male(s.position, s.cost)))
            .collect::<Result<Vec<_>>>()?;
        let females = (0..options.get_female_population_size())
            .map(|_| spawn(&mut ctx).map(|s| Agent::female(s.position, s.cost)))
            .collect::<Result<Vec<_>>>()?;
        let mut population = Population::new(males, females);
        population.sort();

        let mut best = GlobalBest::new();
        for agent in population.agents() {
            best.offer_agent(agent);
        }

        if logging {
            info!(
                variant = strategy.name(),
                dimensions = problem.dimensions,
                males = population.males.len(),
                females = population.females.len(),
                max_iterations,
                initial_cost = best.cost(),
                "starting run"
            );
        }

        let mut cost_history = Vec::with_capacity(max_iterations);
        for iteration in 0..max_iterations {
            ctx.set_iteration(iteration);
            strategy.begin_iteration(&mut ctx, &population, &best)?;

            move_males(&mut ctx, &engine, strategy.as_mut(), &mut population, &mut best)?;
            move_females(&mut ctx, &engine, strategy.as_mut(), &mut population, &mut best)?;
            strategy.after_movement(&mut ctx, &mut population, &mut best)?;
            population.sort();

            let mut offspring = mate(&mut ctx, options, &population)?;
            offspring.extend(mutate(&mut ctx, options, strategy.as_ref(), &population)?);
            strategy.after_mutation(&mut ctx, &mut offspring, &mut best)?;
            for child in offspring.iter() {
                best.offer_agent(child);
            }

            let female_children: Vec<Agent> = offspring
                .split_off((offspring.len() + 1) / 2)
                .into_iter()
                .map(|child| Agent::female(child.position, child.cost))
                .collect();
            let male_children: Vec<Agent> = offspring
                .into_iter()
                .map(|child| Agent::male(child.position, child.cost))
                .collect();
            population.males =
                male_selection.merge(std::mem::take(&mut population.males), male_children)?;
            population.females =
                female_selection.merge(std::mem::take(&mut population.females), female_children)?;

            strategy.after_selection(&mut ctx, &mut population, &mut best)?;
            population.sort();

            cost_history.push(best.cost());

            if logging {
                info!(iteration, best_cost = best.cost(), "iteration finished");
            }
            if ctx.is_verbose() {
                let c = engine.coefficients();
                debug!(
                    iteration,
                    best_male = population.males.first().map_or(f64::INFINITY, |a| a.cost),
                    best_female = population.females.first().map_or(f64::INFINITY, |a| a.cost),
                    g = c.g,
                    dance = c.dance,
                    flight = c.flight,
                    evaluations = ctx.evaluations(),
                    "sub-population state"
                );
            }

            engine.damp();
        }

        let evaluation_count = ctx.evaluations();
        if logging {
            info!(
                best_cost = best.cost(),
                evaluations = evaluation_count,
                "run finished"
            );
        }

        Ok(OptimizationResult {
            global_best: best.into_solution(),
            cost_history,
            evaluation_count,
            iteration_count: max_iterations,
            variant: strategy.name().to_string(),
            pareto_front: strategy.pareto_front(),
        })
    }

    /// Performs one independent run per seed.
    ///
    /// Runs go parallel when there are at least `parallel_threshold` seeds. Each
    /// run owns its generator, so the results equal sequential runs with the
    /// same seeds and come back in seed order.
    pub fn run_batch(
        &self,
        options: &OptimizationOptions,
        seeds: &[u64],
    ) -> Result<Vec<OptimizationResult>> {
        options.validate()?;

        let run_seeded = |seed: &u64| {
            let mut rng = RandomNumberGenerator::from_seed(*seed);
            self.run(options, &mut rng)
        };

        if seeds.len() >= options.get_parallel_threshold() {
            seeds.par_iter().map(run_seeded).collect()
        } else {
            seeds.iter().map(run_seeded).collect()
        }
    }
}

/// Draws and evaluates one uniformly random position.
fn spawn(ctx: &mut SearchContext<'_>) -> Result<Solution> {
    let position = ctx.problem().random_position(ctx.rng());
    let cost = ctx.evaluate(&position)?;
    Ok(Solution::new(position, cost))
}

fn move_males(
    ctx: &mut SearchContext<'_>,
    engine: &MovementEngine,
    strategy: &mut dyn VariantStrategy,
    population: &mut Population,
    best: &mut GlobalBest,
) -> Result<()> {
    let problem = ctx.problem();
    for idx in 0..population.males.len() {
        let proposal = strategy.relocate(ctx, &population.males[idx], population, best)?;
        let male = &mut population.males[idx];
        match proposal {
            Some(solution) => male.relocate(solution.position, solution.cost),
            None => {
                engine.move_male(
                    ctx.rng(),
                    problem,
                    male,
                    best.position(),
                    strategy.movement_guide(),
                );
                male.cost = ctx.evaluate(&male.position)?;
            }
        }
        male.record_personal_best();
        best.offer_agent(male);
    }
    Ok(())
}

/// Females pair with the male of the same rank; those without one fly at random.
fn move_females(
    ctx: &mut SearchContext<'_>,
    engine: &MovementEngine,
    strategy: &mut dyn VariantStrategy,
    population: &mut Population,
    best: &mut GlobalBest,
) -> Result<()> {
    let problem = ctx.problem();
    for idx in 0..population.females.len() {
        let proposal = strategy.relocate(ctx, &population.females[idx], population, best)?;
        let female = &mut population.females[idx];
        match proposal {
            Some(solution) => female.relocate(solution.position, solution.cost),
            None => {
                engine.move_female(
                    ctx.rng(),
                    problem,
                    female,
                    population.males.get(idx),
                    strategy.movement_guide(),
                );
                female.cost = ctx.evaluate(&female.position)?;
            }
        }
        best.offer_agent(female);
    }
    Ok(())
}

/// Crossover of rank-paired parents. An odd offspring count drops the last
/// pair's second child unevaluated.
fn mate(
    ctx: &mut SearchContext<'_>,
    options: &OptimizationOptions,
    population: &Population,
) -> Result<Vec<Agent>> {
    let count = options.get_mating().offspring_count;
    let problem = ctx.problem();
    let mut children = Vec::with_capacity(count);

    for k in 0..(count + 1) / 2 {
        let father = &population.males[k % population.males.len()];
        let mother = &population.females[k % population.females.len()];
        let (first, second) = crossover(ctx.rng(), &father.position, &mother.position, problem)?;
        for position in [first, second] {
            if children.len() == count {
                break;
            }
            let cost = ctx.evaluate(&position)?;
            children.push(Agent::female(position, cost));
        }
    }
    Ok(children)
}

/// Mutants of uniformly chosen males.
fn mutate(
    ctx: &mut SearchContext<'_>,
    options: &OptimizationOptions,
    strategy: &dyn VariantStrategy,
    population: &Population,
) -> Result<Vec<Agent>> {
    let mating = options.get_mating();
    let count = mating.resolved_mutant_count(options.get_male_population_size());
    let operator = strategy
        .mutation_operator(ctx)
        .unwrap_or(mating.mutation_operator);
    let problem = ctx.problem();

    let mut mutants = Vec::with_capacity(count);
    for _ in 0..count {
        let parent = &population.males[ctx.rng().index(population.males.len())];
        let position = operator.apply(ctx.rng(), &parent.position, mating.mutation_rate, problem);
        let cost = ctx.evaluate(&position)?;
        mutants.push(Agent::female(position, cost));
    }
    Ok(mutants)
}
