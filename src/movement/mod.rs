//! # Movement
//!
//! Velocity-based movement of both sub-populations.
//!
//! Males are pulled toward their personal best and toward the global best, each
//! pull fading as `exp(-β·r²)` with the Euclidean distance `r`. The male sitting on
//! the global best performs a nuptial dance instead: a uniform random walk of
//! radius `dance`. Females that are worse than the male of the same rank are
//! attracted to him; the others perform a random flight of scale `flight`.
//!
//! Positions and velocities are clamped after every update, and the inertia, dance
//! and flight coefficients decay geometrically once per iteration.
pub mod coefficients;

pub use coefficients::Coefficients;

use crate::{
    agent::Agent,
    population::distance,
    problem::{Problem, VelocityBounds},
    rng::RandomNumberGenerator,
};

/// Distance to the global best below which a male is considered to hold it.
pub const NUPTIAL_EPSILON: f64 = 1e-12;

/// Replaces or augments the global-best attraction of the movement equations.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementGuide {
    /// Alternative attraction point, e.g. the population median.
    pub target: Vec<f64>,
    /// Blend between global best (`0.0`) and `target` (`1.0`) for the social pull.
    pub target_weight: f64,
    /// Multiplier applied to every attraction term.
    pub gravity: f64,
}

impl MovementGuide {
    fn social_target(&self, global_best: &[f64]) -> Vec<f64> {
        global_best
            .iter()
            .zip(&self.target)
            .map(|(g, t)| (1.0 - self.target_weight) * g + self.target_weight * t)
            .collect()
    }
}

/// Computes new velocities and positions for males and females.
#[derive(Debug, Clone)]
pub struct MovementEngine {
    coefficients: Coefficients,
    velocity_bounds: VelocityBounds,
}

impl MovementEngine {
    pub fn new(coefficients: Coefficients, velocity_bounds: VelocityBounds) -> Self {
        Self {
            coefficients,
            velocity_bounds,
        }
    }

    /// The current, already damped, coefficients.
    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    pub fn velocity_bounds(&self) -> &VelocityBounds {
        &self.velocity_bounds
    }

    /// Moves one male. The caller evaluates the new position.
    pub fn move_male(
        &self,
        rng: &mut RandomNumberGenerator,
        problem: &Problem,
        male: &mut Agent,
        global_best: &[f64],
        guide: Option<&MovementGuide>,
    ) {
        let c = &self.coefficients;

        if distance(&male.position, global_best) < NUPTIAL_EPSILON {
            for x in male.position.iter_mut() {
                *x += c.dance * rng.uniform_range(-1.0, 1.0);
            }
            male.velocity.iter_mut().for_each(|v| *v = 0.0);
            problem.clamp_position(&mut male.position);
            return;
        }

        let personal_best = male
            .personal_best
            .as_ref()
            .map(|best| best.position.clone())
            .unwrap_or_else(|| male.position.clone());
        let (social_target, gravity) = match guide {
            Some(guide) => (guide.social_target(global_best), guide.gravity),
            None => (global_best.to_vec(), 1.0),
        };

        let r_pb = distance(&male.position, &personal_best);
        let r_gb = distance(&male.position, &social_target);
        let cognitive = gravity * c.a1 * (-c.beta * r_pb * r_pb).exp();
        let social = gravity * c.a2 * (-c.beta * r_gb * r_gb).exp();

        for d in 0..male.position.len() {
            let x = male.position[d];
            male.velocity[d] = c.g * male.velocity[d]
                + cognitive * (personal_best[d] - x)
                + social * (social_target[d] - x);
        }
        self.advance(problem, male);
    }

    /// Moves one female toward `male`, her partner of equal rank, or lets her
    /// fly at random when she is not worse than him or has no partner.
    pub fn move_female(
        &self,
        rng: &mut RandomNumberGenerator,
        problem: &Problem,
        female: &mut Agent,
        male: Option<&Agent>,
        guide: Option<&MovementGuide>,
    ) {
        let c = &self.coefficients;

        match male {
            Some(male) if female.cost > male.cost => {
                let gravity = guide.map_or(1.0, |guide| guide.gravity);
                let r_mf = distance(&female.position, &male.position);
                let attraction = gravity * c.a3 * (-c.beta * r_mf * r_mf).exp();
                for d in 0..female.position.len() {
                    female.velocity[d] = c.g * female.velocity[d]
                        + attraction * (male.position[d] - female.position[d]);
                }
                self.advance(problem, female);
            }
            _ => {
                for x in female.position.iter_mut() {
                    *x += c.flight * rng.standard_normal();
                }
                female.velocity.iter_mut().for_each(|v| *v = 0.0);
                problem.clamp_position(&mut female.position);
            }
        }
    }

    /// Applies the end-of-iteration decay of inertia, dance and flight.
    pub fn damp(&mut self) {
        self.coefficients.damp();
    }

    fn advance(&self, problem: &Problem, agent: &mut Agent) {
        self.velocity_bounds.clamp_velocity(&mut agent.velocity);
        for (x, v) in agent.position.iter_mut().zip(&agent.velocity) {
            *x += v;
        }
        problem.clamp_position(&mut agent.position);
    }
}
