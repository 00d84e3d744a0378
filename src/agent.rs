//! # Agents
//!
//! An [`Agent`] is one candidate solution: a position, a velocity, the cost of the
//! position and, for males only, a personal-best record. A [`Solution`] is a bare
//! position/cost pair, and [`GlobalBest`] is the run-wide record that only ever
//! moves to a strictly lower cost.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position together with its cost.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub position: Vec<f64>,
    pub cost: f64,
}

impl Solution {
    pub fn new(position: Vec<f64>, cost: f64) -> Self {
        Self { position, cost }
    }
}

/// One candidate solution of the population.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub cost: f64,
    /// The best position this agent ever held. Only males keep one.
    pub personal_best: Option<Solution>,
}

impl Agent {
    /// Creates a male at rest whose personal best is its current position.
    pub fn male(position: Vec<f64>, cost: f64) -> Self {
        let velocity = vec![0.0; position.len()];
        let personal_best = Some(Solution::new(position.clone(), cost));
        Self {
            position,
            velocity,
            cost,
            personal_best,
        }
    }

    /// Creates a female at rest. Females do not track a personal best.
    pub fn female(position: Vec<f64>, cost: f64) -> Self {
        let velocity = vec![0.0; position.len()];
        Self {
            position,
            velocity,
            cost,
            personal_best: None,
        }
    }

    pub fn is_male(&self) -> bool {
        self.personal_best.is_some()
    }

    /// Moves the agent to an already evaluated position, keeping its velocity.
    pub fn relocate(&mut self, position: Vec<f64>, cost: f64) {
        self.position = position;
        self.cost = cost;
    }

    /// Updates the personal best if the current cost improves on it.
    ///
    /// Returns `true` if the record changed. Females never record anything.
    pub fn record_personal_best(&mut self) -> bool {
        match self.personal_best.as_mut() {
            Some(best) if self.cost < best.cost => {
                best.position.clone_from(&self.position);
                best.cost = self.cost;
                true
            }
            _ => false,
        }
    }

    pub fn to_solution(&self) -> Solution {
        Solution::new(self.position.clone(), self.cost)
    }
}

/// The best position found by any agent during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalBest {
    solution: Solution,
}

impl GlobalBest {
    /// Creates an empty record. The first offer is always accepted.
    pub fn new() -> Self {
        Self {
            solution: Solution::new(Vec::new(), f64::INFINITY),
        }
    }

    /// Replaces the record if `cost` is strictly lower than the current one.
    ///
    /// Returns `true` if the record changed.
    pub fn offer(&mut self, position: &[f64], cost: f64) -> bool {
        if cost < self.solution.cost || self.solution.position.is_empty() {
            self.solution.position = position.to_vec();
            self.solution.cost = cost;
            return true;
        }
        false
    }

    /// Offers the current position of `agent`.
    pub fn offer_agent(&mut self, agent: &Agent) -> bool {
        self.offer(&agent.position, agent.cost)
    }

    pub fn position(&self) -> &[f64] {
        &self.solution.position
    }

    pub fn cost(&self) -> f64 {
        self.solution.cost
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn into_solution(self) -> Solution {
        self.solution
    }
}

impl Default for GlobalBest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_male_tracks_personal_best() {
        let mut male = Agent::male(vec![1.0, 1.0], 2.0);
        assert!(male.is_male());

        male.relocate(vec![2.0, 2.0], 8.0);
        assert!(!male.record_personal_best());
        assert_eq!(male.personal_best.as_ref().unwrap().cost, 2.0);

        male.relocate(vec![0.5, 0.0], 0.25);
        assert!(male.record_personal_best());
        let best = male.personal_best.as_ref().unwrap();
        assert_eq!(best.position, vec![0.5, 0.0]);
        assert_eq!(best.cost, 0.25);
    }

    #[test]
    fn test_female_has_no_personal_best() {
        let mut female = Agent::female(vec![3.0], 9.0);
        assert!(!female.is_male());
        female.relocate(vec![0.0], 0.0);
        assert!(!female.record_personal_best());
        assert!(female.personal_best.is_none());
    }

    #[test]
    fn test_global_best_only_improves() {
        let mut best = GlobalBest::new();
        assert!(best.offer(&[1.0], 5.0));
        assert!(!best.offer(&[2.0], 5.0));
        assert!(!best.offer(&[3.0], 7.0));
        assert!(best.offer(&[0.5], 1.0));
        assert_eq!(best.position(), &[0.5]);
        assert_eq!(best.cost(), 1.0);
    }

    #[test]
    fn test_first_offer_accepted_even_if_infinite() {
        let mut best = GlobalBest::new();
        assert!(best.offer(&[4.0], f64::INFINITY));
        assert_eq!(best.position(), &[4.0]);
    }
}
