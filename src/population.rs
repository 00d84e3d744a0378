//! # Population
//!
//! The population is split into two disjoint sub-populations: males, which track a
//! personal best, and females, which do not. After every sort both sequences are in
//! ascending order of cost, and pairing for mating is done by rank.

use std::cmp::Ordering;

use crate::agent::{Agent, Solution};

/// Orders costs ascending. NaN sorts after every other value.
pub fn compare_costs(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| {
        if a.is_nan() && b.is_nan() {
            Ordering::Equal
        } else if a.is_nan() {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    })
}

/// Sorts agents by ascending cost. The sort is stable.
pub fn sort_by_cost(agents: &mut [Agent]) {
    agents.sort_by(|a, b| compare_costs(a.cost, b.cost));
}

/// Returns the per-dimension mean position of `agents`.
pub fn mean_position<'a, I>(agents: I, dimensions: usize) -> Vec<f64>
where
    I: IntoIterator<Item = &'a Agent>,
{
    let mut mean = vec![0.0; dimensions];
    let mut count = 0usize;
    for agent in agents {
        for (m, x) in mean.iter_mut().zip(&agent.position) {
            *m += x;
        }
        count += 1;
    }
    if count > 0 {
        for m in mean.iter_mut() {
            *m /= count as f64;
        }
    }
    mean
}

/// Euclidean distance between two positions.
pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// The male and female sub-populations of one run.
#[derive(Debug, Clone, Default)]
pub struct Population {
    pub males: Vec<Agent>,
    pub females: Vec<Agent>,
}

impl Population {
    pub fn new(males: Vec<Agent>, females: Vec<Agent>) -> Self {
        Self { males, females }
    }

    pub fn len(&self) -> usize {
        self.males.len() + self.females.len()
    }

    pub fn is_empty(&self) -> bool {
        self.males.is_empty() && self.females.is_empty()
    }

    /// Sorts both sub-populations ascending by cost.
    pub fn sort(&mut self) {
        sort_by_cost(&mut self.males);
        sort_by_cost(&mut self.females);
    }

    /// Iterates over every agent, males first.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.males.iter().chain(self.females.iter())
    }

    /// Replaces the worst male with `solution` if it is strictly better.
    ///
    /// Returns `true` if the population changed.
    pub fn replace_worst_male(&mut self, solution: &Solution) -> bool {
        let worst = self
            .males
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| compare_costs(a.cost, b.cost))
            .map(|(idx, _)| idx);

        match worst {
            Some(idx) if solution.cost < self.males[idx].cost => {
                self.males[idx] = Agent::male(solution.position.clone(), solution.cost);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_costs_nan_last() {
        let mut costs = [3.0, f64::NAN, 1.0, 2.0];
        costs.sort_by(|a, b| compare_costs(*a, *b));
        assert_eq!(&costs[..3], &[1.0, 2.0, 3.0]);
        assert!(costs[3].is_nan());
    }

    #[test]
    fn test_sort_population() {
        let mut population = Population::new(
            vec![Agent::male(vec![2.0], 4.0), Agent::male(vec![1.0], 1.0)],
            vec![Agent::female(vec![3.0], 9.0), Agent::female(vec![0.0], 0.0)],
        );
        population.sort();
        assert_eq!(population.males[0].cost, 1.0);
        assert_eq!(population.females[0].cost, 0.0);
        assert_eq!(population.len(), 4);
    }

    #[test]
    fn test_mean_and_distance() {
        let agents = [Agent::female(vec![0.0, 2.0], 0.0), Agent::female(vec![2.0, 4.0], 0.0)];
        assert_eq!(mean_position(agents.iter(), 2), vec![1.0, 3.0]);
        assert_eq!(distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
    }

    #[test]
    fn test_replace_worst_male() {
        let mut population = Population::new(
            vec![Agent::male(vec![1.0], 1.0), Agent::male(vec![5.0], 25.0)],
            Vec::new(),
        );
        assert!(population.replace_worst_male(&Solution::new(vec![0.5], 0.25)));
        assert_eq!(population.males[1].cost, 0.25);
        assert!(population.males[1].is_male());
        assert!(!population.replace_worst_male(&Solution::new(vec![3.0], 9.0)));
    }
}
