//! # Pareto Utilities
//!
//! Dominance, fast non-dominated sorting and crowding distance over vector-valued
//! costs (all objectives minimized), the bounded [`ParetoArchive`] built on top of
//! them, and two quality indicators used to evaluate fronts from outside the engine.
pub mod archive;
pub mod metrics;

pub use archive::{ParetoArchive, ParetoSolution};
pub use metrics::{hypervolume_2d, inverted_generational_distance};

use std::cmp::Ordering;

use crate::population::compare_costs;

/// Returns `true` if `a` is no worse than `b` in every objective and strictly
/// better in at least one.
///
/// ```rust
/// use mayfly::pareto::dominates;
///
/// assert!(dominates(&[1.0, 2.0], &[2.0, 3.0]));
/// assert!(!dominates(&[2.0, 3.0], &[1.0, 2.0]));
/// assert!(!dominates(&[1.0, 3.0], &[2.0, 2.0]));
/// assert!(!dominates(&[2.0, 2.0], &[1.0, 3.0]));
/// ```
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    let mut strictly_better = false;
    for (x, y) in a.iter().zip(b) {
        if x > y {
            return false;
        }
        if x < y {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Partitions `objectives` into ranked fronts of indices.
///
/// Front 0 holds the non-dominated solutions, front 1 those dominated only by
/// front 0, and so on. Runs in `O(m·n²)`.
pub fn fast_non_dominated_sort(objectives: &[Vec<f64>]) -> Vec<Vec<usize>> {
    let n = objectives.len();
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut domination_count = vec![0usize; n];
    let mut fronts: Vec<Vec<usize>> = Vec::new();
    let mut current = Vec::new();

    for p in 0..n {
        for q in 0..n {
            if p == q {
                continue;
            }
            if dominates(&objectives[p], &objectives[q]) {
                dominated_by[p].push(q);
            } else if dominates(&objectives[q], &objectives[p]) {
                domination_count[p] += 1;
            }
        }
        if domination_count[p] == 0 {
            current.push(p);
        }
    }

    while !current.is_empty() {
        let mut next = Vec::new();
        for &p in &current {
            for &q in &dominated_by[p] {
                domination_count[q] -= 1;
                if domination_count[q] == 0 {
                    next.push(q);
                }
            }
        }
        next.sort_unstable();
        fronts.push(current);
        current = next;
    }

    fronts
}

/// Crowding distance of every member of one front.
///
/// `front` lists indices into `objectives`; the result is aligned with `front`.
/// Boundary members of each objective get `f64::INFINITY`, interior members the
/// sum over objectives of the normalized gap between their two neighbours.
pub fn crowding_distance(objectives: &[Vec<f64>], front: &[usize]) -> Vec<f64> {
    let size = front.len();
    if size <= 2 {
        return vec![f64::INFINITY; size];
    }

    let mut distances = vec![0.0; size];
    let objective_count = objectives[front[0]].len();

    for m in 0..objective_count {
        let mut order: Vec<usize> = (0..size).collect();
        order.sort_by(|&a, &b| compare_costs(objectives[front[a]][m], objectives[front[b]][m]));

        let min = objectives[front[order[0]]][m];
        let max = objectives[front[order[size - 1]]][m];
        distances[order[0]] = f64::INFINITY;
        distances[order[size - 1]] = f64::INFINITY;

        let span = max - min;
        if !(span > 0.0) || !span.is_finite() {
            continue;
        }

        for k in 1..size - 1 {
            let idx = order[k];
            if distances[idx].is_infinite() {
                continue;
            }
            let gap = objectives[front[order[k + 1]]][m] - objectives[front[order[k - 1]]][m];
            distances[idx] += gap / span;
        }
    }

    distances
}

/// Orders two crowding distances so that larger (more isolated) comes first.
pub(crate) fn descending_crowding(a: f64, b: f64) -> Ordering {
    compare_costs(b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominance() {
        assert!(dominates(&[1.0, 2.0], &[2.0, 3.0]));
        assert!(!dominates(&[2.0, 3.0], &[1.0, 2.0]));
        assert!(!dominates(&[1.0, 3.0], &[2.0, 2.0]));
        assert!(!dominates(&[2.0, 2.0], &[1.0, 3.0]));
        // equal vectors do not dominate each other
        assert!(!dominates(&[1.0, 1.0], &[1.0, 1.0]));
        assert!(dominates(&[1.0, 1.0], &[1.0, 2.0]));
    }

    #[test]
    fn test_non_dominated_sort() {
        let objectives = vec![
            vec![1.0, 5.0], // 0: front 0
            vec![2.0, 3.0], // 1: front 0
            vec![4.0, 1.0], // 2: front 0
            vec![3.0, 4.0], // 3: front 1
            vec![5.0, 5.0], // 4: front 2
        ];
        let fronts = fast_non_dominated_sort(&objectives);
        assert_eq!(fronts, vec![vec![0, 1, 2], vec![3], vec![4]]);
    }

    #[test]
    fn test_non_dominated_sort_covers_everything() {
        let objectives: Vec<Vec<f64>> = (0..20)
            .map(|i| vec![(i % 5) as f64, (i / 5) as f64])
            .collect();
        let fronts = fast_non_dominated_sort(&objectives);
        let mut all: Vec<usize> = fronts.concat();
        all.sort_unstable();
        assert_eq!(all, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_crowding_boundaries_are_infinite() {
        let objectives = vec![
            vec![1.0, 4.0],
            vec![2.0, 3.0],
            vec![3.0, 2.0],
            vec![4.0, 1.0],
        ];
        let front = vec![0, 1, 2, 3];
        let distances = crowding_distance(&objectives, &front);
        assert!(distances[0].is_infinite());
        assert!(distances[3].is_infinite());
        assert!((distances[1] - (2.0 / 3.0 + 2.0 / 3.0)).abs() < 1e-12);
        assert!((distances[2] - (2.0 / 3.0 + 2.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_crowding_small_fronts() {
        let objectives = vec![vec![1.0, 2.0], vec![2.0, 1.0]];
        assert_eq!(crowding_distance(&objectives, &[0, 1]), vec![f64::INFINITY; 2]);
        assert!(crowding_distance(&objectives, &[]).is_empty());
    }
}
