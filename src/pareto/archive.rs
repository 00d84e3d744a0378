use tracing::trace;

use super::{crowding_distance, descending_crowding, fast_non_dominated_sort};
use crate::error::{ensure_dimensions, MayflyError, Result};

/// A position with its vector of objective values.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ParetoSolution {
    pub position: Vec<f64>,
    pub objectives: Vec<f64>,
}

impl ParetoSolution {
    pub fn new(position: Vec<f64>, objectives: Vec<f64>) -> Self {
        Self {
            position,
            objectives,
        }
    }
}

/// A bounded archive of solutions ranked by Pareto dominance.
///
/// Insertion appends; once the archive exceeds its capacity it is re-ranked by
/// non-dominated sorting and whole fronts are kept in rank order. The last front
/// that does not fit entirely is thinned by descending crowding distance, so its
/// boundary members always survive.
#[derive(Debug, Clone)]
pub struct ParetoArchive {
    capacity: usize,
    solutions: Vec<ParetoSolution>,
}

impl ParetoArchive {
    /// Creates an empty archive.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(MayflyError::Configuration(
                "Archive capacity must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            capacity,
            solutions: Vec::with_capacity(capacity + 1),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn solutions(&self) -> &[ParetoSolution] {
        &self.solutions
    }

    /// Adds one solution, trimming the archive if it grows past capacity.
    ///
    /// A position that is already archived is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the number of objectives differs from the
    /// solutions already stored.
    pub fn insert(&mut self, solution: ParetoSolution) -> Result<()> {
        self.push(solution)?;
        if self.solutions.len() > self.capacity {
            self.trim();
        }
        Ok(())
    }

    /// Inserts every solution of `solutions`, re-ranking at most once.
    pub fn extend<I>(&mut self, solutions: I) -> Result<()>
    where
        I: IntoIterator<Item = ParetoSolution>,
    {
        for solution in solutions {
            self.push(solution)?;
        }
        if self.solutions.len() > self.capacity {
            self.trim();
        }
        Ok(())
    }

    fn push(&mut self, solution: ParetoSolution) -> Result<()> {
        if let Some(first) = self.solutions.first() {
            ensure_dimensions(first.objectives.len(), solution.objectives.len())?;
        }
        if self
            .solutions
            .iter()
            .any(|s| s.position == solution.position)
        {
            return Ok(());
        }
        self.solutions.push(solution);
        Ok(())
    }

    /// Returns the first non-dominated front of the archive.
    pub fn front(&self) -> Vec<ParetoSolution> {
        let objectives = self.objectives();
        fast_non_dominated_sort(&objectives)
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(|idx| self.solutions[idx].clone())
            .collect()
    }

    fn objectives(&self) -> Vec<Vec<f64>> {
        self.solutions.iter().map(|s| s.objectives.clone()).collect()
    }

    fn trim(&mut self) {
        let objectives = self.objectives();
        let mut keep: Vec<usize> = Vec::with_capacity(self.capacity);

        for front in fast_non_dominated_sort(&objectives) {
            let room = self.capacity - keep.len();
            if front.len() <= room {
                keep.extend(front);
            } else {
                let distances = crowding_distance(&objectives, &front);
                let mut order: Vec<usize> = (0..front.len()).collect();
                order.sort_by(|&a, &b| descending_crowding(distances[a], distances[b]));
                keep.extend(order.into_iter().take(room).map(|k| front[k]));
            }
            if keep.len() == self.capacity {
                break;
            }
        }

        keep.sort_unstable();
        let mut kept = Vec::with_capacity(self.capacity + 1);
        let mut next = keep.into_iter().peekable();
        for (idx, solution) in self.solutions.drain(..).enumerate() {
            if next.peek() == Some(&idx) {
                kept.push(solution);
                next.next();
            }
        }
        self.solutions = kept;
        trace!(size = self.solutions.len(), "archive trimmed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution(f1: f64, f2: f64) -> ParetoSolution {
        ParetoSolution::new(vec![f1], vec![f1, f2])
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(ParetoArchive::new(0).is_err());
    }

    #[test]
    fn test_dominated_solutions_dropped_first() {
        let mut archive = ParetoArchive::new(3).unwrap();
        archive
            .extend(vec![
                solution(1.0, 4.0),
                solution(5.0, 5.0),
                solution(2.0, 2.0),
                solution(4.0, 1.0),
            ])
            .unwrap();

        assert_eq!(archive.len(), 3);
        assert!(archive
            .solutions()
            .iter()
            .all(|s| s.objectives != vec![5.0, 5.0]));
    }

    #[test]
    fn test_partial_front_keeps_extremes() {
        let mut archive = ParetoArchive::new(3).unwrap();
        for i in 0..6 {
            let f1 = i as f64;
            archive.insert(solution(f1, 5.0 - f1)).unwrap();
        }
        assert_eq!(archive.len(), 3);
        let firsts: Vec<f64> = archive.solutions().iter().map(|s| s.objectives[0]).collect();
        assert!(firsts.contains(&0.0));
        assert!(firsts.contains(&5.0));
    }

    #[test]
    fn test_under_capacity_keeps_everything() {
        let mut archive = ParetoArchive::new(10).unwrap();
        archive.extend(vec![solution(1.0, 1.0), solution(2.0, 2.0)]).unwrap();
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.front(), vec![solution(1.0, 1.0)]);
    }

    #[test]
    fn test_objective_count_mismatch() {
        let mut archive = ParetoArchive::new(4).unwrap();
        archive.insert(solution(1.0, 1.0)).unwrap();
        let bad = ParetoSolution::new(vec![0.0], vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            archive.insert(bad),
            Err(MayflyError::DimensionMismatch { expected: 2, found: 3 })
        ));
    }

    #[test]
    fn test_duplicate_position_ignored() {
        let mut archive = ParetoArchive::new(4).unwrap();
        archive.insert(solution(1.0, 1.0)).unwrap();
        archive.insert(solution(1.0, 1.0)).unwrap();
        assert_eq!(archive.len(), 1);
    }
}
