use crate::agent::Agent;
use crate::error::{MayflyError, Result};
use crate::population::sort_by_cost;

/// A (μ+λ) truncation selection.
///
/// Offspring are merged into their parent sub-population, the union is sorted
/// ascending by cost and cut back to the configured size. Ties keep insertion
/// order, so parents win over equally good offspring.
///
/// # Examples
///
/// ```
/// use mayfly::agent::Agent;
/// use mayfly::selection::TruncationSelection;
///
/// let parents = vec![Agent::female(vec![3.0], 9.0), Agent::female(vec![1.0], 1.0)];
/// let offspring = vec![Agent::female(vec![0.5], 0.25)];
///
/// let survivors = TruncationSelection::new(2).merge(parents, offspring).unwrap();
/// assert_eq!(survivors.len(), 2);
/// assert_eq!(survivors[0].cost, 0.25);
/// assert_eq!(survivors[1].cost, 1.0);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncationSelection {
    size: usize,
}

impl TruncationSelection {
    /// Creates a selection that keeps `size` agents.
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Sorts `agents` ascending by cost and keeps the best `size`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if there is nothing to select from.
    pub fn select(&self, mut agents: Vec<Agent>) -> Result<Vec<Agent>> {
        if agents.is_empty() {
            return Err(MayflyError::EmptyPopulation);
        }
        sort_by_cost(&mut agents);
        agents.truncate(self.size);
        Ok(agents)
    }

    /// Appends `offspring` to `parents` and selects from the union.
    pub fn merge(&self, mut parents: Vec<Agent>, offspring: Vec<Agent>) -> Result<Vec<Agent>> {
        parents.extend(offspring);
        self.select(parents)
    }
}
