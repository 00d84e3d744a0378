use crate::{
    error::{ensure_dimensions, Result},
    problem::Problem,
    rng::RandomNumberGenerator,
};

/// Blends two parents with an independent uniform weight per dimension.
///
/// Returns the offspring `L·x1 + (1-L)·x2` and its mirror `L·x2 + (1-L)·x1`,
/// both clamped to the bounds. One uniform draw is consumed per dimension.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the parents differ in length.
pub fn crossover(
    rng: &mut RandomNumberGenerator,
    parent1: &[f64],
    parent2: &[f64],
    problem: &Problem,
) -> Result<(Vec<f64>, Vec<f64>)> {
    ensure_dimensions(parent1.len(), parent2.len())?;
    let weights: Vec<f64> = (0..parent1.len()).map(|_| rng.uniform()).collect();
    crossover_with_weights(parent1, parent2, &weights, problem)
}

/// Crossover with explicit blend weights, one per dimension.
///
/// Swapping the parents swaps the two offspring exactly.
///
/// ```rust
/// use mayfly::genetic::crossover_with_weights;
/// use mayfly::problem::Problem;
///
/// let problem = Problem::new(2, 0.0, 5.0);
/// let (a, b) = crossover_with_weights(&[1.0, 2.0], &[3.0, 4.0], &[0.5, 0.5], &problem).unwrap();
/// assert_eq!(a, vec![2.0, 3.0]);
/// assert_eq!(b, vec![2.0, 3.0]);
/// ```
pub fn crossover_with_weights(
    parent1: &[f64],
    parent2: &[f64],
    weights: &[f64],
    problem: &Problem,
) -> Result<(Vec<f64>, Vec<f64>)> {
    ensure_dimensions(parent1.len(), parent2.len())?;
    ensure_dimensions(parent1.len(), weights.len())?;

    let blend = |a: f64, b: f64, l: f64| problem.clamp(l * a + (1.0 - l) * b);

    let first = parent1
        .iter()
        .zip(parent2)
        .zip(weights)
        .map(|((&a, &b), &l)| blend(a, b, l))
        .collect();
    let second = parent2
        .iter()
        .zip(parent1)
        .zip(weights)
        .map(|((&a, &b), &l)| blend(a, b, l))
        .collect();

    Ok((first, second))
}
