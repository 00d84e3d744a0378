use super::dominates;
use crate::error::{ensure_dimensions, MayflyError, OptionExt, Result};
use crate::population::{compare_costs, distance};

/// Hypervolume of a bi-objective front with respect to `reference`.
///
/// Points that do not strictly dominate the reference point contribute nothing;
/// dominated points inside the front are handled by the sweep.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the reference or any point is not 2-dimensional.
pub fn hypervolume_2d(front: &[Vec<f64>], reference: &[f64]) -> Result<f64> {
    ensure_dimensions(2, reference.len())?;
    for point in front {
        ensure_dimensions(2, point.len())?;
    }

    let mut points: Vec<&Vec<f64>> = front
        .iter()
        .filter(|p| p[0] < reference[0] && p[1] < reference[1])
        .collect();
    points.sort_by(|a, b| compare_costs(a[0], b[0]).then(compare_costs(a[1], b[1])));

    let mut volume = 0.0;
    let mut ceiling = reference[1];
    for point in points {
        if point[1] < ceiling {
            volume += (reference[0] - point[0]) * (ceiling - point[1]);
            ceiling = point[1];
        }
    }
    Ok(volume)
}

/// Inverted generational distance: the mean distance from each point of the
/// `reference` front to its nearest neighbour in `front`.
///
/// # Errors
///
/// Returns `EmptyPopulation` if either set is empty.
pub fn inverted_generational_distance(front: &[Vec<f64>], reference: &[Vec<f64>]) -> Result<f64> {
    if reference.is_empty() {
        return Err(MayflyError::EmptyPopulation);
    }

    let mut total = 0.0;
    for r in reference {
        total += front
            .iter()
            .map(|p| distance(p, r))
            .min_by(|a, b| compare_costs(*a, *b))
            .ok_or_else_mayfly(|| MayflyError::EmptyPopulation)?;
    }
    Ok(total / reference.len() as f64)
}

/// Keeps only the points of `front` that no other point dominates.
pub fn non_dominated(front: &[Vec<f64>]) -> Vec<Vec<f64>> {
    front
        .iter()
        .filter(|p| !front.iter().any(|q| dominates(q, p)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hypervolume_single_point() {
        let hv = hypervolume_2d(&[vec![1.0, 1.0]], &[2.0, 2.0]).unwrap();
        assert!((hv - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hypervolume_staircase() {
        let front = vec![vec![0.0, 2.0], vec![1.0, 1.0], vec![2.0, 0.0]];
        let hv = hypervolume_2d(&front, &[3.0, 3.0]).unwrap();
        // 3x1 + 2x1 + 1x1
        assert!((hv - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_hypervolume_ignores_dominated_and_outside_points() {
        let front = vec![vec![1.0, 1.0], vec![1.5, 1.5], vec![5.0, 0.0]];
        let hv = hypervolume_2d(&front, &[2.0, 2.0]).unwrap();
        assert!((hv - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hypervolume_rejects_three_objectives() {
        assert!(hypervolume_2d(&[vec![1.0, 1.0, 1.0]], &[2.0, 2.0]).is_err());
    }

    #[test]
    fn test_igd() {
        let reference = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        assert_eq!(inverted_generational_distance(&reference, &reference).unwrap(), 0.0);

        let front = vec![vec![0.0, 2.0]];
        let igd = inverted_generational_distance(&front, &reference).unwrap();
        let expected = (1.0 + (1.0f64 + 4.0).sqrt()) / 2.0;
        assert!((igd - expected).abs() < 1e-12);

        assert!(inverted_generational_distance(&[], &reference).is_err());
    }

    #[test]
    fn test_non_dominated_filter() {
        let points = vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![3.0, 3.0]];
        assert_eq!(non_dominated(&points), vec![vec![1.0, 3.0], vec![2.0, 2.0]]);
    }
}
