#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Movement coefficients and their per-iteration damping ratios.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficients {
    /// Inertia weight.
    pub g: f64,
    pub g_damp: f64,
    /// Personal-best attraction of males.
    pub a1: f64,
    /// Global-best attraction of males.
    pub a2: f64,
    /// Male attraction of females.
    pub a3: f64,
    /// Visibility coefficient of the attraction fall-off.
    pub beta: f64,
    /// Radius of the nuptial dance.
    pub dance: f64,
    pub dance_damp: f64,
    /// Scale of the random flight.
    pub flight: f64,
    pub flight_damp: f64,
}

impl Coefficients {
    /// Multiplies inertia, dance and flight by their damping ratios.
    pub fn damp(&mut self) {
        self.g *= self.g_damp;
        self.dance *= self.dance_damp;
        self.flight *= self.flight_damp;
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            g: 0.8,
            g_damp: 1.0,
            a1: 1.0,
            a2: 1.5,
            a3: 1.5,
            beta: 2.0,
            dance: 5.0,
            dance_damp: 0.8,
            flight: 1.0,
            flight_damp: 0.99,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damping_is_monotonic() {
        let mut coefficients = Coefficients::default();
        let mut previous = coefficients.clone();
        for _ in 0..10 {
            coefficients.damp();
            assert!(coefficients.g <= previous.g);
            assert!(coefficients.dance < previous.dance);
            assert!(coefficients.flight < previous.flight);
            previous = coefficients.clone();
        }
        assert_eq!(coefficients.a1, 1.0);
    }
}
