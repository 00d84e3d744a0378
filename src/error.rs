//! # Error Types
//!
//! This module defines the error type used throughout the optimizer. Configuration
//! problems are reported once, before a run starts; numeric faults coming from the
//! objective abort the run.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use mayfly::error::{MayflyError, Result};
//!
//! fn check_dimensions(dimensions: usize) -> Result<()> {
//!     if dimensions == 0 {
//!         return Err(MayflyError::Configuration(
//!             "Dimensionality must be greater than 0".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_dimensions(0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use mayfly::error::{MayflyError, OptionExt};
//!
//! fn lowest_cost(costs: &[f64]) -> mayfly::error::Result<f64> {
//!     costs
//!         .iter()
//!         .cloned()
//!         .reduce(f64::min)
//!         .ok_or_else_mayfly(|| MayflyError::EmptyPopulation)
//! }
//!
//! assert_eq!(lowest_cost(&[3.0, 1.0, 2.0]).unwrap(), 1.0);
//! ```

use thiserror::Error;

/// Represents errors that can occur while configuring or running the optimizer.
#[derive(Error, Debug)]
pub enum MayflyError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an operation needs at least one agent or solution.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when a vector does not have the expected length.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Error that occurs when NaN values are produced by the objective.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// I/O failure in caller code, such as loading saved options.
    ///
    /// The optimizer itself never performs I/O and never returns this variant.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A free-form error for caller code, for example a custom objective
    /// wrapper. The optimizer itself never returns it.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for optimizer operations.
pub type Result<T> = std::result::Result<T, MayflyError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, MayflyError>` using a closure
    /// to generate the error.
    fn ok_or_else_mayfly<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> MayflyError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_mayfly<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> MayflyError,
    {
        self.ok_or_else(err_fn)
    }
}

/// Ensures that a vector has the expected length.
pub(crate) fn ensure_dimensions(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(MayflyError::DimensionMismatch { expected, found });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message() {
        let err = MayflyError::Configuration("Population size cannot be zero".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: Population size cannot be zero"
        );
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = ensure_dimensions(3, 2).unwrap_err();
        assert_eq!(err.to_string(), "Dimension mismatch: expected 3, found 2");
        assert!(ensure_dimensions(4, 4).is_ok());
    }

    #[test]
    fn test_option_ext() {
        let none: Option<i32> = None;
        match none.ok_or_else_mayfly(|| MayflyError::EmptyPopulation) {
            Err(MayflyError::EmptyPopulation) => (),
            _ => panic!("Expected EmptyPopulation error"),
        }
        assert_eq!(Some(7).ok_or_else_mayfly(|| MayflyError::EmptyPopulation).unwrap(), 7);
    }

    #[test]
    fn test_io_conversion() {
        fn open() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))?;
            Ok(())
        }
        assert!(matches!(open(), Err(MayflyError::Io(_))));
    }

    #[test]
    fn test_other_message() {
        let err = MayflyError::Other("saved options are stale".to_string());
        assert_eq!(err.to_string(), "saved options are stale");
    }
}
