//! # Genetic Operators
//!
//! Crossover blends a male and a female parent into two complementary offspring.
//! Mutation perturbs a random subset of coordinates with Gaussian, Cauchy or mixed
//! noise. Every operator returns positions already clamped into the search box.
pub mod crossover;
pub mod mutation;

pub use crossover::{crossover, crossover_with_weights};
pub use mutation::{
    cauchy_mutation, gaussian_mutation, hybrid_mutation, mutated_dimensions, MutationOperator,
};
