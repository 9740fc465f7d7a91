//! Utility functions shared by the ensemble stages.

pub mod stats;

pub use stats::{mean, population_std_dev, population_variance, round_to, weighted_mean};
