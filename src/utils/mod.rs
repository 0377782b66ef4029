//! Utility functions for the step tracker

pub mod logging;
pub mod sample_data;

pub use sample_data::{generate_sample_data, sample_groups, sample_individuals, sample_registry};
