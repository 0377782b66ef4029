//! Core model traits shared by individuals and groups

pub mod traits;

pub use traits::{EntityModel, StepHistory};
