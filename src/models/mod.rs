//! Domain models for the step tracker
//!
//! This module contains the entity models stored by the membership registry.

pub mod core;
pub mod group;
pub mod individual;

// Re-export commonly used types
pub use self::core::{EntityModel, StepHistory};
pub use group::{Group, MAX_MEMBERS};
pub use individual::{DAYS_PER_WEEK, Individual, WeeklySteps};
