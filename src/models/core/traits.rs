//! Trait definitions for domain models
//!
//! This module defines the core traits that the stored models implement,
//! providing identifier access for the ordered stores.

/// A trait that all stored domain models implement.
///
/// The `EntityModel` trait exposes the identifier an ordered store keys the
/// model by. It is normally derived with `#[derive(EntityModel)]`.
pub trait EntityModel: Clone + std::fmt::Debug {
    /// The type of identifier used for this model
    type Id: Clone + Ord + std::fmt::Debug;

    /// Get the unique identifier for this model
    fn id(&self) -> &Self::Id;

    /// Create a unique key string representation of the identifier
    fn key(&self) -> String;
}

/// A trait for models that carry a daily step history.
pub trait StepHistory {
    /// Step counts, oldest first; the last entry is today
    fn steps(&self) -> &[u32];

    /// Today's step count, if any history exists
    fn today_steps(&self) -> Option<u32> {
        self.steps().last().copied()
    }

    /// Sum of every recorded day
    fn total_steps(&self) -> u64 {
        self.steps().iter().map(|&steps| u64::from(steps)).sum()
    }
}
