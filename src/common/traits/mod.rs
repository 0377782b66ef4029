//! Common traits used across the codebase
//!
//! This module defines traits that are used by multiple modules to avoid
//! circular dependencies and provide clear interfaces.

pub mod collection;

// Re-export collection traits
pub use collection::OrderedCollection;
