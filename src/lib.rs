//! A Rust library for tracking individuals, the groups they belong to, and
//! their daily and weekly step performance.
//!
//! Individuals and groups live in ordered stores inside a
//! [`MembershipRegistry`], which keeps every group's member list and every
//! individual's group reference in agreement across create, merge and delete.
//! The [`RankingEngine`] reads the registry to rank achievers and groups.

// Lets the derive macros name this crate by path from inside it
extern crate self as step_tracker;

pub mod algorithm;
pub mod collections;
pub mod common;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod report;
pub mod storage;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{RankingConfig, TrackerConfig};
pub use error::{Result, TrackerError};
pub use registry::MembershipRegistry;
pub use registry::operations::SkipReason;

// Collections
pub use collections::{FnOrder, KeyComparator, NaturalOrder, OrderedStore};
pub use common::traits::OrderedCollection;

// Models
pub use models::{EntityModel, Group, Individual, MAX_MEMBERS, StepHistory};

// Rankings
pub use algorithm::{
    GoalSuggestion, GroupAchievement, LeaderboardEntry, RangeEntry, RankingEngine, RewardOutcome,
    SuggestionKind,
};

// Storage
pub use storage::CsvStorage;
pub use storage::snapshot::{RegistrySnapshot, read_snapshot, write_snapshot};
