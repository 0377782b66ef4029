//! Algorithm implementations for step tracking
//!
//! This module contains the ranking engine: daily achievers, group totals,
//! leaderboards, rewards and goal suggestions.

pub mod ranking;

pub use ranking::{
    GoalSuggestion, GroupAchievement, LeaderboardEntry, RangeEntry, RankingEngine, RewardOutcome,
    SuggestionKind,
};
