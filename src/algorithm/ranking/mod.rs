//! Step rankings for individuals and groups
//!
//! The ranking engine reads the membership registry to rank daily goal
//! achievers and compare group weekly totals. Apart from awarding reward
//! points it never changes the registry.

pub mod rewards;
pub mod suggestion;

use std::cmp::Reverse;

use itertools::Itertools;
use log::debug;

use crate::config::RankingConfig;
use crate::error::{Result, TrackerError};
use crate::models::{Group, Individual, StepHistory};
use crate::registry::MembershipRegistry;

pub use rewards::RewardOutcome;
pub use suggestion::{GoalSuggestion, SuggestionKind};

/// Outcome of checking a group's weekly goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupAchievement {
    /// Group that was checked
    pub group_id: String,
    /// Name of the group
    pub group_name: String,
    /// Whether the weekly total meets the goal
    pub achieved: bool,
    /// Sum of every member's recorded steps
    pub total: u64,
    /// The group's weekly goal
    pub goal: u64,
}

impl GroupAchievement {
    /// Steps still missing to reach the goal
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.goal.saturating_sub(self.total)
    }
}

/// A group and its weekly total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardEntry<'a> {
    /// The ranked group
    pub group: &'a Group,
    /// Sum of every member's recorded steps
    pub total: u64,
}

/// A ranked group within an id range, with its member records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeEntry<'a> {
    /// The ranked group
    pub group: &'a Group,
    /// Sum of every member's recorded steps
    pub total: u64,
    /// Member records in id order
    pub members: Vec<&'a Individual>,
}

/// Ranks individuals and groups from the registry
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    config: RankingConfig,
}

impl RankingEngine {
    /// Create a ranking engine with the given configuration
    #[must_use]
    pub const fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration
    #[must_use]
    pub const fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Top `n` individuals who met today's goal, most steps today first
    ///
    /// Ties keep registry order (ascending id).
    #[must_use]
    pub fn top_daily_achievers<'a>(
        &self,
        registry: &'a MembershipRegistry,
        n: usize,
    ) -> Vec<&'a Individual> {
        registry
            .individuals()
            .iter()
            .filter(|individual| individual.met_daily_goal())
            .sorted_by_key(|individual| Reverse(individual.today_steps().unwrap_or_default()))
            .take(n)
            .collect()
    }

    /// Sum of every member's recorded steps
    ///
    /// Members without history, or without a record, add nothing.
    #[must_use]
    pub fn group_total_steps(&self, registry: &MembershipRegistry, group: &Group) -> u64 {
        registry
            .members_of(group)
            .map(StepHistory::total_steps)
            .sum()
    }

    /// Compare a group's weekly total with its goal
    pub fn check_group_achievement(
        &self,
        registry: &MembershipRegistry,
        group_id: &str,
    ) -> Result<GroupAchievement> {
        let group = registry
            .lookup_group(group_id)
            .ok_or_else(|| TrackerError::GroupNotFound(group_id.to_string()))?;
        let total = self.group_total_steps(registry, group);
        debug!("Group {group_id} has {total} of {} steps", group.weekly_group_goal);

        Ok(GroupAchievement {
            group_id: group.group_id.clone(),
            group_name: group.group_name.clone(),
            achieved: total >= group.weekly_group_goal,
            total,
            goal: group.weekly_group_goal,
        })
    }

    /// Rank groups by weekly total, highest first
    ///
    /// Ties keep the order the groups were given in.
    #[must_use]
    pub fn leaderboard<'a, I>(&self, registry: &MembershipRegistry, groups: I) -> Vec<LeaderboardEntry<'a>>
    where
        I: IntoIterator<Item = &'a Group>,
    {
        groups
            .into_iter()
            .map(|group| LeaderboardEntry {
                group,
                total: self.group_total_steps(registry, group),
            })
            .sorted_by_key(|entry| Reverse(entry.total))
            .collect()
    }

    /// Rank the groups whose ids lie in `[start_group_id, end_group_id]`
    #[must_use]
    pub fn group_range_report<'a>(
        &self,
        registry: &'a MembershipRegistry,
        start_group_id: &str,
        end_group_id: &str,
    ) -> Vec<RangeEntry<'a>> {
        self.leaderboard(registry, registry.groups_in_range(start_group_id, end_group_id))
            .into_iter()
            .map(|entry| RangeEntry {
                group: entry.group,
                total: entry.total,
                members: registry.members_of(entry.group).collect(),
            })
            .collect()
    }

    /// Recompute and store every group's cached weekly total
    pub fn refresh_group_totals(&self, registry: &mut MembershipRegistry) {
        let totals: Vec<u64> = registry
            .groups()
            .iter()
            .map(|group| self.group_total_steps(registry, group))
            .collect();
        registry.store_group_totals(&totals);
    }
}
