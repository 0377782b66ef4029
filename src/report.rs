//! Console reporting
//!
//! Renders the structured results of registry and ranking operations for
//! the command line. Nothing here changes state.

use std::fmt;

use itertools::Itertools;

use crate::algorithm::{
    GoalSuggestion, GroupAchievement, LeaderboardEntry, RangeEntry, RewardOutcome, SuggestionKind,
};
use crate::models::{Group, Individual, StepHistory};

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Individual(ID={}, Name={}, Age={}, DailyGoal={}, WeeklySteps=[{}], Group={}, Points={})",
            self.id,
            self.name,
            self.age,
            self.daily_step_goal,
            self.weekly_step_count.iter().join(","),
            self.current_group_id().unwrap_or("None"),
            self.points()
        )
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Group(ID={}, Name={}, Members=[{}], Goal={}, TotalSteps={})",
            self.group_id,
            self.group_name,
            self.member_ids().iter().join(","),
            self.weekly_group_goal,
            self.total_weekly_steps()
        )
    }
}

impl fmt::Display for GroupAchievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Weekly Group Goal: {} steps", self.goal)?;
        writeln!(f, "Total Steps Completed by Group: {} steps", self.total)?;
        if self.achieved {
            write!(
                f,
                "Result: Congratulations! Group '{}' has achieved its weekly goal!",
                self.group_name
            )
        } else {
            write!(
                f,
                "Result: Group '{}' has not yet achieved its weekly goal. Needs {} more steps.",
                self.group_name,
                self.remaining()
            )
        }
    }
}

impl fmt::Display for GoalSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current Daily Goal: {}", self.current_goal)?;
        match self.kind {
            SuggestionKind::Increase => write!(
                f,
                "You consistently achieve your daily goal and often exceed it! Consider increasing your daily goal to {} steps to challenge yourself further.",
                self.suggested_goal
            )?,
            SuggestionKind::Maintain => write!(
                f,
                "You consistently achieve your daily goal. Keep up the great work! Current goal of {} steps seems appropriate.",
                self.current_goal
            )?,
            SuggestionKind::Decrease => write!(
                f,
                "You are consistently missing your daily goal. Consider lowering your daily goal to {} steps to build consistency and confidence.",
                self.suggested_goal
            )?,
            SuggestionKind::NearMiss => write!(
                f,
                "You sometimes miss your daily goal. Review your activity patterns. Current goal of {} steps might be achievable with slight adjustments.",
                self.current_goal
            )?,
            SuggestionKind::Mixed => write!(
                f,
                "Your performance is mixed. Current goal of {} steps is a good target. Focus on consistency.",
                self.current_goal
            )?,
        }
        if self.changes_goal() {
            write!(f, "\nSuggested New Daily Goal: {}", self.suggested_goal)?;
        }
        Ok(())
    }
}

/// Print today's top achievers
pub fn print_top_achievers(achievers: &[&Individual]) {
    println!("\n--- Top Individuals (Daily Goal Achievers) ---");
    if achievers.is_empty() {
        println!("No individuals met their daily goal today.");
        return;
    }
    for (rank, individual) in achievers.iter().enumerate() {
        println!(
            "Rank {}: {} (ID: {}) - Steps: {}",
            rank + 1,
            individual.name,
            individual.id,
            individual.today_steps().unwrap_or_default()
        );
    }
}

/// Print the outcome of a group goal check
pub fn print_group_achievement(achievement: &GroupAchievement) {
    println!(
        "\n--- Group Achievement for '{}' (ID: {}) ---",
        achievement.group_name, achievement.group_id
    );
    println!("{achievement}");
}

/// Print the group leaderboard
pub fn print_leaderboard(entries: &[LeaderboardEntry<'_>]) {
    println!("\n--- Group Leaderboard ---");
    if entries.is_empty() {
        println!("No groups available to generate a leaderboard.");
        return;
    }
    for (rank, entry) in entries.iter().enumerate() {
        println!(
            "Rank {}: Group '{}' (ID: {}) - Total Weekly Steps: {}",
            rank + 1,
            entry.group.group_name,
            entry.group.group_id,
            entry.total
        );
    }
}

/// Print the outcome of a reward check
pub fn print_reward(individual: &Individual, outcome: &RewardOutcome) {
    println!("\n--- Rewards for {} (ID: {}) ---", individual.name, individual.id);
    match outcome {
        RewardOutcome::Awarded { rank, points, .. } => {
            println!(
                "Congratulations! You are Rank {} and earned {points} points!",
                rank + 1
            );
        }
        RewardOutcome::NotInTopN { .. } => {
            println!("This individual is not among today's rewarded daily goal achievers.");
        }
    }
    println!("Total points: {}", outcome.total());
}

/// Print ranked groups within an id range
pub fn print_group_range(start: &str, end: &str, entries: &[RangeEntry<'_>]) {
    println!("\n--- Group Information in Range: {start} to {end} ---");
    if entries.is_empty() {
        println!("No groups found in the specified range.");
        return;
    }
    for (rank, entry) in entries.iter().enumerate() {
        println!("\nRank {} in Range:", rank + 1);
        println!("  Group ID: {}", entry.group.group_id);
        println!("  Group Name: {}", entry.group.group_name);
        println!("  Weekly Group Goal: {}", entry.group.weekly_group_goal);
        println!("  Total Weekly Steps: {}", entry.total);
        if entry.members.is_empty() {
            println!("  Members: None");
        } else {
            let members = entry
                .members
                .iter()
                .map(|member| format!("{} (ID: {})", member.name, member.id))
                .join(", ");
            println!("  Members: {members}");
        }
    }
}

/// Print a goal suggestion
pub fn print_suggestion(individual: &Individual, suggestion: &GoalSuggestion) {
    println!("\n--- Goal Suggestion for {} (ID: {}) ---", individual.name, individual.id);
    println!("{suggestion}");
}
