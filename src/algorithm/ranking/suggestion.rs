//! Daily goal suggestions from a week of history

use crate::error::{Result, TrackerError};
use crate::models::StepHistory;
use crate::registry::MembershipRegistry;

use super::RankingEngine;

/// Achieved days at or above which an individual counts as consistent
const CONSISTENT_DAYS: usize = 6;
/// Achieved days at or below which an individual counts as missing
const MISSING_DAYS: usize = 2;

/// What the suggestion recommends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    /// Consistently achieving and averaging over 120% of the goal: raise it 10%
    Increase,
    /// Consistently achieving: keep the goal
    Maintain,
    /// Consistently missing and averaging under 80% of the goal: lower it 10%
    Decrease,
    /// Often missing but close to the goal: keep it
    NearMiss,
    /// Achieving on three to five days: keep the goal
    Mixed,
}

/// A suggested daily goal; applying it is up to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct GoalSuggestion {
    /// Individual the suggestion is for
    pub individual_id: u32,
    /// Goal in effect
    pub current_goal: u32,
    /// Goal recommended; equal to `current_goal` when no change is advised
    pub suggested_goal: u32,
    /// Which rule produced the suggestion
    pub kind: SuggestionKind,
    /// Days on which the goal was met
    pub achieved_days: usize,
    /// Days of history considered
    pub days: usize,
    /// Mean steps per recorded day
    pub average_steps: f64,
}

impl GoalSuggestion {
    /// Whether a different goal is recommended
    #[must_use]
    pub const fn changes_goal(&self) -> bool {
        self.suggested_goal != self.current_goal
    }
}

/// Scale a goal by `tenths / 10`, rounding down
fn scale_goal(goal: u32, tenths: u64) -> u32 {
    u32::try_from(u64::from(goal) * tenths / 10).unwrap_or(u32::MAX)
}

impl RankingEngine {
    /// Suggest a daily goal from the individual's recorded days
    ///
    /// Needs at least a week of history. Never changes the registry.
    pub fn suggest_goal_update(
        &self,
        registry: &MembershipRegistry,
        individual_id: u32,
    ) -> Result<GoalSuggestion> {
        let individual = registry
            .lookup_individual(individual_id)
            .ok_or(TrackerError::IndividualNotFound(individual_id))?;

        let days = individual.steps().len();
        let required = self.config.required_history_days();
        if days < required {
            return Err(TrackerError::InsufficientData {
                id: individual_id,
                days,
                required,
            });
        }

        let goal = individual.daily_step_goal;
        let achieved_days = individual.achieved_days();
        let total = individual.total_steps();
        // Compare the average with goal multiples without leaving integers:
        // avg > 1.2 * goal  <=>  10 * total > 12 * goal * days
        let scaled_total = u128::from(total) * 10;
        let goal_days = u128::from(goal) * days as u128;

        let (kind, suggested_goal) = if achieved_days >= CONSISTENT_DAYS {
            if scaled_total > goal_days * 12 {
                (SuggestionKind::Increase, scale_goal(goal, 11))
            } else {
                (SuggestionKind::Maintain, goal)
            }
        } else if achieved_days <= MISSING_DAYS {
            if scaled_total < goal_days * 8 {
                (SuggestionKind::Decrease, scale_goal(goal, 9))
            } else {
                (SuggestionKind::NearMiss, goal)
            }
        } else {
            (SuggestionKind::Mixed, goal)
        };

        Ok(GoalSuggestion {
            individual_id,
            current_goal: goal,
            suggested_goal,
            kind,
            achieved_days,
            days,
            average_steps: total as f64 / days as f64,
        })
    }
}
