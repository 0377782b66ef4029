//! Individual entity model
//!
//! An Individual is a person whose daily steps are tracked. Individuals are
//! created ungrouped; the reference to their current group is a back-reference
//! maintained by the membership registry, never set directly by callers.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use step_tracker_macros::EntityModel;

use crate::models::core::StepHistory;

/// Number of days in a full week of step history
pub const DAYS_PER_WEEK: usize = 7;

/// Daily step counts, oldest first, with the last entry being today
pub type WeeklySteps = SmallVec<[u32; DAYS_PER_WEEK]>;

/// A tracked person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EntityModel)]
pub struct Individual {
    /// Unique, immutable identifier
    pub id: u32,
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Steps the individual aims for each day
    pub daily_step_goal: u32,
    /// Step counts for the recorded days of the week
    pub weekly_step_count: WeeklySteps,
    /// Group the individual currently belongs to
    pub(crate) current_group_id: Option<String>,
    /// Accumulated reward points
    pub(crate) points: u64,
}

impl Individual {
    /// Create a new ungrouped individual with no points
    #[must_use]
    pub fn new(
        id: u32,
        name: impl Into<String>,
        age: u32,
        daily_step_goal: u32,
        weekly_step_count: impl IntoIterator<Item = u32>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            daily_step_goal,
            weekly_step_count: weekly_step_count.into_iter().collect(),
            current_group_id: None,
            points: 0,
        }
    }

    /// The group this individual belongs to, if any
    #[must_use]
    pub fn current_group_id(&self) -> Option<&str> {
        self.current_group_id.as_deref()
    }

    /// Whether the individual is free to join a group
    #[must_use]
    pub const fn is_ungrouped(&self) -> bool {
        self.current_group_id.is_none()
    }

    /// Accumulated reward points
    #[must_use]
    pub const fn points(&self) -> u64 {
        self.points
    }

    /// Whether today's steps meet the daily goal
    ///
    /// An empty history never meets the goal.
    #[must_use]
    pub fn met_daily_goal(&self) -> bool {
        self.today_steps()
            .is_some_and(|steps| steps >= self.daily_step_goal)
    }

    /// Number of recorded days on which the daily goal was met
    #[must_use]
    pub fn achieved_days(&self) -> usize {
        self.weekly_step_count
            .iter()
            .filter(|&&steps| steps >= self.daily_step_goal)
            .count()
    }
}

impl StepHistory for Individual {
    fn steps(&self) -> &[u32] {
        &self.weekly_step_count
    }
}
