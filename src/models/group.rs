//! Group entity model
//!
//! A Group holds at most [`MAX_MEMBERS`] unique individual ids, kept sorted
//! for deterministic output. Membership is changed only by the registry.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use step_tracker_macros::EntityModel;

/// Maximum number of members allowed in a group
pub const MAX_MEMBERS: usize = 5;

/// A named team of individuals with a shared weekly goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EntityModel)]
#[entity(id_field = "group_id")]
pub struct Group {
    /// Unique, immutable identifier
    pub group_id: String,
    /// Display name
    pub group_name: String,
    /// Ids of the current members
    pub(crate) member_ids: BTreeSet<u32>,
    /// Steps the whole group aims for in a week
    pub weekly_group_goal: u64,
    /// Last computed weekly total; derived, not authoritative
    pub(crate) total_weekly_steps: u64,
}

impl Group {
    /// Create a group, collapsing duplicate member ids
    pub(crate) fn new(
        group_id: impl Into<String>,
        group_name: impl Into<String>,
        member_ids: impl IntoIterator<Item = u32>,
        weekly_group_goal: u64,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            group_name: group_name.into(),
            member_ids: member_ids.into_iter().collect(),
            weekly_group_goal,
            total_weekly_steps: 0,
        }
    }

    /// Ids of the current members in ascending order
    #[must_use]
    pub const fn member_ids(&self) -> &BTreeSet<u32> {
        &self.member_ids
    }

    /// Number of current members
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.member_ids.len()
    }

    /// Whether the individual is a member
    #[must_use]
    pub fn has_member(&self, id: u32) -> bool {
        self.member_ids.contains(&id)
    }

    /// Weekly total as of the last refresh
    #[must_use]
    pub const fn total_weekly_steps(&self) -> u64 {
        self.total_weekly_steps
    }
}
