//! Group-level transactions
//!
//! Creating, merging and restoring groups. Each operation validates
//! everything it can before its first write, so a rejected call leaves the
//! registry untouched. Merge is the one compound operation: a failure after
//! its first delete is reported as `InconsistentState` and not rolled back.

use std::collections::BTreeSet;

use log::{debug, info, warn};
use rustc_hash::FxHashSet;

use crate::common::traits::OrderedCollection;
use crate::error::{Result, TrackerError};
use crate::models::{Group, MAX_MEMBERS};
use crate::storage::check_storable;

use super::MembershipRegistry;

/// Why a candidate member was left out of a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No individual with the id exists
    NotFound,
    /// The individual already belongs to the named group
    AlreadyGrouped(String),
}

impl MembershipRegistry {
    /// Create a group from candidate member ids
    ///
    /// The member cap is checked against the raw number of candidates, so a
    /// request over the cap fails even if filtering would bring it under.
    /// Unknown ids and ids that already belong to a group are skipped with a
    /// warning and duplicates collapse to one. If nobody is left the group
    /// is not created.
    pub fn create_group(
        &mut self,
        group_id: &str,
        group_name: &str,
        candidate_ids: &[u32],
        weekly_group_goal: u64,
    ) -> Result<&Group> {
        if self.groups.contains(group_id) {
            return Err(TrackerError::DuplicateGroupId(group_id.to_string()));
        }
        check_storable("group id", group_id)?;
        check_storable("group name", group_name)?;
        if candidate_ids.len() > MAX_MEMBERS {
            return Err(TrackerError::TooManyMembers {
                requested: candidate_ids.len(),
                max: MAX_MEMBERS,
            });
        }

        let members = self.filter_candidates(group_id, candidate_ids);
        if members.is_empty() {
            return Err(TrackerError::NoValidMembers(group_id.to_string()));
        }

        info!("Creating group {group_id} ({group_name}) with members {members:?}");
        self.attach_group(Group::new(group_id, group_name, members, weekly_group_goal))
    }

    /// Merge two groups into a new group that reuses the first group's id
    ///
    /// The combined member set is checked against the cap before anything is
    /// deleted. Both source groups are then deleted, ungrouping their members,
    /// and the merged group is created with every combined member attached.
    pub fn merge_groups(
        &mut self,
        group_id_1: &str,
        group_id_2: &str,
        new_group_name: &str,
        new_weekly_goal: u64,
    ) -> Result<&Group> {
        let first = self
            .groups
            .get(group_id_1)
            .ok_or_else(|| TrackerError::GroupNotFound(group_id_1.to_string()))?;
        let second = self
            .groups
            .get(group_id_2)
            .ok_or_else(|| TrackerError::GroupNotFound(group_id_2.to_string()))?;
        if group_id_1 == group_id_2 {
            return Err(TrackerError::SelfMerge(group_id_1.to_string()));
        }
        check_storable("group name", new_group_name)?;

        let merged: BTreeSet<u32> = first
            .member_ids
            .union(&second.member_ids)
            .copied()
            .collect();
        if merged.len() > MAX_MEMBERS {
            return Err(TrackerError::TooManyMembers {
                requested: merged.len(),
                max: MAX_MEMBERS,
            });
        }

        self.delete_group(group_id_1)?;
        self.delete_group(group_id_2).map_err(|e| {
            TrackerError::InconsistentState(format!(
                "group {group_id_1} was deleted but merging {group_id_2} failed: {e}"
            ))
        })?;

        info!("Merging groups {group_id_1} and {group_id_2} into {group_id_1} ({new_group_name})");
        self.attach_group(Group::new(group_id_1, new_group_name, merged, new_weekly_goal))
            .map_err(|e| {
                TrackerError::InconsistentState(format!(
                    "groups {group_id_1} and {group_id_2} were deleted but the merged group was not created: {e}"
                ))
            })
    }

    /// Re-insert a stored group, as when loading saved data
    ///
    /// Unlike [`create_group`](Self::create_group) an empty member list is
    /// accepted, since deleting individuals can leave a group empty. Members
    /// that are unknown or already grouped are still skipped with a warning.
    pub fn restore_group(&mut self, group: Group) -> Result<&Group> {
        if self.groups.contains(group.group_id.as_str()) {
            return Err(TrackerError::DuplicateGroupId(group.group_id));
        }
        check_storable("group id", &group.group_id)?;
        check_storable("group name", &group.group_name)?;
        if group.member_ids.len() > MAX_MEMBERS {
            return Err(TrackerError::TooManyMembers {
                requested: group.member_ids.len(),
                max: MAX_MEMBERS,
            });
        }

        let candidates: Vec<u32> = group.member_ids.iter().copied().collect();
        let members = self.filter_candidates(&group.group_id, &candidates);
        let restored = Group::new(
            group.group_id,
            group.group_name,
            members,
            group.weekly_group_goal,
        );
        self.attach_group(restored)
    }

    /// Why a candidate could not join a group, or `None` if it can
    #[must_use]
    pub fn candidate_skip_reason(&self, id: u32) -> Option<SkipReason> {
        match self.individuals.get(&id) {
            None => Some(SkipReason::NotFound),
            Some(individual) => individual
                .current_group_id
                .clone()
                .map(SkipReason::AlreadyGrouped),
        }
    }

    /// Keep the candidates that exist and are ungrouped, first occurrence wins
    fn filter_candidates(&self, group_id: &str, candidate_ids: &[u32]) -> Vec<u32> {
        let mut seen = FxHashSet::default();
        let mut members = Vec::with_capacity(candidate_ids.len());

        for &id in candidate_ids {
            if !seen.insert(id) {
                debug!("Ignoring repeated candidate {id} for group {group_id}");
                continue;
            }
            match self.candidate_skip_reason(id) {
                None => members.push(id),
                Some(SkipReason::NotFound) => {
                    warn!("Individual with ID {id} not found. Skipping for group {group_id}");
                }
                Some(SkipReason::AlreadyGrouped(current)) => {
                    warn!(
                        "Individual with ID {id} already belongs to group {current}. Skipping for group {group_id}"
                    );
                }
            }
        }

        members
    }

    /// Insert a group and point each of its members back at it
    ///
    /// Members must already have been filtered to existing, ungrouped
    /// individuals.
    fn attach_group(&mut self, group: Group) -> Result<&Group> {
        let group_id = group.group_id.clone();
        let member_ids: Vec<u32> = group.member_ids.iter().copied().collect();

        if !self.groups.insert(group) {
            return Err(TrackerError::DuplicateGroupId(group_id));
        }
        for member_id in member_ids {
            if let Some(individual) = self.individuals.search(&member_id) {
                individual.current_group_id = Some(group_id.clone());
            }
        }

        self.groups.get(group_id.as_str()).ok_or_else(|| {
            TrackerError::InconsistentState(format!("group {group_id} missing right after insert"))
        })
    }
}
