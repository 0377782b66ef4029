//! Membership registry
//!
//! The registry owns the two ordered stores, individuals by numeric id and
//! groups by string id, and is the only code that writes the pairing between
//! a group's member list and an individual's group back-reference.
//!
//! After every public call returns:
//! - every member id of a group names a stored individual whose back-reference
//!   is that group,
//! - every back-reference names a stored group listing the individual,
//! - no group has more than [`MAX_MEMBERS`] members,
//! - ids are unique within each store.

pub mod operations;

use log::{debug, info, warn};

use crate::collections::OrderedStore;
use crate::common::traits::OrderedCollection;
use crate::error::{Result, TrackerError};
use crate::models::{Group, Individual, MAX_MEMBERS};
use crate::storage::check_storable;

/// Key extractor for the group store
fn group_key(group: &Group) -> &str {
    &group.group_id
}

/// Individuals and groups bound by the membership rules
#[derive(Debug, Clone)]
pub struct MembershipRegistry {
    /// Individuals indexed by id
    individuals: OrderedStore<Individual, u32>,
    /// Groups indexed by group id
    groups: OrderedStore<Group, str>,
}

impl Default for MembershipRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MembershipRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            individuals: OrderedStore::for_entities(),
            groups: OrderedStore::new(group_key),
        }
    }

    /// Add a new individual
    ///
    /// The individual is stored ungrouped regardless of any group reference
    /// it carried; groups are joined through group operations only.
    pub fn add_individual(&mut self, mut individual: Individual) -> Result<()> {
        if self.individuals.contains(&individual.id) {
            return Err(TrackerError::IndividualExists(individual.id));
        }
        check_storable("individual name", &individual.name)?;

        individual.current_group_id = None;
        let id = individual.id;
        self.individuals.insert(individual);
        debug!("Added individual {id}");
        Ok(())
    }

    /// Get an individual by id
    #[must_use]
    pub fn lookup_individual(&self, id: u32) -> Option<&Individual> {
        self.individuals.get(&id)
    }

    /// Get a group by id
    #[must_use]
    pub fn lookup_group(&self, group_id: &str) -> Option<&Group> {
        self.groups.get(group_id)
    }

    /// Delete an individual, first removing them from their group
    pub fn delete_individual(&mut self, id: u32) -> Result<()> {
        let individual = self
            .individuals
            .get(&id)
            .ok_or(TrackerError::IndividualNotFound(id))?;

        if let Some(group_id) = individual.current_group_id.clone() {
            match self.groups.search(group_id.as_str()) {
                Some(group) => {
                    group.member_ids.remove(&id);
                    info!("Individual {id} removed from group {group_id}");
                }
                None => warn!("Individual {id} referenced missing group {group_id}"),
            }
        }

        if !self.individuals.remove(&id) {
            return Err(TrackerError::InconsistentState(format!(
                "individual {id} vanished while being deleted"
            )));
        }
        info!("Individual {id} deleted");
        Ok(())
    }

    /// Delete a group, first ungrouping all of its members
    ///
    /// The members themselves are kept and become free to join other groups.
    pub fn delete_group(&mut self, group_id: &str) -> Result<()> {
        let group = self
            .groups
            .get(group_id)
            .ok_or_else(|| TrackerError::GroupNotFound(group_id.to_string()))?;
        let member_ids: Vec<u32> = group.member_ids.iter().copied().collect();

        for member_id in member_ids {
            if let Some(individual) = self.individuals.search(&member_id) {
                if individual.current_group_id.as_deref() == Some(group_id) {
                    individual.current_group_id = None;
                    debug!("Individual {member_id} is now ungrouped");
                }
            }
        }

        if !self.groups.remove(group_id) {
            return Err(TrackerError::InconsistentState(format!(
                "group {group_id} vanished while being deleted"
            )));
        }
        info!("Group {group_id} deleted");
        Ok(())
    }

    /// Replace an individual's daily step goal
    pub fn update_daily_goal(&mut self, id: u32, daily_step_goal: u32) -> Result<()> {
        let individual = self
            .individuals
            .search(&id)
            .ok_or(TrackerError::IndividualNotFound(id))?;
        individual.daily_step_goal = daily_step_goal;
        info!("Individual {id} daily goal set to {daily_step_goal}");
        Ok(())
    }

    /// Add reward points, returning the new total
    pub(crate) fn award_points(&mut self, id: u32, points: u64) -> Result<u64> {
        let individual = self
            .individuals
            .search(&id)
            .ok_or(TrackerError::IndividualNotFound(id))?;
        individual.points += points;
        Ok(individual.points)
    }

    /// Store recomputed weekly totals, one per group in group order
    pub(crate) fn store_group_totals(&mut self, totals: &[u64]) {
        for (group, &total) in self.groups.all_values().into_iter().zip(totals) {
            group.total_weekly_steps = total;
        }
    }

    /// Every individual in id order
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        self.individuals.as_slice()
    }

    /// Every group in group id order
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        self.groups.as_slice()
    }

    /// Individuals with ids in `[start, end]`
    #[must_use]
    pub fn individuals_in_range(&self, start: u32, end: u32) -> &[Individual] {
        self.individuals.range_slice(&start, &end)
    }

    /// Groups with ids in `[start, end]` by string order
    #[must_use]
    pub fn groups_in_range(&self, start: &str, end: &str) -> &[Group] {
        self.groups.range_slice(start, end)
    }

    /// Current members of a group, in id order
    pub fn members_of<'a>(&'a self, group: &'a Group) -> impl Iterator<Item = &'a Individual> + 'a {
        group
            .member_ids
            .iter()
            .filter_map(|id| self.individuals.get(id))
    }

    /// Number of stored individuals
    #[must_use]
    pub fn individual_count(&self) -> usize {
        self.individuals.size()
    }

    /// Number of stored groups
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.size()
    }

    /// Verify the membership rules across both stores
    pub fn check_invariants(&self) -> Result<()> {
        let inconsistent = |reason: String| Err(TrackerError::InconsistentState(reason));

        if !self.individuals.is_strictly_ordered() {
            return inconsistent("individual store is out of id order".to_string());
        }
        if !self.groups.is_strictly_ordered() {
            return inconsistent("group store is out of id order".to_string());
        }

        for group in self.groups.iter() {
            if group.member_ids.len() > MAX_MEMBERS {
                return inconsistent(format!(
                    "group {} has {} members",
                    group.group_id,
                    group.member_ids.len()
                ));
            }
            for member_id in &group.member_ids {
                match self.individuals.get(member_id) {
                    Some(individual)
                        if individual.current_group_id.as_deref() == Some(group.group_id.as_str()) => {}
                    Some(individual) => {
                        return inconsistent(format!(
                            "member {member_id} of group {} points at {:?}",
                            group.group_id, individual.current_group_id
                        ));
                    }
                    None => {
                        return inconsistent(format!(
                            "group {} lists missing individual {member_id}",
                            group.group_id
                        ));
                    }
                }
            }
        }

        for individual in self.individuals.iter() {
            if let Some(group_id) = individual.current_group_id.as_deref() {
                let listed = self
                    .groups
                    .get(group_id)
                    .is_some_and(|group| group.member_ids.contains(&individual.id));
                if !listed {
                    return inconsistent(format!(
                        "individual {} points at group {group_id} which does not list them",
                        individual.id
                    ));
                }
            }
        }

        Ok(())
    }
}
