use std::path::Path;

use step_tracker::{CsvStorage, Individual, MembershipRegistry};

/// Individual with a flat week of steps
#[must_use]
pub fn individual(id: u32, daily_step_goal: u32, steps: &[u32]) -> Individual {
    Individual::new(id, format!("User{id}"), 30, daily_step_goal, steps.iter().copied())
}

/// Registry holding ungrouped individuals with the given ids
#[must_use]
pub fn registry_with(ids: impl IntoIterator<Item = u32>) -> MembershipRegistry {
    let mut registry = MembershipRegistry::new();
    for id in ids {
        registry
            .add_individual(individual(id, 5000, &[5000; 7]))
            .unwrap();
    }
    registry
}

/// Storage pointed at a pair of files inside `dir`
#[must_use]
pub fn storage_in(dir: &Path) -> CsvStorage {
    CsvStorage::new(dir.join("individuals.csv"), dir.join("groups.csv"))
}

/// Sorted member ids of a group
#[must_use]
pub fn members(registry: &MembershipRegistry, group_id: &str) -> Vec<u32> {
    registry
        .lookup_group(group_id)
        .map(|group| group.member_ids().iter().copied().collect())
        .unwrap_or_default()
}

/// Panic with the broken rule if the membership rules do not hold
pub fn assert_consistent(registry: &MembershipRegistry) {
    if let Err(e) = registry.check_invariants() {
        panic!("registry is inconsistent: {e}");
    }
}
