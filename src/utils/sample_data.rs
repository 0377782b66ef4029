//! Deterministic sample data
//!
//! Produces a population of individuals with patterned step counts and five
//! starter groups. Every third individual beats their goal every day, every
//! fifth (not also third) misses it every day, and the rest alternate.
//! Groups G1..G5 take individuals 1..15; everyone above 15 starts ungrouped.

use log::info;

use crate::error::Result;
use crate::models::{DAYS_PER_WEEK, Group, Individual};
use crate::registry::MembershipRegistry;
use crate::storage::CsvStorage;

/// Starter groups as (id, name, members, weekly goal)
const SAMPLE_GROUPS: [(&str, &str, &[u32], u64); 5] = [
    ("G1", "Fitness Fanatics", &[1, 2, 3, 4, 5], 35_000),
    ("G2", "Step Squad", &[6, 7, 8, 9], 30_000),
    ("G3", "Trail Blazers", &[10, 11, 12], 25_000),
    ("G4", "Pace Setters", &[13, 14], 20_000),
    ("G5", "Solo Stars", &[15], 10_000),
];

/// Step counts for individual `i` with daily goal `goal`
fn sample_steps(i: u32, goal: u32) -> Vec<u32> {
    (0..DAYS_PER_WEEK as u32)
        .map(|day| {
            if i % 3 == 0 {
                goal + 100 + day * 50
            } else if i % 5 == 0 {
                goal - 1000 + day * 50
            } else if day % 2 == 0 {
                goal + 200 + day * 50
            } else {
                goal - 500 + day * 100
            }
        })
        .collect()
}

/// Individuals `1..=count`
#[must_use]
pub fn sample_individuals(count: u32) -> Vec<Individual> {
    (1..=count)
        .map(|i| {
            let goal = 5000 + i * 100;
            Individual::new(i, format!("User{i}"), 20 + (i % 30), goal, sample_steps(i, goal))
        })
        .collect()
}

/// The five starter groups
#[must_use]
pub fn sample_groups() -> Vec<Group> {
    SAMPLE_GROUPS
        .iter()
        .map(|&(id, name, members, goal)| Group::new(id, name, members.iter().copied(), goal))
        .collect()
}

/// Build a registry holding the sample data
///
/// Group members beyond `count` do not exist and are skipped.
pub fn sample_registry(count: u32) -> Result<MembershipRegistry> {
    let mut registry = MembershipRegistry::new();
    for individual in sample_individuals(count) {
        registry.add_individual(individual)?;
    }
    for group in sample_groups() {
        registry.restore_group(group)?;
    }
    Ok(registry)
}

/// Write the sample data to the storage files
pub fn generate_sample_data(storage: &CsvStorage, count: u32) -> Result<()> {
    let registry = sample_registry(count)?;
    storage.save(&registry)?;
    info!(
        "Generated sample data: '{}' and '{}'",
        storage.individuals_path().display(),
        storage.groups_path().display()
    );
    Ok(())
}
