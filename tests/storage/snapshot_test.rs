//! Tests for JSON snapshots

use std::fs;

use step_tracker::utils::sample_registry;
use step_tracker::{RankingEngine, RegistrySnapshot, TrackerError, read_snapshot, write_snapshot};
use tempfile::TempDir;

use crate::utils::{assert_consistent, members};

#[test]
fn test_snapshot_keeps_points_and_membership() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapshot.json");
    let mut registry = sample_registry(20).unwrap();
    let engine = RankingEngine::default();
    engine.reward_if_top_n(&mut registry, 19).unwrap();
    engine.refresh_group_totals(&mut registry);

    write_snapshot(&registry, &path).unwrap();
    let snapshot = read_snapshot(&path).unwrap();
    assert_eq!(snapshot.individuals.len(), 20);
    assert_eq!(snapshot.groups.len(), 5);

    let restored = snapshot.restore().unwrap();
    assert_eq!(restored.individuals(), registry.individuals());
    assert_eq!(restored.lookup_individual(19).unwrap().points(), 100);
    assert_eq!(members(&restored, "G1"), vec![1, 2, 3, 4, 5]);
    assert_consistent(&restored);
}

#[test]
fn test_restore_skips_broken_entries() {
    let registry = sample_registry(20).unwrap();
    let mut snapshot = RegistrySnapshot::capture(&registry);
    let duplicate = snapshot.individuals[0].clone();
    snapshot.individuals.push(duplicate);
    snapshot.individuals.retain(|individual| individual.id != 2);

    let restored = snapshot.restore().unwrap();

    assert_eq!(restored.individual_count(), 19);
    assert_eq!(members(&restored, "G1"), vec![1, 3, 4, 5]);
    assert_consistent(&restored);
}

#[test]
fn test_missing_snapshot_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = read_snapshot(&dir.path().join("none.json")).unwrap_err();

    assert!(matches!(err, TrackerError::File { .. }));
}

#[test]
fn test_corrupt_snapshot_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapshot.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(read_snapshot(&path), Err(TrackerError::Json(_))));
}
