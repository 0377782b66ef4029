//! Tests for loading and saving the CSV files

use std::fs;

use step_tracker::storage::{GROUPS_HEADER, individuals_header};
use step_tracker::utils::{generate_sample_data, sample_registry};
use step_tracker::{Individual, RankingEngine, StepHistory, TrackerError};
use tempfile::TempDir;

use crate::utils::{assert_consistent, members, registry_with, storage_in};

#[test]
fn test_sample_data_survives_save_and_load() {
    let dir = TempDir::new().unwrap();
    let storage = storage_in(dir.path());
    generate_sample_data(&storage, 20).unwrap();

    let loaded = storage.load().unwrap();
    let expected = sample_registry(20).unwrap();

    assert_eq!(loaded.individual_count(), 20);
    assert_eq!(loaded.group_count(), 5);
    assert_eq!(loaded.individuals(), expected.individuals());
    assert_eq!(loaded.groups(), expected.groups());
    assert_eq!(members(&loaded, "G2"), vec![6, 7, 8, 9]);
    assert_eq!(
        loaded.lookup_individual(12).unwrap().current_group_id(),
        Some("G3")
    );
    assert_consistent(&loaded);
}

#[test]
fn test_saved_files_use_expected_layout() {
    let dir = TempDir::new().unwrap();
    let storage = storage_in(dir.path());
    let mut registry = registry_with([2, 1]);
    registry.create_group("G1", "Team", &[2, 1], 10_000).unwrap();

    storage.save(&registry).unwrap();

    let individuals = fs::read_to_string(storage.individuals_path()).unwrap();
    let lines: Vec<&str> = individuals.lines().collect();
    assert_eq!(lines[0], individuals_header());
    assert_eq!(lines[1], "1,User1,30,5000,5000,5000,5000,5000,5000,5000,5000");
    assert_eq!(lines.len(), 3);

    let groups = fs::read_to_string(storage.groups_path()).unwrap();
    assert_eq!(
        groups.lines().collect::<Vec<_>>(),
        vec![GROUPS_HEADER, "G1,Team,1;2,10000"]
    );
}

#[test]
fn test_missing_files_load_empty() {
    let dir = TempDir::new().unwrap();
    let registry = storage_in(&dir.path().join("absent")).load().unwrap();

    assert_eq!(registry.individual_count(), 0);
    assert_eq!(registry.group_count(), 0);
}

#[test]
fn test_malformed_lines_are_skipped() {
    let dir = TempDir::new().unwrap();
    let storage = storage_in(dir.path());
    fs::write(
        storage.individuals_path(),
        format!(
            "{}\n1,Ann,30,5000,5100,5200\nnot,a,valid,line\n\n2,Bob\n3,Cid,41,6000\n1,Dup,30,1,1\n",
            individuals_header()
        ),
    )
    .unwrap();
    fs::write(
        storage.groups_path(),
        format!("{GROUPS_HEADER}\nG1,Team,1;3;99,9000\nG2,Bad,x;y,100\nG3,Short\n"),
    )
    .unwrap();

    let registry = storage.load().unwrap();

    let ids: Vec<u32> = registry.individuals().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(registry.lookup_individual(1).unwrap().name, "Ann");
    assert_eq!(registry.lookup_individual(1).unwrap().total_steps(), 10_300);
    assert!(registry.lookup_individual(3).unwrap().steps().is_empty());

    assert_eq!(registry.group_count(), 1);
    assert_eq!(members(&registry, "G1"), vec![1, 3]);
    assert_consistent(&registry);
}

#[test]
fn test_empty_group_round_trips() {
    let dir = TempDir::new().unwrap();
    let storage = storage_in(dir.path());
    let mut registry = registry_with([1]);
    registry.create_group("G1", "Solo", &[1], 5000).unwrap();
    registry.delete_individual(1).unwrap();

    storage.save(&registry).unwrap();
    let loaded = storage.load().unwrap();

    assert_eq!(loaded.lookup_group("G1").unwrap().member_count(), 0);
    assert_consistent(&loaded);
}

#[test]
fn test_points_are_not_stored_in_csv() {
    let dir = TempDir::new().unwrap();
    let storage = storage_in(dir.path());
    let mut registry = sample_registry(20).unwrap();
    RankingEngine::default()
        .reward_if_top_n(&mut registry, 19)
        .unwrap();

    storage.save(&registry).unwrap();
    let loaded = storage.load().unwrap();

    assert_eq!(registry.lookup_individual(19).unwrap().points(), 100);
    assert_eq!(loaded.lookup_individual(19).unwrap().points(), 0);
}

#[test]
fn test_names_with_separators_never_reach_the_files() {
    let dir = TempDir::new().unwrap();
    let storage = storage_in(dir.path());
    let mut registry = registry_with([2]);

    let err = registry
        .add_individual(Individual::new(1, "Smith, John", 30, 5000, vec![5000; 7]))
        .unwrap_err();
    assert!(matches!(err, TrackerError::UnstorableText { field: "individual name", .. }));
    registry
        .add_individual(Individual::new(1, "Smith John", 30, 5000, vec![5000; 7]))
        .unwrap();
    assert!(registry.create_group("G1", "Team, A", &[1, 2], 9000).is_err());
    registry.create_group("G1", "Team A", &[1, 2], 9000).unwrap();

    storage.save(&registry).unwrap();
    let loaded = storage.load().unwrap();

    assert_eq!(loaded.individuals(), registry.individuals());
    assert_eq!(loaded.groups(), registry.groups());
    assert_eq!(loaded.lookup_individual(1).unwrap().name, "Smith John");
    assert_eq!(members(&loaded, "G1"), vec![1, 2]);
    assert_consistent(&loaded);
}
