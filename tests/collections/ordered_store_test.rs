//! Tests for the ordered store
//!
//! Covers ordering under natural and custom comparators, duplicate
//! handling, inclusive range scans and repeated range/search calls.

use step_tracker::{FnOrder, Individual, OrderedCollection, OrderedStore};

use crate::utils::individual;

#[derive(Debug, Clone, PartialEq)]
struct Station {
    code: String,
    steps: u32,
}

fn station(code: &str, steps: u32) -> Station {
    Station {
        code: code.to_string(),
        steps,
    }
}

fn station_code(station: &Station) -> &str {
    &station.code
}

fn station_steps(station: &Station) -> &u32 {
    &station.steps
}

fn ids(items: &[Individual]) -> Vec<u32> {
    items.iter().map(|individual| individual.id).collect()
}

#[test]
fn test_entity_store_keeps_id_order() {
    let mut store = OrderedStore::<Individual, u32>::for_entities();
    for id in [5, 1, 4, 2, 3] {
        assert!(store.insert(individual(id, 5000, &[])));
    }

    assert_eq!(ids(store.as_slice()), vec![1, 2, 3, 4, 5]);
    assert_eq!(store.size(), 5);
    assert!(store.contains(&3));
    assert!(!store.contains(&6));
}

#[test]
fn test_duplicate_insert_leaves_original() {
    let mut store = OrderedStore::<Individual, u32>::for_entities();
    assert!(store.insert(individual(1, 5000, &[])));
    assert!(!store.insert(individual(1, 9000, &[])));

    assert_eq!(store.size(), 1);
    assert_eq!(store.get(&1).map(|i| i.daily_step_goal), Some(5000));
}

#[test]
fn test_insert_all_counts_new_items() {
    let mut store = OrderedStore::<Individual, u32>::for_entities();
    let added = store.insert_all([1, 2, 2, 3, 1].map(|id| individual(id, 5000, &[])));

    assert_eq!(added, 3);
    assert_eq!(ids(store.as_slice()), vec![1, 2, 3]);
}

#[test]
fn test_search_allows_field_updates() {
    let mut store = OrderedStore::<Individual, u32>::for_entities();
    store.insert(individual(7, 5000, &[]));

    if let Some(found) = store.search(&7) {
        found.daily_step_goal = 6500;
    }
    assert_eq!(store.get(&7).map(|i| i.daily_step_goal), Some(6500));
    assert!(store.search(&8).is_none());
}

#[test]
fn test_remove_reports_presence() {
    let mut store = OrderedStore::<Individual, u32>::for_entities();
    store.insert_all((1..=3).map(|id| individual(id, 5000, &[])));

    assert!(store.remove(&2));
    assert!(!store.remove(&2));
    assert_eq!(ids(store.as_slice()), vec![1, 3]);
}

#[test]
fn test_range_is_inclusive() {
    let mut store = OrderedStore::<Individual, u32>::for_entities();
    store.insert_all([2, 4, 6, 8, 10].map(|id| individual(id, 5000, &[])));

    assert_eq!(ids(store.range_slice(&4, &8)), vec![4, 6, 8]);
    assert_eq!(ids(store.range_slice(&3, &9)), vec![4, 6, 8]);
    assert_eq!(ids(store.range_slice(&10, &10)), vec![10]);
    assert!(store.range_slice(&11, &20).is_empty());
    assert!(store.range(&8, &4).is_empty());
}

#[test]
fn test_string_keys_order_lexicographically() {
    let mut store = OrderedStore::<Station, str>::new(station_code);
    for code in ["G10", "G2", "G1"] {
        store.insert(station(code, 0));
    }

    let codes: Vec<&str> = store.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["G1", "G10", "G2"]);

    let ranged: Vec<&str> = store
        .range("G1", "G11")
        .into_iter()
        .map(|s| s.code.as_str())
        .collect();
    assert_eq!(ranged, vec!["G1", "G10"]);
}

#[test]
fn test_custom_comparator_defines_equality() {
    let mut store = OrderedStore::<Station, str, _>::with_comparator(
        station_code,
        FnOrder(|a: &str, b: &str| a.to_ascii_lowercase() < b.to_ascii_lowercase()),
    );

    assert!(store.insert(station("beta", 1)));
    assert!(store.insert(station("Alpha", 2)));
    assert!(!store.insert(station("ALPHA", 3)));

    assert_eq!(store.size(), 2);
    assert_eq!(store.get("alpha").map(|s| s.steps), Some(2));
    assert_eq!(store.as_slice()[0].code, "Alpha");
}

#[test]
fn test_reverse_comparator_flips_ranges() {
    let mut store =
        OrderedStore::<Station, u32, _>::with_comparator(station_steps, FnOrder(|a: &u32, b: &u32| a > b));
    store.insert_all([100, 300, 200, 400].map(|steps| station("S", steps)));

    let order: Vec<u32> = store.iter().map(|s| s.steps).collect();
    assert_eq!(order, vec![400, 300, 200, 100]);

    let ranged: Vec<u32> = store.range(&300, &100).into_iter().map(|s| s.steps).collect();
    assert_eq!(ranged, vec![300, 200, 100]);
    assert!(store.range(&100, &300).is_empty());
}

#[test]
fn test_range_then_search_finds_every_item() {
    let mut store = OrderedStore::<Individual, u32>::for_entities();
    store.insert_all((1..=20).map(|id| individual(id, 5000, &[])));

    let first: Vec<u32> = store.range(&5, &15).into_iter().map(|i| i.id).collect();
    let second: Vec<u32> = store.range(&5, &15).into_iter().map(|i| i.id).collect();
    assert_eq!(first, second);

    for id in first {
        assert_eq!(store.search(&id).map(|i| i.id), Some(id));
    }
}

#[test]
fn test_all_values_visits_in_order() {
    let mut store = OrderedStore::<Individual, u32>::for_entities();
    store.insert_all([3, 1, 2].map(|id| individual(id, 5000, &[])));

    for (offset, item) in store.all_values().into_iter().enumerate() {
        item.daily_step_goal += u32::try_from(offset).unwrap();
    }
    let goals: Vec<u32> = store.values().into_iter().map(|i| i.daily_step_goal).collect();
    assert_eq!(goals, vec![5000, 5001, 5002]);
}
