//! Property tests over random sequences of registry operations

use std::collections::BTreeSet;

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use step_tracker::{MAX_MEMBERS, MembershipRegistry, TrackerError};

use crate::utils::individual;

#[derive(Debug, Clone)]
enum Op {
    AddIndividual(u32),
    DeleteIndividual(u32),
    CreateGroup(u8, Vec<u32>),
    DeleteGroup(u8),
    MergeGroups(u8, u8),
}

fn group_id(n: u8) -> String {
    format!("G{n}")
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u32..16).prop_map(Op::AddIndividual),
        1 => (0u32..16).prop_map(Op::DeleteIndividual),
        3 => (0u8..6, prop::collection::vec(0u32..16, 0..=7))
            .prop_map(|(g, ids)| Op::CreateGroup(g, ids)),
        1 => (0u8..6).prop_map(Op::DeleteGroup),
        2 => (0u8..6, 0u8..6).prop_map(|(a, b)| Op::MergeGroups(a, b)),
    ]
}

fn apply(registry: &mut MembershipRegistry, op: &Op) -> Result<(), TrackerError> {
    match op {
        Op::AddIndividual(id) => registry.add_individual(individual(*id, 5000, &[5000; 7])),
        Op::DeleteIndividual(id) => registry.delete_individual(*id),
        Op::CreateGroup(g, ids) => registry
            .create_group(&group_id(*g), "Random", ids, 10_000)
            .map(|_| ()),
        Op::DeleteGroup(g) => registry.delete_group(&group_id(*g)),
        Op::MergeGroups(a, b) => registry
            .merge_groups(&group_id(*a), &group_id(*b), "Merged", 20_000)
            .map(|_| ()),
    }
}

fn member_set(registry: &MembershipRegistry, group_id: &str) -> BTreeSet<u32> {
    registry
        .lookup_group(group_id)
        .map(|g| g.member_ids().clone())
        .unwrap_or_default()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn prop_rules_hold_after_every_operation(ops in prop::collection::vec(arb_op(), 1..40)) {
        let mut registry = MembershipRegistry::new();
        for op in &ops {
            let before = registry.clone();
            let outcome = apply(&mut registry, op);

            prop_assert!(registry.check_invariants().is_ok(), "after {:?}: {:?}", op, registry.check_invariants());

            if outcome.is_err() {
                prop_assert_eq!(registry.individuals(), before.individuals());
                prop_assert_eq!(registry.groups(), before.groups());
            }
        }
    }

    #[test]
    fn prop_ids_stay_unique(ops in prop::collection::vec(arb_op(), 1..40)) {
        let mut registry = MembershipRegistry::new();
        for op in &ops {
            let _ = apply(&mut registry, op);
        }

        let ids: BTreeSet<u32> = registry.individuals().iter().map(|i| i.id).collect();
        prop_assert_eq!(ids.len(), registry.individual_count());
        let group_ids: BTreeSet<&str> = registry.groups().iter().map(|g| g.group_id.as_str()).collect();
        prop_assert_eq!(group_ids.len(), registry.group_count());
    }

    #[test]
    fn prop_create_over_cap_never_succeeds(extra in prop::collection::vec(0u32..16, 0..5)) {
        let mut registry = MembershipRegistry::new();
        for id in 0..16 {
            registry.add_individual(individual(id, 5000, &[])).unwrap();
        }

        let mut candidates: Vec<u32> = (0..=MAX_MEMBERS as u32).collect();
        candidates.extend(extra);
        let outcome = registry.create_group("G1", "Crowd", &candidates, 1000);

        prop_assert!(
            matches!(outcome, Err(TrackerError::TooManyMembers { .. })),
            "unexpected outcome {:?}",
            outcome
        );
        prop_assert_eq!(registry.group_count(), 0);
    }

    #[test]
    fn prop_merge_over_cap_leaves_groups(left in 1usize..=5, right in 1usize..=5) {
        let mut registry = MembershipRegistry::new();
        for id in 0..10 {
            registry.add_individual(individual(id, 5000, &[])).unwrap();
        }
        let left_ids: Vec<u32> = (0..left as u32).collect();
        let right_ids: Vec<u32> = (5..5 + right as u32).collect();
        registry.create_group("G1", "Left", &left_ids, 100).unwrap();
        registry.create_group("G2", "Right", &right_ids, 100).unwrap();
        let before_left = member_set(&registry, "G1");
        let before_right = member_set(&registry, "G2");

        let outcome = registry.merge_groups("G1", "G2", "Merged", 200);

        if left + right > MAX_MEMBERS {
            prop_assert!(outcome.is_err());
            prop_assert_eq!(member_set(&registry, "G1"), before_left);
            prop_assert_eq!(member_set(&registry, "G2"), before_right);
        } else {
            prop_assert!(outcome.is_ok());
            prop_assert_eq!(member_set(&registry, "G1").len(), left + right);
            prop_assert!(registry.lookup_group("G2").is_none());
        }
        prop_assert!(registry.check_invariants().is_ok());
    }

    #[test]
    fn prop_delete_member_removes_exactly_one(size in 1usize..=5, pick in 0usize..5) {
        let mut registry = MembershipRegistry::new();
        for id in 0..5 {
            registry.add_individual(individual(id, 5000, &[])).unwrap();
        }
        let ids: Vec<u32> = (0..size as u32).collect();
        registry.create_group("G1", "Team", &ids, 100).unwrap();
        let victim = ids[pick % size];

        registry.delete_individual(victim).unwrap();

        let expected: BTreeSet<u32> = ids.iter().copied().filter(|&id| id != victim).collect();
        prop_assert_eq!(member_set(&registry, "G1"), expected);
    }
}
