//! Property-based tests for the level builder
//!
//! Random acyclic hierarchies: family `i` may only be nested in families with a
//! smaller index, so every generated hierarchy terminates well inside the bound.

use std::collections::{HashMap, HashSet};

use nestreload::core::models::{ChangedFamily, NestedFamily, ReloadPlan, RootFamily};
use nestreload::core::services::{HostResolver, LevelBuilder, LevelOutcome};
use proptest::prelude::*;

const MAX_FAMILIES: usize = 8;

fn family_name(index: usize) -> String {
    format!("F{index}")
}

fn family_path(index: usize) -> String {
    format!("C:/lib/F{index}.rfa")
}

/// Hosts of each family, derived from the generated masks
fn parents(masks: &[Vec<bool>]) -> Vec<Vec<usize>> {
    masks
        .iter()
        .enumerate()
        .map(|(i, mask)| (0..i).filter(|j| mask[*j]).collect())
        .collect()
}

/// Every chain from a top-level family down to `node`
fn chains_to(node: usize, parents: &[Vec<usize>]) -> Vec<Vec<usize>> {
    if parents[node].is_empty() {
        return vec![vec![node]];
    }
    parents[node]
        .iter()
        .flat_map(|parent| chains_to(*parent, parents))
        .map(|mut chain| {
            chain.push(node);
            chain
        })
        .collect()
}

fn nested_rows(parents: &[Vec<usize>]) -> Vec<NestedFamily> {
    let mut rows = Vec::new();
    for node in 0..parents.len() {
        for chain in chains_to(node, parents).into_iter().filter(|c| c.len() > 1) {
            rows.push(NestedFamily::new(
                family_name(node),
                "Cat",
                family_path(node),
                chain.iter().map(|i| family_name(*i)).collect(),
                vec!["Cat".to_string(); chain.len()],
            ));
        }
    }
    rows
}

/// Every family reachable upwards from `changed`
fn ancestors(changed: &[usize], parents: &[Vec<usize>]) -> HashSet<usize> {
    let mut seen = HashSet::new();
    let mut stack: Vec<usize> = changed.iter().flat_map(|c| parents[*c].clone()).collect();
    while let Some(node) = stack.pop() {
        if seen.insert(node) {
            stack.extend(parents[node].iter().copied());
        }
    }
    seen
}

fn build(masks: &[Vec<bool>], changed_mask: &[bool]) -> (Vec<Vec<usize>>, Vec<usize>, ReloadPlan) {
    let parents = parents(masks);
    let roots: Vec<RootFamily> = (0..parents.len())
        .map(|i| RootFamily::new(family_name(i), "Cat", family_path(i)))
        .collect();
    let nested = nested_rows(&parents);
    let changed: Vec<usize> = (0..parents.len()).filter(|i| changed_mask[*i]).collect();
    let changes: Vec<ChangedFamily> = changed
        .iter()
        .map(|i| ChangedFamily::new(family_name(*i), "Cat", family_path(*i)))
        .collect();

    let resolver = HostResolver::new(&roots, &nested);
    let plan = match LevelBuilder::new(&resolver).plan(&changes) {
        LevelOutcome::Settled(plan) => plan,
        LevelOutcome::BoundExceeded { passes, .. } => panic!("acyclic hierarchy overran after {passes} passes"),
    };
    (parents, changed, plan)
}

fn pass_index(plan: &ReloadPlan) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for pass in &plan.passes {
        for family in &pass.families {
            index.insert(family.name.clone(), pass.index);
        }
    }
    index
}

fn hierarchy() -> impl Strategy<Value = (Vec<Vec<bool>>, Vec<bool>)> {
    (
        prop::collection::vec(prop::collection::vec(any::<bool>(), MAX_FAMILIES), 2..=MAX_FAMILIES),
        prop::collection::vec(any::<bool>(), MAX_FAMILIES),
    )
}

proptest! {
    /// A family is scheduled in at most one pass
    #[test]
    fn no_family_scheduled_twice((masks, changed_mask) in hierarchy()) {
        let (_, _, plan) = build(&masks, &changed_mask);
        let mut seen = HashSet::new();
        for pass in &plan.passes {
            for family in &pass.families {
                prop_assert!(seen.insert(family.name.clone()), "{} scheduled twice", family.name);
            }
        }
    }

    /// Every ancestor of a changed family gets reloaded
    #[test]
    fn every_ancestor_is_scheduled((masks, changed_mask) in hierarchy()) {
        let (parents, changed, plan) = build(&masks, &changed_mask);
        let scheduled = pass_index(&plan);
        for ancestor in ancestors(&changed, &parents) {
            prop_assert!(scheduled.contains_key(&family_name(ancestor)), "F{ancestor} not scheduled");
        }
        prop_assert_eq!(scheduled.len(), ancestors(&changed, &parents).len());
    }

    /// A host is reloaded after every scheduled family nested in it
    #[test]
    fn hosts_come_after_their_children((masks, changed_mask) in hierarchy()) {
        let (parents, _, plan) = build(&masks, &changed_mask);
        let scheduled = pass_index(&plan);
        for (child, hosts) in parents.iter().enumerate() {
            let Some(child_pass) = scheduled.get(&family_name(child)) else {
                continue;
            };
            for host in hosts {
                let host_pass = scheduled[&family_name(*host)];
                prop_assert!(host_pass > *child_pass, "F{host} (pass {host_pass}) not after F{child}");
            }
        }
    }

    /// Pass indices are contiguous from zero and no pass is empty
    #[test]
    fn passes_are_contiguous((masks, changed_mask) in hierarchy()) {
        let (_, _, plan) = build(&masks, &changed_mask);
        for (position, pass) in plan.passes.iter().enumerate() {
            prop_assert_eq!(pass.index, position);
            prop_assert!(!pass.is_empty());
        }
    }
}
