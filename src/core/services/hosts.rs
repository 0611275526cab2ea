//! Host resolution - find the families one nesting level up
//!
//! Two flavours live here. The free functions scan the tables linearly and are
//! the reference behaviour. `HostResolver` indexes both tables once and answers
//! the same questions through hash lookups; the level builder calls it once per
//! level, so the scan cost would otherwise be paid on every pass.
//!
//! Result lists are ordered by first discovery (input order, then row order)
//! and never contain the same identity twice.

use std::collections::{HashMap, HashSet};

use crate::core::models::{Family, Identity, NestedFamily, RootFamily};

/// Direct hosts of `items`, scanning the nested table
///
/// A row contributes when it carries the item's identity and its chain ends in
/// the item. The host is the second-to-last chain segment.
#[must_use]
pub fn find_direct_hosts<F: Family>(items: &[F], nested: &[NestedFamily]) -> Vec<Identity> {
    let mut hosts = Vec::new();
    let mut seen = HashSet::new();

    for item in items {
        let identity = item.identity();
        for row in nested.iter().filter(|row| row.is_direct_occurrence_of(&identity)) {
            if let Some(host) = row.direct_host()
                && seen.insert(host.clone())
            {
                hosts.push(host);
            }
        }
    }

    hosts
}

/// Root records for the given host identities, scanning the root table
///
/// Hosts without a root record are dropped. With duplicate root identities the
/// first row wins.
#[must_use]
pub fn find_roots_from_hosts(hosts: &[Identity], roots: &[RootFamily]) -> Vec<RootFamily> {
    let mut found = Vec::new();
    let mut seen = HashSet::new();

    for host in hosts {
        if !seen.insert(host) {
            continue;
        }
        if let Some(root) = roots.iter().find(|root| root.is(host)) {
            found.push(root.clone());
        }
    }

    found
}

/// Pre-indexed view over the root and nested tables
#[derive(Debug, Clone, Default)]
pub struct HostResolver {
    /// identity -> direct hosts, from rows ending in that identity
    direct: HashMap<Identity, Vec<Identity>>,
    /// identity -> hosts, from every adjacent pair of every chain
    chained: HashMap<Identity, Vec<Identity>>,
    /// identity -> first root row with that identity
    roots: HashMap<Identity, RootFamily>,
}

impl HostResolver {
    /// Index both tables
    #[must_use]
    pub fn new(roots: &[RootFamily], nested: &[NestedFamily]) -> Self {
        let mut resolver = Self::default();

        for root in roots {
            resolver.roots.entry(root.identity()).or_insert_with(|| root.clone());
        }

        for row in nested {
            let identity = row.identity();
            if row.is_direct_occurrence_of(&identity)
                && let Some(host) = row.direct_host()
            {
                push_unique(resolver.direct.entry(identity).or_default(), host);
            }

            let chain: Vec<Identity> = row.chain().collect();
            for pair in chain.windows(2) {
                push_unique(resolver.chained.entry(pair[1].clone()).or_default(), pair[0].clone());
            }
        }

        resolver
    }

    /// Direct hosts of `items` (see [`find_direct_hosts`])
    #[must_use]
    pub fn direct_hosts<F: Family>(&self, items: &[F]) -> Vec<Identity> {
        collect_hosts(items, &self.direct)
    }

    /// Hosts of `items` anywhere they appear inside an ancestor chain
    ///
    /// Unlike [`Self::direct_hosts`] this also covers families that only show up
    /// as intermediate chain segments and never have a row of their own.
    #[must_use]
    pub fn chain_hosts<F: Family>(&self, items: &[F]) -> Vec<Identity> {
        collect_hosts(items, &self.chained)
    }

    /// Root records for host identities (see [`find_roots_from_hosts`])
    #[must_use]
    pub fn roots_for(&self, hosts: &[Identity]) -> Vec<RootFamily> {
        let mut seen = HashSet::new();
        hosts
            .iter()
            .filter(|host| seen.insert(*host))
            .filter_map(|host| self.roots.get(host).cloned())
            .collect()
    }

    /// Registered direct hosts of `items`
    #[must_use]
    pub fn resolve<F: Family>(&self, items: &[F]) -> Vec<RootFamily> {
        self.roots_for(&self.direct_hosts(items))
    }

    /// Whether a root record exists for `identity`
    #[must_use]
    pub fn is_registered(&self, identity: &Identity) -> bool {
        self.roots.contains_key(identity)
    }
}

fn collect_hosts<F: Family>(items: &[F], index: &HashMap<Identity, Vec<Identity>>) -> Vec<Identity> {
    let mut hosts = Vec::new();
    let mut seen = HashSet::new();

    for item in items {
        let Some(found) = index.get(&item.identity()) else {
            continue;
        };
        for host in found {
            if seen.insert(host) {
                hosts.push(host.clone());
            }
        }
    }

    hosts
}

fn push_unique(list: &mut Vec<Identity>, identity: Identity) {
    if !list.contains(&identity) {
        list.push(identity);
    }
}
