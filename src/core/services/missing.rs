//! Missing family detection
//!
//! A family is missing when it is nested somewhere but has no root record, i.e.
//! it was never registered in the library on its own.

use std::collections::HashSet;

use super::hosts::HostResolver;
use crate::core::models::{Family, Identity, NestedFamily, RootFamily};

/// Unique identities referenced by the nested table, first occurrence first
///
/// Covers every chain segment below the top-level host as well as the record's
/// own identity, so hosts that only show up inside chains are included.
#[must_use]
pub fn unique_nested_identities(nested: &[NestedFamily]) -> Vec<Identity> {
    let mut unique = Vec::new();
    let mut seen = HashSet::new();

    for row in nested {
        for identity in row.chain().skip(1).chain(std::iter::once(row.identity())) {
            if seen.insert(identity.clone()) {
                unique.push(identity);
            }
        }
    }

    unique
}

/// Nested identities without a matching root record
#[must_use]
pub fn find_missing(roots: &[RootFamily], nested: &[NestedFamily]) -> Vec<Identity> {
    unique_nested_identities(nested)
        .into_iter()
        .filter(|identity| !roots.iter().any(|root| root.is(identity)))
        .collect()
}

/// Registered roots that host one of the `missing` families
#[must_use]
pub fn find_missing_direct_hosts(missing: &[Identity], resolver: &HostResolver) -> Vec<RootFamily> {
    resolver.roots_for(&resolver.chain_hosts(missing))
}
