//! Circular nesting detection
//!
//! Reports chains in which a family hosts itself, directly or further down.
//! Purely diagnostic: the level builder does not consult it.

use std::collections::HashSet;

use crate::core::models::{CircularReference, Identity, NestedFamily};

/// Nested records whose ancestor chain repeats an identity
///
/// Each `(family, chain)` combination is reported once, at the level of its
/// first repeat.
#[must_use]
pub fn find_circular_references(nested: &[NestedFamily]) -> Vec<CircularReference> {
    let mut found: Vec<CircularReference> = Vec::new();

    for row in nested {
        let Some((level, family)) = first_repeat(row) else {
            continue;
        };
        if found.iter().any(|c| c.family == family && c.chain == row.root_path) {
            continue;
        }
        found.push(CircularReference {
            family,
            chain: row.root_path.clone(),
            level,
        });
    }

    found
}

fn first_repeat(row: &NestedFamily) -> Option<(usize, Identity)> {
    let mut seen = HashSet::new();
    row.chain().enumerate().find(|(_, identity)| !seen.insert(identity.clone()))
}
