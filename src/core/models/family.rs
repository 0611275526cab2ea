//! Family records
//!
//! Three closed record types describe what the reports contain:
//! - `RootFamily`: a family registered as an independently reloadable unit
//! - `NestedFamily`: one occurrence of a family embedded in a host, with its ancestor chain
//! - `ChangedFamily`: a leaf family known to be modified
//!
//! All of them compare and hash on `(name, category)` only. The file path is payload.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Stable identity of a family: its name and category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity {
    /// Family name
    pub name: String,
    /// Family category
    pub category: String,
}

impl Identity {
    /// Create an identity from a name and a category
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name, self.category)
    }
}

/// Anything carrying a family identity
pub trait Family {
    /// Family name
    fn name(&self) -> &str;

    /// Family category
    fn category(&self) -> &str;

    /// Owned identity of this family
    fn identity(&self) -> Identity {
        Identity::new(self.name(), self.category())
    }

    /// Whether this family has the given identity
    fn is(&self, identity: &Identity) -> bool {
        self.name() == identity.name && self.category() == identity.category
    }
}

impl Family for Identity {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        &self.category
    }
}

/// A family registered in the library as a top-level unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootFamily {
    /// Family name
    pub name: String,
    /// Family category
    pub category: String,
    /// Fully qualified path of the family file
    pub file_path: String,
}

impl RootFamily {
    /// Create a root family record
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            file_path: file_path.into(),
        }
    }
}

/// A family occurrence nested inside one or more hosts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedFamily {
    /// Family name
    pub name: String,
    /// Family category
    pub category: String,
    /// Fully qualified path of the family file
    pub file_path: String,
    /// Ancestor chain of names, top-level host first, ending with this family's name
    pub root_path: Vec<String>,
    /// Category chain parallel to `root_path`
    pub category_path: Vec<String>,
}

impl NestedFamily {
    /// Create a nested family record from already split chains
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        file_path: impl Into<String>,
        root_path: Vec<String>,
        category_path: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            file_path: file_path.into(),
            root_path,
            category_path,
        }
    }

    /// Create a nested family record, splitting both chains on `separator`
    #[must_use]
    pub fn from_chains(
        name: impl Into<String>,
        category: impl Into<String>,
        file_path: impl Into<String>,
        root_path: &str,
        category_path: &str,
        separator: &str,
    ) -> Self {
        Self::new(
            name,
            category,
            file_path,
            split_chain(root_path, separator),
            split_chain(category_path, separator),
        )
    }

    /// Whether this record is a direct occurrence of `identity`
    ///
    /// The record must carry the identity and its chain must end in it. Deeper
    /// descendants that merely mention the identity in their chain do not count.
    #[must_use]
    pub fn is_direct_occurrence_of(&self, identity: &Identity) -> bool {
        self.is(identity)
            && self.root_path.last().is_some_and(|last| *last == identity.name)
            && self.category_path.last().is_some_and(|last| *last == identity.category)
    }

    /// Whether the name and category chains have the same length
    #[must_use]
    pub fn chains_match(&self) -> bool {
        self.root_path.len() == self.category_path.len()
    }

    /// Identity one nesting level up, taken from the second-to-last chain segment
    #[must_use]
    pub fn direct_host(&self) -> Option<Identity> {
        let depth = self.root_path.len();
        if depth < 2 || !self.chains_match() {
            return None;
        }
        Some(Identity::new(
            self.root_path[depth - 2].clone(),
            self.category_path[depth - 2].clone(),
        ))
    }

    /// Nesting level of this occurrence (0 = top-level host)
    #[must_use]
    pub fn level(&self) -> usize {
        self.root_path.len().saturating_sub(1)
    }

    /// Chain segments paired with their categories
    ///
    /// Stops at the shorter of the two chains.
    pub fn chain(&self) -> impl Iterator<Item = Identity> + '_ {
        self.root_path
            .iter()
            .zip(&self.category_path)
            .map(|(name, category)| Identity::new(name.clone(), category.clone()))
    }
}

/// A family known to have changed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangedFamily {
    /// Family name
    pub name: String,
    /// Family category
    pub category: String,
    /// Fully qualified path of the family file
    pub file_path: String,
}

impl ChangedFamily {
    /// Create a changed family record
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            file_path: file_path.into(),
        }
    }
}

/// Split a nesting chain on `separator`, trimming each segment
#[must_use]
pub fn split_chain(chain: &str, separator: &str) -> Vec<String> {
    chain.split(separator).map(|segment| segment.trim().to_string()).collect()
}

macro_rules! identity_record {
    ($($ty:ty),+) => {
        $(
            impl Family for $ty {
                fn name(&self) -> &str {
                    &self.name
                }

                fn category(&self) -> &str {
                    &self.category
                }
            }

            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    self.name == other.name && self.category == other.category
                }
            }

            impl Eq for $ty {}

            impl Hash for $ty {
                fn hash<H: Hasher>(&self, state: &mut H) {
                    self.name.hash(state);
                    self.category.hash(state);
                }
            }
        )+
    };
}

identity_record!(RootFamily, NestedFamily, ChangedFamily);
