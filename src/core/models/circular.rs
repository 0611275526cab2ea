//! Circular nesting diagnostics

use serde::Serialize;

use super::family::Identity;

/// A nested occurrence whose ancestor chain contains the same family twice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircularReference {
    /// The family that appears more than once in the chain
    pub family: Identity,
    /// Full ancestor chain of the offending occurrence
    pub chain: Vec<String>,
    /// Nesting level (0 = top-level host) of the repeated occurrence
    pub level: usize,
}

impl std::fmt::Display for CircularReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} repeats at level {} in {}", self.family, self.level, self.chain.join(" :: "))
    }
}
