//! Reload plan model
//!
//! A plan is the ordered list of passes produced by the level builder. Pass 0
//! holds the nearest hosts of the changed families; every later pass sits one
//! nesting level further up.

use std::time::Duration;

use serde::Serialize;

use super::family::RootFamily;

/// One batch of host families reloaded together
#[derive(Debug, Clone, Serialize)]
pub struct ReloadPass {
    /// Zero-based pass index, also the task file counter
    pub index: usize,
    /// Host families to reload in this pass (may be empty)
    pub families: Vec<RootFamily>,
    /// Hosts dropped from this pass because they recur further up
    pub deferred: usize,
    /// Time spent resolving the level this pass came from
    #[serde(skip)]
    pub elapsed: Duration,
}

impl ReloadPass {
    /// Whether this pass has nothing to reload
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// File paths of the families in this pass, in order
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.families.iter().map(|f| f.file_path.as_str()).collect()
    }
}

/// Ordered sequence of reload passes
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReloadPlan {
    /// Passes, nearest hosts first
    pub passes: Vec<ReloadPass>,
}

impl ReloadPlan {
    /// Number of passes (empty ones included)
    #[must_use]
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Whether the plan has no passes at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Total number of scheduled families over all passes
    #[must_use]
    pub fn family_count(&self) -> usize {
        self.passes.iter().map(|p| p.families.len()).sum()
    }

    /// Index of the pass a family with the given file path is scheduled in
    #[must_use]
    pub fn pass_of(&self, file_path: &str) -> Option<usize> {
        self.passes
            .iter()
            .find(|p| p.families.iter().any(|f| f.file_path == file_path))
            .map(|p| p.index)
    }
}
