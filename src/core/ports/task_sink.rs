//! Task sink port
//!
//! Defines where the level builder hands finished passes.

use std::path::PathBuf;

use super::super::models::ReloadPass;

/// Destination for reload passes
///
/// Implementations persist one pass at a time, typically as one task file per
/// pass. A failing write must not affect later passes.
pub trait TaskSink {
    /// Persist a single pass, returning where it was written
    fn write_pass(&mut self, pass: &ReloadPass) -> anyhow::Result<PathBuf>;

    /// Remove output left over from a previous run
    ///
    /// Returns the number of removed entries. The default does nothing.
    fn clear_stale(&mut self) -> anyhow::Result<usize> {
        Ok(0)
    }
}
