//! Business logic services
//!
//! Pure functions and small structs over in-memory tables. No I/O.

mod circular;
mod hosts;
mod levels;
mod missing;

pub use circular::find_circular_references;
pub use hosts::{HostResolver, find_direct_hosts, find_roots_from_hosts};
pub use levels::{LevelBuilder, LevelOutcome, LevelState, MAX_PASSES, settle};
pub use missing::{find_missing, find_missing_direct_hosts, unique_nested_identities};
