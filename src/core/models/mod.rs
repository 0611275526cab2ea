//! Domain models for nestreload
//!
//! Core abstractions:
//! - Family records: root, nested and changed families keyed by `(name, category)`
//! - Plan: the ordered reload passes computed from a change list
//! - Outcome: the uniform status/messages/payload result of every entry point

mod circular;
mod family;
mod outcome;
mod plan;

pub use circular::CircularReference;
pub use family::{ChangedFamily, Family, Identity, NestedFamily, RootFamily, split_chain};
pub use outcome::Outcome;
pub use plan::{ReloadPass, ReloadPlan};
