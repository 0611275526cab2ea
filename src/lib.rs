//! nestreload - resolve nested family dependencies and schedule reload passes
//!
//! Given a library of nested, reusable families and a list of changed leaf
//! families, this library computes the ordered batches of host families that
//! must be reloaded bottom-up through the nesting hierarchy, and reports nested
//! families that were never registered in the library.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
pub mod workflows;

pub use workflows::{
    build_work_lists, check_families_have_circular_references,
    check_families_missing_from_library, find_missing_families_direct_host_families,
};
