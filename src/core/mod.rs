//! Core domain logic for nestreload
//!
//! This module contains pure business logic with no I/O dependencies.
//! Writing task files is abstracted through a port trait.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (families, plans, outcomes)
//! - `services/` - Host resolution, level building, missing/circular detection
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
