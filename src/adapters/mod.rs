//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `report/` - tab-separated family report and change list loading
//! - `task_file/` - one task file per reload pass

pub mod report;
pub mod task_file;
