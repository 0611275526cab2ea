//! Centralized path definitions for nestreload
//!
//! This module provides a single source of truth for the file names nestreload
//! reads and writes.
//!
//! ## Layout
//!
//! ### Output directory
//!
//! ```text
//! out/
//! ├── TaskOutput0.txt     # nearest hosts of the changed families
//! ├── TaskOutput1.txt     # one nesting level up
//! └── TaskOutputN.txt     # furthest ancestors
//! ```
//!
//! ### Configuration
//!
//! ```text
//! ./nestreload.toml                # project config (working directory)
//! ~/.nestreload/config.toml        # user config
//! ```

use std::path::{Path, PathBuf};

// =============================================================================
// Task files
// =============================================================================

/// Default task file name prefix
pub const DEFAULT_TASK_FILE_PREFIX: &str = "TaskOutput";

/// Task file extension
pub const TASK_FILE_EXTENSION: &str = "txt";

/// Default file name prefix of family base data reports
pub const DEFAULT_BASE_DATA_PREFIX: &str = "FamilyBase";

/// Default separator between segments of a nesting chain
pub const DEFAULT_NESTING_SEPARATOR: &str = "::";

/// Get the task file path for pass `index`.
///
/// Returns `{dir}/{prefix}{index}.txt`.
#[must_use]
pub fn task_file(dir: &Path, prefix: &str, index: usize) -> PathBuf {
    dir.join(format!("{prefix}{index}.{TASK_FILE_EXTENSION}"))
}

// =============================================================================
// Configuration files
// =============================================================================

/// Project configuration filename
pub const PROJECT_CONFIG: &str = "nestreload.toml";

/// Global config directory name
const GLOBAL_DIR: &str = ".nestreload";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get path to the project config in the working directory.
#[must_use]
pub fn project_config() -> PathBuf {
    PathBuf::from(PROJECT_CONFIG)
}

/// Get the global nestreload directory.
///
/// Returns `~/.nestreload/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.nestreload/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
