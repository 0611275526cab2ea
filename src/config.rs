//! Configuration management
//!
//! Settings are read from TOML. Lookup order: an explicit path, then
//! `nestreload.toml` in the working directory, then `~/.nestreload/config.toml`,
//! then built-in defaults. Every field has a default, so partial files are fine.
//!
//! The pass bound is deliberately not configurable.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths;

/// Errors reading an explicitly requested config file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config {path}: {source}")]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },
}

/// Complete nestreload configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReloadConfig {
    /// Family report settings
    #[serde(default)]
    pub report: ReportConfig,
    /// Change list settings
    #[serde(default)]
    pub change_list: ChangeListConfig,
    /// Task file output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Family report settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Separator between nesting chain segments
    pub nesting_separator: String,
    /// File name prefix used when searching a directory for the report
    pub base_data_prefix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            nesting_separator: paths::DEFAULT_NESTING_SEPARATOR.to_string(),
            base_data_prefix: paths::DEFAULT_BASE_DATA_PREFIX.to_string(),
        }
    }
}

/// Change list settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeListConfig {
    /// Drop a trailing `.rfa` from changed family names
    pub strip_rfa_extension: bool,
}

impl Default for ChangeListConfig {
    fn default() -> Self {
        Self {
            strip_rfa_extension: true,
        }
    }
}

/// Task file output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Task file name prefix
    pub task_file_prefix: String,
    /// Remove task files of a previous run before writing
    pub clear_stale: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            task_file_prefix: paths::DEFAULT_TASK_FILE_PREFIX.to_string(),
            clear_stale: false,
        }
    }
}

impl ReloadConfig {
    /// Load config from an explicit file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse config from TOML text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Resolve the effective config
    ///
    /// An explicit path must load. Implicit locations that fail to load are
    /// skipped with a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        for candidate in [paths::project_config(), paths::global_config()] {
            if !candidate.is_file() {
                continue;
            }
            match Self::from_file(&candidate) {
                Ok(config) => {
                    log::debug!("Using config {}", candidate.display());
                    return Ok(config);
                },
                Err(e) => log::warn!("Ignoring config: {e}"),
            }
        }

        Ok(Self::default())
    }

    /// Render config as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
