//! Task file output
//!
//! Writes one plain-text task file per reload pass: `<prefix><index>.txt`, one
//! fully qualified family path per line, no header. Empty passes still get a
//! file so the downstream consumer sees contiguous indices.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::ReloadConfig;
use crate::core::models::ReloadPass;
use crate::core::ports::TaskSink;
use crate::paths;

/// Filesystem task sink
#[derive(Debug, Clone)]
pub struct TaskFileWriter {
    dir: PathBuf,
    prefix: String,
}

impl TaskFileWriter {
    /// Create a writer for `dir` using file name `prefix`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Create a writer for `dir` using the configured prefix
    #[must_use]
    pub fn from_config(dir: impl Into<PathBuf>, config: &ReloadConfig) -> Self {
        Self::new(dir, config.output.task_file_prefix.clone())
    }

    /// Path of the task file for pass `index`
    #[must_use]
    pub fn path_for(&self, index: usize) -> PathBuf {
        paths::task_file(&self.dir, &self.prefix, index)
    }
}

impl TaskSink for TaskFileWriter {
    fn write_pass(&mut self, pass: &ReloadPass) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create output directory {}", self.dir.display()))?;

        let path = self.path_for(pass.index);
        fs::write(&path, render_pass(pass))
            .with_context(|| format!("failed to write task file {}", path.display()))?;
        Ok(path)
    }

    fn clear_stale(&mut self) -> anyhow::Result<usize> {
        clear_task_files(&self.dir, &self.prefix)
    }
}

/// Task file content for a pass
#[must_use]
pub fn render_pass(pass: &ReloadPass) -> String {
    pass.paths().iter().fold(String::new(), |mut out, path| {
        let _ = writeln!(out, "{path}");
        out
    })
}

/// Delete `<prefix>*.txt` files in `dir`, returning how many were removed
pub fn clear_task_files(dir: &Path, prefix: &str) -> anyhow::Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }

    let pattern = format!(
        "{}/{}*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        glob::Pattern::escape(prefix),
        paths::TASK_FILE_EXTENSION
    );

    let mut removed = 0;
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if path.is_file() {
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove stale task file {}", path.display()))?;
            log::debug!("Removed stale task file {}", path.display());
            removed += 1;
        }
    }
    Ok(removed)
}
