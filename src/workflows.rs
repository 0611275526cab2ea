//! Top-level entry points
//!
//! Each workflow loads the reports, runs the core services and wraps the result
//! in an [`Outcome`]. Load failures and other unexpected errors end up as a
//! failed outcome carrying the error text. The only error that escapes is
//! [`ScheduleError::InfiniteLoop`], raised when the level walk exceeds the pass
//! bound.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//!
//! let outcome = nestreload::workflows::build_work_lists(
//!     Path::new("changes.txt"),
//!     Path::new("FamilyBaseDataCombinedReport.csv"),
//!     Path::new("out"),
//! )
//! .expect("nesting deeper than the pass bound");
//! assert!(outcome.status);
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;

use crate::adapters::report::{FamilyReport, ReportError, load_change_list};
use crate::adapters::task_file::TaskFileWriter;
use crate::config::ReloadConfig;
use crate::core::models::{
    ChangedFamily, CircularReference, Family, Identity, Outcome, ReloadPlan, RootFamily,
};
use crate::core::ports::TaskSink;
use crate::core::services::{
    HostResolver, LevelBuilder, LevelOutcome, find_circular_references, find_missing,
    find_missing_direct_hosts, unique_nested_identities,
};

/// Fatal scheduling errors
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The level walk needed more passes than allowed
    #[error("Infinite loop: exceeded maximum number of task list files ({passes}), {count} host(s) still pending", count = .pending.len())]
    InfiniteLoop {
        /// Passes produced before stopping
        passes: usize,
        /// Hosts that were still waiting to be scheduled
        pending: Vec<Identity>,
    },
}

/// Where to read the family tables from
#[derive(Debug, Clone, Copy)]
pub enum ReportSource<'a> {
    /// One combined report (or a directory holding one)
    Combined(&'a Path),
    /// Separate root and nested tables
    Tables {
        /// Root table
        roots: &'a Path,
        /// Nested table
        nested: &'a Path,
    },
}

impl<'a> From<&'a Path> for ReportSource<'a> {
    fn from(path: &'a Path) -> Self {
        Self::Combined(path)
    }
}

impl ReportSource<'_> {
    /// Load the tables
    pub fn load(self, config: &ReloadConfig) -> Result<FamilyReport, ReportError> {
        match self {
            Self::Combined(path) => FamilyReport::load(path, config),
            Self::Tables { roots, nested } => FamilyReport::load_tables(roots, nested, config),
        }
    }
}

impl std::fmt::Display for ReportSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Combined(path) => write!(f, "{}", path.display()),
            Self::Tables { roots, nested } => {
                write!(f, "{} + {}", roots.display(), nested.display())
            },
        }
    }
}

/// Payload of a successful `build_work_lists` run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReloadSummary {
    /// The settled plan
    pub plan: ReloadPlan,
    /// Task files written, in pass order
    pub task_files: Vec<PathBuf>,
    /// Stale task files removed before writing
    pub removed_stale: usize,
}

/// Entry points bound to a configuration
#[derive(Debug, Clone, Default)]
pub struct Reloader {
    config: ReloadConfig,
}

impl Reloader {
    /// Create a reloader with the given configuration
    #[must_use]
    pub const fn new(config: ReloadConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &ReloadConfig {
        &self.config
    }

    /// Build reload task files for a change list into `output_dir`
    pub fn build_work_lists(
        &self,
        change_list_path: &Path,
        report: ReportSource<'_>,
        output_dir: &Path,
    ) -> Result<Outcome<ReloadSummary>, ScheduleError> {
        let mut sink = TaskFileWriter::from_config(output_dir, &self.config);
        self.build_work_lists_into(change_list_path, report, &mut sink)
    }

    /// Build reload passes for a change list and hand them to `sink`
    pub fn build_work_lists_into<S: TaskSink>(
        &self,
        change_list_path: &Path,
        report: ReportSource<'_>,
        sink: &mut S,
    ) -> Result<Outcome<ReloadSummary>, ScheduleError> {
        let mut outcome = Outcome::new();

        let started = Instant::now();
        let changes = match load_change_list(change_list_path, &self.config) {
            Ok(changes) => changes,
            Err(e) => {
                outcome.update_sep(false, format!("Failed to load change list: {e}"));
                return Ok(outcome);
            },
        };
        outcome.append_message(format!(
            "{} Change list of length [{}] loaded.",
            stamp(started),
            changes.len()
        ));
        log::info!("Loaded {} changed famil(ies) from {}", changes.len(), change_list_path.display());

        if changes.is_empty() {
            let mut summary = ReloadSummary::default();
            self.clear_stale(sink, &mut outcome, &mut summary);
            outcome.update_sep(true, "Empty change list found. No families require processing.");
            return Ok(outcome.with_payload(summary));
        }

        let started = Instant::now();
        let family_report = match report.load(&self.config) {
            Ok(family_report) => family_report,
            Err(e) => {
                outcome.update_sep(false, format!("Failed to load family report: {e}"));
                return Ok(outcome);
            },
        };
        outcome.append_message(format!(
            "{} Family report loaded: [{}] root(s), [{}] nested occurrence(s).",
            stamp(started),
            family_report.roots.len(),
            family_report.nested.len()
        ));

        let mut scheduled = self.schedule(&changes, &family_report, sink)?;
        let summary = scheduled.payload.take();
        outcome.absorb(scheduled);
        if let Some(summary) = summary {
            outcome.set_payload(summary);
        }
        Ok(outcome)
    }

    /// Plan and write reload passes for already loaded inputs
    pub fn schedule<S: TaskSink>(
        &self,
        changes: &[ChangedFamily],
        report: &FamilyReport,
        sink: &mut S,
    ) -> Result<Outcome<ReloadSummary>, ScheduleError> {
        let mut outcome = Outcome::new();
        let mut summary = ReloadSummary::default();

        if changes.is_empty() {
            self.clear_stale(sink, &mut outcome, &mut summary);
            outcome.update_sep(true, "Empty change list found. No families require processing.");
            return Ok(outcome.with_payload(summary));
        }

        let started = Instant::now();
        let resolver = HostResolver::new(&report.roots, &report.nested);
        outcome.append_message(format!("{} Relations indexed.", stamp(started)));

        let started = Instant::now();
        let plan = match LevelBuilder::new(&resolver).plan(changes) {
            LevelOutcome::Settled(plan) => plan,
            LevelOutcome::BoundExceeded { passes, pending } => {
                return Err(ScheduleError::InfiniteLoop {
                    passes,
                    pending: pending.iter().map(Family::identity).collect(),
                });
            },
        };
        outcome.append_message(format!(
            "{} Level walk complete: [{}] pass(es), [{}] host famil(ies).",
            stamp(started),
            plan.len(),
            plan.family_count()
        ));
        for pass in &plan.passes {
            outcome.append_message(format!(
                "[{:.3}s] Level [{}] resolved: [{}] host(s), [{}] deferred to a later pass.",
                pass.elapsed.as_secs_f64(),
                pass.index,
                pass.families.len(),
                pass.deferred
            ));
        }

        self.clear_stale(sink, &mut outcome, &mut summary);

        if plan.is_empty() {
            outcome.append_message("No registered host families found. Nothing to reload.");
            summary.plan = plan;
            return Ok(outcome.with_payload(summary));
        }

        for pass in &plan.passes {
            let started = Instant::now();
            match sink.write_pass(pass) {
                Ok(path) => {
                    let message = if pass.is_empty() {
                        format!("Wrote empty task list at counter [{}]", pass.index)
                    } else {
                        format!("Wrote task list [{}] with [{}] famil(ies)", pass.index, pass.families.len())
                    };
                    outcome.append_message(format!(
                        "{} {message} to {}",
                        stamp(started),
                        path.display()
                    ));
                    summary.task_files.push(path);
                },
                Err(e) => {
                    log::warn!("Task list [{}] not written: {e:#}", pass.index);
                    outcome.update_sep(
                        false,
                        format!("Failed to write task list [{}]: {e:#}", pass.index),
                    );
                },
            }
        }

        log::info!(
            "Scheduled {} host famil(ies) over {} pass(es)",
            plan.family_count(),
            plan.len()
        );
        summary.plan = plan;
        Ok(outcome.with_payload(summary))
    }

    /// Remove task files left by a previous run when `clear_stale` is set
    fn clear_stale<S: TaskSink, T>(
        &self,
        sink: &mut S,
        outcome: &mut Outcome<T>,
        summary: &mut ReloadSummary,
    ) {
        if !self.config.output.clear_stale {
            return;
        }
        match sink.clear_stale() {
            Ok(removed) => {
                summary.removed_stale = removed;
                outcome.append_message(format!("Removed [{removed}] stale task file(s)."));
            },
            Err(e) => {
                outcome.update_sep(false, format!("Failed to remove stale task files: {e:#}"));
            },
        }
    }

    /// Nested families that have no root record
    #[must_use]
    pub fn missing_families(&self, report: ReportSource<'_>) -> Outcome<Vec<Identity>> {
        let mut outcome = Outcome::new();

        let started = Instant::now();
        let family_report = match report.load(&self.config) {
            Ok(family_report) => family_report,
            Err(e) => {
                return Outcome::failed(format!(
                    "An error occurred while finding missing families: {e}"
                ));
            },
        };

        let unique = unique_nested_identities(&family_report.nested);
        outcome.append_message(format!(
            "{} Found: [{}] unique nested famil(ies).",
            stamp(started),
            unique.len()
        ));

        let started = Instant::now();
        let missing = find_missing(&family_report.roots, &family_report.nested);
        outcome.append_message(format!(
            "{} Found [{}] missing famil(ies).",
            stamp(started),
            missing.len()
        ));
        log::info!("{} missing famil(ies) in {report}", missing.len());

        outcome.with_payload(missing)
    }

    /// Registered roots directly hosting one of the `missing` families
    #[must_use]
    pub fn missing_family_hosts(
        &self,
        report: ReportSource<'_>,
        missing: &[Identity],
    ) -> Outcome<Vec<RootFamily>> {
        let mut outcome = Outcome::new();

        if missing.is_empty() {
            outcome.append_message("No missing root families found in data set.");
            return outcome.with_payload(Vec::new());
        }

        let started = Instant::now();
        let family_report = match report.load(&self.config) {
            Ok(family_report) => family_report,
            Err(e) => {
                return Outcome::failed(format!(
                    "An error occurred while finding missing families direct host families: {e}"
                ));
            },
        };

        let resolver = HostResolver::new(&family_report.roots, &family_report.nested);
        let hosts = find_missing_direct_hosts(missing, &resolver);
        outcome.append_message(format!(
            "{} Found [{}] direct host(s) to [{}] missing famil(ies).",
            stamp(started),
            hosts.len(),
            missing.len()
        ));

        outcome.with_payload(hosts)
    }

    /// Nested occurrences whose chain repeats a family
    #[must_use]
    pub fn circular_references(&self, report: ReportSource<'_>) -> Outcome<Vec<CircularReference>> {
        let mut outcome = Outcome::new();

        let started = Instant::now();
        let family_report = match report.load(&self.config) {
            Ok(family_report) => family_report,
            Err(e) => {
                return Outcome::failed(format!(
                    "An error occurred while reading the family report: {e}"
                ));
            },
        };

        let circular = find_circular_references(&family_report.nested);
        outcome.append_message(format!(
            "{} Found: [{}] circular reference(s) in families.",
            stamp(started),
            circular.len()
        ));

        outcome.with_payload(circular)
    }
}

/// Build reload task files with the default configuration
pub fn build_work_lists(
    change_list_path: &Path,
    family_report_path: &Path,
    output_dir: &Path,
) -> Result<Outcome<ReloadSummary>, ScheduleError> {
    Reloader::default().build_work_lists(
        change_list_path,
        ReportSource::Combined(family_report_path),
        output_dir,
    )
}

/// Nested families missing from the library, with the default configuration
#[must_use]
pub fn check_families_missing_from_library(family_report_path: &Path) -> Outcome<Vec<Identity>> {
    Reloader::default().missing_families(ReportSource::Combined(family_report_path))
}

/// Registered hosts of missing families, with the default configuration
#[must_use]
pub fn find_missing_families_direct_host_families(
    family_report_path: &Path,
    missing: &[Identity],
) -> Outcome<Vec<RootFamily>> {
    Reloader::default().missing_family_hosts(ReportSource::Combined(family_report_path), missing)
}

/// Circular nesting in the family report, with the default configuration
#[must_use]
pub fn check_families_have_circular_references(
    family_report_path: &Path,
) -> Outcome<Vec<CircularReference>> {
    Reloader::default().circular_references(ReportSource::Combined(family_report_path))
}

fn stamp(started: Instant) -> String {
    format!("[{:.3}s]", started.elapsed().as_secs_f64())
}
