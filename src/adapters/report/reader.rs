//! Tab-separated report reader
//!
//! Handles splitting report files into rows and mapping rows onto family
//! records. Rows with an unexpected column count are skipped with a warning.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::config::ReloadConfig;
use crate::core::models::{ChangedFamily, NestedFamily, RootFamily};

/// First-cell values that mark a header row
const HEADER_NAMES: &[&str] = &["name", "familyname", "root", "rootpath"];

/// Extensions accepted when searching a directory for a base data report
const BASE_DATA_EXTENSIONS: &[&str] = &["csv", "txt"];

/// Column layout of the change list
const CHANGE_NAME: usize = 0;
const CHANGE_FILE_PATH: usize = 1;
const CHANGE_CATEGORY: usize = 2;
const CHANGE_COLUMNS: usize = 3;

/// Column layout of root and nested tables
const NAME: usize = 0;
const CATEGORY: usize = 1;
const FILE_PATH: usize = 2;
const ROOT_PATH: usize = 3;
const ROOT_CATEGORY_PATH: usize = 4;
const ROOT_COLUMNS: usize = 3;
const NESTED_COLUMNS: usize = 5;

/// Errors that can occur while loading reports
#[derive(Debug, Error)]
pub enum ReportError {
    /// Report file does not exist
    #[error("report does not exist: {0}")]
    NotFound(PathBuf),

    /// No base data report inside a directory
    #[error("no family base data report (prefix '{prefix}') found in {dir}")]
    NoBaseDataFile {
        /// Directory that was searched
        dir: PathBuf,
        /// File name prefix that was searched for
        prefix: String,
    },

    /// Family report has no rows
    #[error("family report is empty: {0}")]
    Empty(PathBuf),

    /// IO error while reading
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking a report directory
    #[error("walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

/// Root and nested tables loaded for one run
#[derive(Debug, Clone, Default)]
pub struct FamilyReport {
    /// Registered families, in row order
    pub roots: Vec<RootFamily>,
    /// Nested family occurrences, in row order
    pub nested: Vec<NestedFamily>,
}

impl FamilyReport {
    /// Build a report from already loaded tables
    #[must_use]
    pub const fn new(roots: Vec<RootFamily>, nested: Vec<NestedFamily>) -> Self {
        Self { roots, nested }
    }

    /// Load a combined family report
    ///
    /// `path` may point at a directory, in which case the first base data
    /// report found inside it is used.
    pub fn load(path: &Path, config: &ReloadConfig) -> Result<Self, ReportError> {
        let file = if path.is_dir() {
            find_base_data_file(path, &config.report.base_data_prefix)?
        } else {
            path.to_path_buf()
        };

        let rows = read_rows(&file)?;
        if rows.is_empty() {
            return Err(ReportError::Empty(file));
        }
        Ok(parse_family_rows(&rows, &config.report.nesting_separator))
    }

    /// Load separate root and nested tables
    pub fn load_tables(
        root_table: &Path,
        nested_table: &Path,
        config: &ReloadConfig,
    ) -> Result<Self, ReportError> {
        let roots = parse_root_rows(&read_rows(root_table)?);
        let nested =
            parse_nested_rows(&read_rows(nested_table)?, &config.report.nesting_separator);
        if roots.is_empty() && nested.is_empty() {
            return Err(ReportError::Empty(root_table.to_path_buf()));
        }
        Ok(Self::new(roots, nested))
    }
}

/// Load a change list
///
/// An empty file is a valid, empty change list.
pub fn load_change_list(path: &Path, config: &ReloadConfig) -> Result<Vec<ChangedFamily>, ReportError> {
    let rows = read_rows(path)?;
    Ok(parse_change_rows(&rows, config.change_list.strip_rfa_extension))
}

/// Read a tab-separated file into rows of cells
///
/// Blank lines are dropped, a leading header row is skipped.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>, ReportError> {
    if !path.is_file() {
        return Err(ReportError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(split_rows(&content))
}

/// Split report text into rows of cells
#[must_use]
pub fn split_rows(content: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split('\t').map(|cell| cell.trim().to_string()).collect())
        .collect();

    if rows.first().is_some_and(|row| is_header(row)) {
        rows.remove(0);
    }
    rows
}

fn is_header(row: &[String]) -> bool {
    row.first()
        .is_some_and(|cell| HEADER_NAMES.iter().any(|name| cell.eq_ignore_ascii_case(name)))
}

/// Map combined report rows onto root and nested records
#[must_use]
pub fn parse_family_rows(rows: &[Vec<String>], separator: &str) -> FamilyReport {
    let mut report = FamilyReport::default();

    for (line, row) in rows.iter().enumerate() {
        match row.len() {
            ROOT_COLUMNS => report.roots.push(root_from_row(row)),
            n if n >= NESTED_COLUMNS => {
                if row[ROOT_PATH].contains(separator) {
                    report.nested.push(nested_from_row(row, separator));
                } else {
                    report.roots.push(root_from_row(row));
                }
            },
            n => log::warn!("Skipping family report row {}: {n} column(s)", line + 1),
        }
    }

    log::debug!(
        "Family report parsed: {} root(s), {} nested occurrence(s), deepest level {}",
        report.roots.len(),
        report.nested.len(),
        report.nested.iter().map(NestedFamily::level).max().unwrap_or(0)
    );
    report
}

/// Map root table rows onto root records
#[must_use]
pub fn parse_root_rows(rows: &[Vec<String>]) -> Vec<RootFamily> {
    rows.iter()
        .enumerate()
        .filter_map(|(line, row)| {
            if row.len() >= ROOT_COLUMNS {
                Some(root_from_row(row))
            } else {
                log::warn!("Skipping root table row {}: {} column(s)", line + 1, row.len());
                None
            }
        })
        .collect()
}

/// Map nested table rows onto nested records
#[must_use]
pub fn parse_nested_rows(rows: &[Vec<String>], separator: &str) -> Vec<NestedFamily> {
    rows.iter()
        .enumerate()
        .filter_map(|(line, row)| {
            if row.len() >= NESTED_COLUMNS {
                Some(nested_from_row(row, separator))
            } else {
                log::warn!("Skipping nested table row {}: {} column(s)", line + 1, row.len());
                None
            }
        })
        .collect()
}

/// Map change list rows onto changed family records
#[must_use]
pub fn parse_change_rows(rows: &[Vec<String>], strip_rfa: bool) -> Vec<ChangedFamily> {
    rows.iter()
        .enumerate()
        .filter_map(|(line, row)| {
            if row.len() != CHANGE_COLUMNS {
                log::warn!("Skipping change list row {}: {} column(s)", line + 1, row.len());
                return None;
            }
            let name = if strip_rfa {
                strip_rfa_extension(&row[CHANGE_NAME])
            } else {
                &row[CHANGE_NAME]
            };
            Some(ChangedFamily::new(name, &row[CHANGE_CATEGORY], &row[CHANGE_FILE_PATH]))
        })
        .collect()
}

/// Drop a trailing `.rfa` (any case) from a family name
#[must_use]
pub fn strip_rfa_extension(name: &str) -> &str {
    let cut = name.len().saturating_sub(4);
    match name.get(cut..) {
        Some(ext) if name.len() > 4 && ext.eq_ignore_ascii_case(".rfa") => &name[..cut],
        _ => name,
    }
}

fn root_from_row(row: &[String]) -> RootFamily {
    RootFamily::new(&row[NAME], &row[CATEGORY], &row[FILE_PATH])
}

fn nested_from_row(row: &[String], separator: &str) -> NestedFamily {
    let family = NestedFamily::from_chains(
        &row[NAME],
        &row[CATEGORY],
        &row[FILE_PATH],
        &row[ROOT_PATH],
        &row[ROOT_CATEGORY_PATH],
        separator,
    );
    if !family.chains_match() {
        log::warn!(
            "Nested family {} [{}] has {} chain name(s) but {} chain categor(ies); excluded from host lookup",
            family.name,
            family.category,
            family.root_path.len(),
            family.category_path.len()
        );
    }
    family
}

/// First base data report under `dir`, in sorted walk order
pub fn find_base_data_file(dir: &Path, prefix: &str) -> Result<PathBuf, ReportError> {
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let name_matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(prefix));
        let ext_matches = path.extension().and_then(|e| e.to_str()).is_some_and(|e| {
            BASE_DATA_EXTENSIONS.iter().any(|allowed| e.eq_ignore_ascii_case(allowed))
        });
        if name_matches && ext_matches {
            return Ok(path.to_path_buf());
        }
    }

    Err(ReportError::NoBaseDataFile {
        dir: dir.to_path_buf(),
        prefix: prefix.to_string(),
    })
}
