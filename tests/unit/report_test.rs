//! Tests for report loading

use nestreload::adapters::report::{
    FamilyReport, ReportError, find_base_data_file, load_change_list, parse_family_rows,
};
use nestreload::config::ReloadConfig;
use nestreload::core::models::Identity;

use crate::common::{TestLibrary, chain_rows, root_row, row};

// =============================================================================
// Combined report
// =============================================================================

#[test]
fn test_combined_report_splits_roots_and_nested() {
    let lib = TestLibrary::new();
    let mut rows = vec![root_row("Assembly", "Structural")];
    rows.extend(chain_rows(&["Assembly", "Bracket", "Bolt"], "Hardware"));
    let path = lib.report(&rows);

    let report = FamilyReport::load(&path, &ReloadConfig::default()).unwrap();

    assert_eq!(report.roots.len(), 1);
    assert_eq!(report.roots[0].file_path, "C:/lib/Assembly.rfa");
    assert_eq!(report.nested.len(), 2);
    assert_eq!(report.nested[1].root_path, vec!["Assembly", "Bracket", "Bolt"]);
    assert_eq!(report.nested[1].category_path, vec!["Hardware"; 3]);
}

#[test]
fn test_root_row_with_chain_columns_but_no_separator() {
    let rows = vec![row(&["Assembly", "Structural", "C:/lib/Assembly.rfa", "Assembly", "Structural"])];
    let report = parse_family_rows(&rows, "::");
    assert_eq!(report.roots.len(), 1);
    assert!(report.nested.is_empty());
}

#[test]
fn test_malformed_rows_are_skipped() {
    let rows = vec![
        row(&["Assembly"]),
        row(&["Assembly", "Structural"]),
        row(&["Assembly", "Structural", "C:/lib/Assembly.rfa", "extra"]),
        root_row("Column", "Structural"),
    ];
    let report = parse_family_rows(&rows, "::");
    assert_eq!(report.roots.len(), 1);
    assert_eq!(report.roots[0].name, "Column");
    assert!(report.nested.is_empty());
}

#[test]
fn test_duplicate_rows_are_kept() {
    let rows = vec![
        row(&["Bolt", "Hardware", "C:/a/Bolt.rfa"]),
        row(&["Bolt", "Hardware", "C:/b/Bolt.rfa"]),
    ];
    let report = parse_family_rows(&rows, "::");
    assert_eq!(report.roots.len(), 2);
}

#[test]
fn test_header_row_is_skipped() {
    let lib = TestLibrary::new();
    let path = lib.add_file(
        "report.txt",
        "name\tcategory\tpath\nAssembly\tStructural\tC:/lib/Assembly.rfa\n",
    );
    let report = FamilyReport::load(&path, &ReloadConfig::default()).unwrap();
    assert_eq!(report.roots.len(), 1);
    assert_eq!(report.roots[0].name, "Assembly");
}

#[test]
fn test_custom_separator() {
    let rows = vec![row(&["Bolt", "Hardware", "C:/lib/Bolt.rfa", "Assembly|Bolt", "Structural|Hardware"])];
    let report = parse_family_rows(&rows, "|");
    assert_eq!(report.nested.len(), 1);
    assert_eq!(report.nested[0].direct_host(), Some(Identity::new("Assembly", "Structural")));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_missing_report_is_not_found() {
    let lib = TestLibrary::new();
    let err = FamilyReport::load(&lib.path().join("nope.csv"), &ReloadConfig::default()).unwrap_err();
    assert!(matches!(err, ReportError::NotFound(_)));
}

#[test]
fn test_empty_report_is_an_error() {
    let lib = TestLibrary::new();
    let path = lib.add_file("FamilyBaseData.csv", "\n\n");
    let err = FamilyReport::load(&path, &ReloadConfig::default()).unwrap_err();
    assert!(matches!(err, ReportError::Empty(_)));
    assert!(err.to_string().contains("empty"));
}

// =============================================================================
// Directory lookup
// =============================================================================

#[test]
fn test_directory_uses_first_base_data_file() {
    let lib = TestLibrary::new();
    lib.add_file("reports/notes.txt", "ignored\n");
    lib.add_file("reports/FamilyBaseB.csv", "Second\tCat\tC:/lib/Second.rfa\n");
    lib.add_file("reports/FamilyBaseA.txt", "First\tCat\tC:/lib/First.rfa\n");

    let dir = lib.path().join("reports");
    let found = find_base_data_file(&dir, "FamilyBase").unwrap();
    assert!(found.ends_with("FamilyBaseA.txt"));

    let report = FamilyReport::load(&dir, &ReloadConfig::default()).unwrap();
    assert_eq!(report.roots[0].name, "First");
}

#[test]
fn test_directory_without_base_data_file() {
    let lib = TestLibrary::new();
    lib.add_file("reports/FamilyBase.json", "{}");
    let err = find_base_data_file(&lib.path().join("reports"), "FamilyBase").unwrap_err();
    assert!(matches!(err, ReportError::NoBaseDataFile { .. }));
}

// =============================================================================
// Separate tables
// =============================================================================

#[test]
fn test_load_tables() {
    let lib = TestLibrary::new();
    let roots = lib.add_rows("roots.txt", &[root_row("A", "Cat"), root_row("B", "Cat")]);
    let nested = lib.add_rows("nested.txt", &chain_rows(&["A", "B"], "Cat"));

    let report = FamilyReport::load_tables(&roots, &nested, &ReloadConfig::default()).unwrap();
    assert_eq!(report.roots.len(), 2);
    assert_eq!(report.nested.len(), 1);
}

#[test]
fn test_load_tables_both_empty() {
    let lib = TestLibrary::new();
    let roots = lib.add_file("roots.txt", "");
    let nested = lib.add_file("nested.txt", "");
    let err = FamilyReport::load_tables(&roots, &nested, &ReloadConfig::default()).unwrap_err();
    assert!(matches!(err, ReportError::Empty(_)));
}

// =============================================================================
// Change list
// =============================================================================

#[test]
fn test_change_list_columns_and_extension() {
    let lib = TestLibrary::new();
    let path = lib.changes(&[("Bolt", "Hardware"), ("Washer", "Hardware")]);

    let changes = load_change_list(&path, &ReloadConfig::default()).unwrap();
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].name, "Bolt");
    assert_eq!(changes[0].category, "Hardware");
    assert_eq!(changes[0].file_path, "C:/lib/Bolt.rfa");
}

#[test]
fn test_change_list_keeps_extension_when_disabled() {
    let lib = TestLibrary::new();
    let path = lib.changes(&[("Bolt", "Hardware")]);
    let mut config = ReloadConfig::default();
    config.change_list.strip_rfa_extension = false;

    let changes = load_change_list(&path, &config).unwrap();
    assert_eq!(changes[0].name, "Bolt.rfa");
}

#[test]
fn test_empty_change_list_is_valid() {
    let lib = TestLibrary::new();
    let path = lib.add_file("changes.txt", "");
    assert!(load_change_list(&path, &ReloadConfig::default()).unwrap().is_empty());
}
