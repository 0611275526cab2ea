//! Tests for missing family detection

use nestreload::adapters::report::parse_family_rows;
use nestreload::core::models::Identity;
use nestreload::core::services::{
    HostResolver, find_circular_references, find_missing, find_missing_direct_hosts,
};

use crate::common::{chain_rows, root_row, root_rows, row};

fn bolt_under_bracket() -> Vec<Vec<String>> {
    vec![
        root_row("Assembly", "Structural"),
        row(&[
            "Bolt",
            "Hardware",
            "C:/f/Bolt.rfa",
            "Assembly::Bracket::Bolt",
            "Structural::Hardware::Hardware",
        ]),
    ]
}

#[test]
fn test_unregistered_intermediate_host_is_missing() {
    let report = parse_family_rows(&bolt_under_bracket(), "::");
    let missing = find_missing(&report.roots, &report.nested);
    assert!(missing.contains(&Identity::new("Bracket", "Hardware")));
    assert!(missing.contains(&Identity::new("Bolt", "Hardware")));
    assert!(!missing.contains(&Identity::new("Assembly", "Structural")));
}

#[test]
fn test_repeated_missing_family_reported_once() {
    let mut rows = Vec::new();
    for i in 0..50 {
        let host = format!("Host{i}");
        rows.push(root_row(&host, "Structural"));
        rows.push(row(&[
            "Washer",
            "Hardware",
            "C:/lib/Washer.rfa",
            &format!("{host}::Washer"),
            "Structural::Hardware",
        ]));
    }
    let report = parse_family_rows(&rows, "::");

    let missing = find_missing(&report.roots, &report.nested);
    assert_eq!(missing, vec![Identity::new("Washer", "Hardware")]);
}

#[test]
fn test_registered_families_are_not_missing() {
    let mut rows = root_rows(&["A", "B", "C"], "Cat");
    rows.extend(chain_rows(&["A", "B", "C"], "Cat"));
    let report = parse_family_rows(&rows, "::");
    assert!(find_missing(&report.roots, &report.nested).is_empty());
}

#[test]
fn test_category_mismatch_is_missing() {
    let mut rows = vec![root_row("A", "Cat"), root_row("B", "Other")];
    rows.extend(chain_rows(&["A", "B"], "Cat"));
    let report = parse_family_rows(&rows, "::");
    assert_eq!(find_missing(&report.roots, &report.nested), vec![Identity::new("B", "Cat")]);
}

#[test]
fn test_hosts_of_missing_families() {
    let report = parse_family_rows(&bolt_under_bracket(), "::");
    let resolver = HostResolver::new(&report.roots, &report.nested);
    let missing = find_missing(&report.roots, &report.nested);

    let hosts = find_missing_direct_hosts(&missing, &resolver);
    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].name, "Assembly");
}

#[test]
fn test_no_missing_no_hosts() {
    let resolver = HostResolver::new(&[], &[]);
    assert!(find_missing_direct_hosts(&[], &resolver).is_empty());
}

#[test]
fn test_circular_reference_found_once_per_chain() {
    let rows = vec![
        row(&["A", "Cat", "C:/lib/A.rfa", "A::B::A", "Cat::Cat::Cat"]),
        row(&["A", "Cat", "C:/lib/A.rfa", "A::B::A", "Cat::Cat::Cat"]),
        row(&["C", "Cat", "C:/lib/C.rfa", "A::B::C", "Cat::Cat::Cat"]),
    ];
    let report = parse_family_rows(&rows, "::");

    let circular = find_circular_references(&report.nested);
    assert_eq!(circular.len(), 1);
    assert_eq!(circular[0].family, Identity::new("A", "Cat"));
    assert_eq!(circular[0].chain, vec!["A", "B", "A"]);
}
