//! Report loading
//!
//! Reads the tab-separated family report (root and nested tables) and the
//! change list into family records. Row order is preserved; no uniqueness is
//! enforced at load time.

mod reader;

pub use reader::{
    FamilyReport, ReportError, find_base_data_file, load_change_list, parse_change_rows,
    parse_family_rows, parse_nested_rows, parse_root_rows, read_rows, split_rows,
    strip_rfa_extension,
};
