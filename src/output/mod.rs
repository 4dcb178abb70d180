//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV output of match
//! results, plus the stderr warning and error helpers.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::{print_csv, write_csv};
pub use json_format::print_json;
pub use plain::{format_match, print_error, print_info, print_match, print_warning};
