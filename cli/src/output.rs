//! Table formatting helpers for CLI output.

use comfy_table::{ContentArrangement, Table};

/// Placeholder for empty table cells.
pub const NONE: &str = "-";

/// Create a styled table with the given headers.
pub fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.load_preset(comfy_table::presets::NOTHING);
    table.set_header(headers);
    table
}

/// Cell text, or [`NONE`] when empty.
pub fn or_none(value: &str) -> String {
    if value.is_empty() {
        NONE.to_string()
    } else {
        value.to_string()
    }
}
