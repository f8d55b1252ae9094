// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Table output formatting

use comfy_table::{Table, presets::NOTHING};

/// Create a new borderless table with headers
pub fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(headers);
    table
}

/// Format a table and print it
pub fn print_table(table: Table) {
    println!("{table}");
}

/// Render a single record as aligned `Label: value` lines
pub fn format_record(fields: &[(&str, String)]) -> String {
    let width = fields
        .iter()
        .map(|(label, _)| label.len() + 1)
        .max()
        .unwrap_or(0);
    fields
        .iter()
        .map(|(label, value)| format!("{:<width$} {}", format!("{label}:"), value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print a single record as aligned `Label: value` lines
pub fn print_record(fields: &[(&str, String)]) {
    println!("{}", format_record(fields));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_record_aligns_values() {
        let out = format_record(&[
            ("ID", "abc".to_string()),
            ("Status", "Succeeded".to_string()),
        ]);
        assert_eq!(out, "ID:     abc\nStatus: Succeeded");
    }

    #[test]
    fn test_format_record_empty() {
        assert_eq!(format_record(&[]), "");
    }
}
