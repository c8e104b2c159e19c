//! Aligned console table
//!
//! Left-aligned columns sized to the widest cell, with a separator line
//! under the header row.

use crate::scrape::Row;

/// Formats the rows (header first) as an aligned table.
pub fn format_table(rows: &[Row]) -> String {
    let Some(header) = rows.first() else {
        return String::new();
    };

    let widths = column_widths(rows);
    let mut out = String::new();

    out.push_str(&format_row(header, &widths));
    out.push('\n');
    out.push_str(&separator(&widths));
    out.push('\n');

    for row in &rows[1..] {
        out.push_str(&format_row(row, &widths));
        out.push('\n');
    }

    out
}

/// Widest cell per column, measured in characters.
fn column_widths(rows: &[Row]) -> Vec<usize> {
    let columns = rows.iter().map(|row| row.len()).max().unwrap_or(0);
    let mut widths = vec![0; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    widths
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    let cells: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            format!("{cell:<width$}")
        })
        .collect();
    cells.join("  ").trim_end().to_string()
}

fn separator(widths: &[usize]) -> String {
    let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    dashes.join("  ")
}
