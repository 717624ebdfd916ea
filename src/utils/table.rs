//! Plain-text table for listing time entries.

use crate::models::TimeEntry;
use crate::utils::time::format_wall_clock;

const HEADERS: [&str; 6] = ["ID", "DATE", "ENTRY", "LUNCH OUT", "LUNCH IN", "EXIT"];

fn entry_cells(entry: &TimeEntry) -> [String; 6] {
    [
        entry.id_str(),
        entry.date.clone(),
        format_wall_clock(&entry.entry_time),
        format_wall_clock(&entry.lunch_exit_time),
        format_wall_clock(&entry.lunch_entry_time),
        format_wall_clock(&entry.exit_time),
    ]
}

fn render_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect();
    let mut line = padded.join(" | ").trim_end().to_string();
    line.push('\n');
    line
}

/// Render `entries` with columns sized to their widest cell.
pub fn render_entries(entries: &[TimeEntry]) -> String {
    let rows: Vec<[String; 6]> = entries.iter().map(entry_cells).collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = render_line(&HEADERS, &widths);
    let rule_len = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    for row in &rows {
        out.push_str(&render_line(row, &widths));
    }

    out
}
