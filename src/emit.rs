// Summary emitter: renders a Table as CSV or as aligned text. All formatting
// choices come from an explicit FormatConfig.

use serde::Deserialize;

use crate::models::{Cell, Table};
use crate::reports::ReportKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    /// Decimal places for float columns; `None` uses the report's default.
    pub precision: Option<usize>,
    /// Written in place of an unavailable statistic.
    pub missing: String,
    /// Also print each table to stdout.
    pub show: bool,
}

impl FormatConfig {
    pub fn precision_for(&self, kind: ReportKind) -> usize {
        self.precision.unwrap_or_else(|| kind.default_precision())
    }
}

pub fn format_cell(cell: &Cell, precision: usize, missing: &str) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Int(n) => n.to_string(),
        Cell::Float(Some(x)) => format!("{x:.precision$}"),
        Cell::Float(None) => missing.to_string(),
    }
}

/// CSV with a header row, rendered fully in memory.
pub fn render_csv(table: &Table, precision: usize, missing: &str) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.header)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|c| format_cell(c, precision, missing)))?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Space-aligned table for terminals; text left-aligned, numbers right-aligned.
pub fn render_text(table: &Table, precision: usize, missing: &str) -> String {
    let rendered: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|c| format_cell(c, precision, missing)).collect())
        .collect();

    let mut widths: Vec<usize> = table.header.iter().map(|h| h.len()).collect();
    for row in &rendered {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let numeric: Vec<bool> = (0..widths.len())
        .map(|col| {
            table
                .rows
                .first()
                .and_then(|r| r.get(col))
                .is_some_and(|c| !matches!(c, Cell::Text(_)))
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = table.header.iter().map(|h| h.to_string()).collect();
    push_line(&mut out, &header, &widths, &numeric);
    for row in &rendered {
        push_line(&mut out, row, &widths, &numeric);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize], numeric: &[bool]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths.iter().zip(numeric))
        .map(|(cell, (&w, &right))| {
            if right {
                format!("{cell:>w$}")
            } else {
                format!("{cell:<w$}")
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
