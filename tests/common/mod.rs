// Shared test helpers
#![allow(dead_code)]

use telemetry_digest::aggregation::Sample;
use telemetry_digest::models::{Cell, Table};

pub fn sample(key: &str, timestamp: i64, value: f64) -> Sample<String, f64> {
    Sample::new(key.to_string(), timestamp, value)
}

/// Joins JSON lines into one newline-terminated log.
pub fn log(lines: &[&str]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn cell<'a>(table: &'a Table, row: usize, column: &str) -> &'a Cell {
    let col = table
        .column(column)
        .unwrap_or_else(|| panic!("no column {column}"));
    &table.rows[row][col]
}

pub fn text(table: &Table, row: usize, column: &str) -> String {
    match cell(table, row, column) {
        Cell::Text(s) => s.clone(),
        other => panic!("{column} is not text: {other:?}"),
    }
}

pub fn int(table: &Table, row: usize, column: &str) -> i64 {
    match cell(table, row, column) {
        Cell::Int(n) => *n,
        other => panic!("{column} is not an integer: {other:?}"),
    }
}

pub fn float(table: &Table, row: usize, column: &str) -> Option<f64> {
    match cell(table, row, column) {
        Cell::Float(x) => *x,
        other => panic!("{column} is not a float: {other:?}"),
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
