// src/table/aggregate.rs

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Row, Table};

pub const DATE_KEY: &str = "date";

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("ISO date regex should compile"));

/// Zero-padded `YYYY-MM-DD`; the only format where lexical order is
/// chronological order.
pub fn is_iso_date(s: &str) -> bool {
    ISO_DATE.is_match(s)
}

/// The row with the lexically greatest `date_key`. Among equal dates the
/// last one in file order wins.
pub fn latest_by_date<'a>(table: &'a Table, date_key: &str) -> Option<&'a Row> {
    // `max_by` keeps the last of equal elements
    table
        .rows
        .iter()
        .max_by(|a, b| a.cell(date_key).cmp(b.cell(date_key)))
}

/// Trailing `n` rows, taken positionally.
pub fn window(table: &Table, n: usize) -> &[Row] {
    let start = table.rows.len().saturating_sub(n);
    &table.rows[start..]
}

/// Numeric values of `key`; blank or non-numeric cells become gaps.
pub fn series(rows: &[Row], key: &str) -> Vec<Option<f64>> {
    rows.iter()
        .map(|r| r.cell(key).trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect()
}

pub fn labels(rows: &[Row], key: &str) -> Vec<String> {
    rows.iter().map(|r| r.cell(key).to_string()).collect()
}
