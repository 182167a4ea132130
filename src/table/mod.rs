// src/table/mod.rs

pub mod aggregate;

pub use aggregate::{is_iso_date, labels, latest_by_date, series, window};

/// One CSV data line keyed by header name, in header order. Always carries
/// every header key once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row(Vec<(String, String)>);

impl Row {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// The cell under `key`, or `""` when the column does not exist.
    pub fn cell(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A repeated key keeps its first position and takes the later value.
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut cells: Vec<(String, String)> = Vec::new();
        for (k, v) in iter {
            let (k, v) = (k.into(), v.into());
            match cells.iter_mut().find(|(have, _)| *have == k) {
                Some(cell) => cell.1 = v,
                None => cells.push((k, v)),
            }
        }
        Row(cells)
    }
}

/// Parsed CSV: header names plus rows in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of `date_key` that break the zero-padded `YYYY-MM-DD` format
    /// lexical ordering relies on.
    pub fn unordered_dates<'a>(&'a self, date_key: &str) -> Vec<&'a str> {
        self.rows
            .iter()
            .map(|r| r.cell(date_key))
            .filter(|d| !is_iso_date(d))
            .collect()
    }
}

/// Minimal comma splitter: no quoting, no escapes.
///
/// Blank lines are skipped, the first line is the header. Short rows are
/// padded with `""`, extra fields are dropped. Never fails.
pub fn parse(text: &str) -> Table {
    let text = text.replace('\r', "");
    let mut lines = text.split('\n').filter(|l| !l.trim().is_empty());

    let headers: Vec<String> = match lines.next() {
        Some(h) => h.split(',').map(|f| f.trim().to_string()).collect(),
        None => return Table::default(),
    };

    let rows = lines
        .map(|line| {
            let mut fields = line.split(',').map(str::trim);
            headers
                .iter()
                .map(|h| (h.clone(), fields.next().unwrap_or("").to_string()))
                .collect::<Row>()
        })
        .collect();

    Table { headers, rows }
}
