// src/format.rs
//
// Display formatting for KPI cells. Every function is total: blank,
// absent, or non-numeric input renders as a placeholder.

/// A value as it reaches the formatter: a CSV cell, a number, or nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Raw<'a> {
    Missing,
    Text(&'a str),
    Number(f64),
}

impl Raw<'_> {
    fn number(self) -> Option<f64> {
        match self {
            Raw::Missing => None,
            Raw::Text(s) => s.trim().parse::<f64>().ok(),
            Raw::Number(n) => Some(n),
        }
        .filter(|n| n.is_finite())
    }
}

impl<'a> From<&'a str> for Raw<'a> {
    fn from(s: &'a str) -> Self {
        Raw::Text(s)
    }
}

impl<'a> From<&'a String> for Raw<'a> {
    fn from(s: &'a String) -> Self {
        Raw::Text(s)
    }
}

impl<'a, T: Into<Raw<'a>>> From<Option<T>> for Raw<'a> {
    fn from(v: Option<T>) -> Self {
        v.map_or(Raw::Missing, Into::into)
    }
}

impl From<f64> for Raw<'_> {
    fn from(n: f64) -> Self {
        Raw::Number(n)
    }
}

impl From<i64> for Raw<'_> {
    fn from(n: i64) -> Self {
        Raw::Number(n as f64)
    }
}

impl From<i32> for Raw<'_> {
    fn from(n: i32) -> Self {
        Raw::Number(n as f64)
    }
}

/// Fraction to percent, one decimal: `0.083` → `8.3%`.
pub fn fmt_pct<'a>(x: impl Into<Raw<'a>>) -> String {
    match x.into().number() {
        Some(v) => format!("{:.1}%", v * 100.0),
        None => "--%".to_string(),
    }
}

/// Grouped integer: `1234567` → `1,234,567`.
pub fn fmt_int<'a>(x: impl Into<Raw<'a>>) -> String {
    match x.into().number() {
        Some(v) => signed(v, ""),
        None => "--".to_string(),
    }
}

/// Whole US dollars: `1234` → `$1,234`, `-5` → `-$5`.
pub fn fmt_money<'a>(x: impl Into<Raw<'a>>) -> String {
    match x.into().number() {
        Some(v) => signed(v, "$"),
        None => "$--".to_string(),
    }
}

fn signed(v: f64, prefix: &str) -> String {
    // f64::round is half away from zero; -0.4 rounds to -0.0 and keeps its sign
    let r = v.round();
    let sign = if r.is_sign_negative() && v != 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, prefix, group_thousands(r.abs()))
}

fn group_thousands(v: f64) -> String {
    let digits = format!("{:.0}", v);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
