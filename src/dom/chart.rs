// src/dom/chart.rs

use serde::Serialize;

use crate::table::{aggregate::DATE_KEY, labels, series, Row};

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Full trend chart with legend and axes.
    Line,
    /// Minimal trend, no legend.
    Sparkline,
}

/// How y-axis ticks are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Percent,
    Dollars,
}

impl Axis {
    pub fn tick(self, v: f64) -> String {
        match self {
            Axis::Percent => format!("{:.0}%", v * 100.0),
            Axis::Dollars => format!("${:.0}", v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
}

/// What a charting backend needs: category labels plus numeric series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFeed {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub axis: Axis,
}

impl ChartFeed {
    /// One series of `key` over `rows`, labelled by date.
    pub fn from_rows(kind: ChartKind, rows: &[Row], key: &str, label: &str, axis: Axis) -> Self {
        Self {
            kind,
            labels: labels(rows, DATE_KEY),
            datasets: vec![Dataset {
                label: label.to_string(),
                data: series(rows, key),
            }],
            axis,
        }
    }

    /// Unicode block rendering of the first dataset; gaps print as spaces.
    pub fn sparkline(&self) -> String {
        let data = match self.datasets.first() {
            Some(d) => &d.data,
            None => return String::new(),
        };
        let values: Vec<f64> = data.iter().flatten().copied().collect();
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = hi - lo;

        data.iter()
            .map(|v| match v {
                None => ' ',
                Some(_) if span <= 0.0 => BARS[BARS.len() / 2],
                Some(v) => {
                    let idx = ((v - lo) / span * (BARS.len() - 1) as f64).round() as usize;
                    BARS[idx.min(BARS.len() - 1)]
                }
            })
            .collect()
    }

    /// Lowest and highest plotted value as axis tick text.
    pub fn range(&self) -> Option<(String, String)> {
        let values = self.datasets.iter().flat_map(|d| d.data.iter().flatten().copied());
        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if lo.is_finite() {
            Some((self.axis.tick(lo), self.axis.tick(hi)))
        } else {
            None
        }
    }
}
