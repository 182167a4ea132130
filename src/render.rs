// src/render.rs

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::views::ViewOutcome;

/// Plain-text view of a rendered page: every text widget, then each chart
/// as a sparkline with its value range.
pub fn summary(outcome: &ViewOutcome) -> String {
    let mut out = String::new();
    out.push_str(&format!("== {} [{:?}] ==\n", outcome.page, outcome.state));

    let doc = &outcome.document;
    let width = doc.ids().map(str::len).max().unwrap_or(0);
    for id in doc.ids() {
        let Some(el) = doc.get(id) else { continue };
        if let Some(chart) = &el.chart {
            let label = chart.datasets.first().map(|d| d.label.as_str()).unwrap_or("");
            let range = chart
                .range()
                .map(|(lo, hi)| format!(" {}..{}", lo, hi))
                .unwrap_or_default();
            out.push_str(&format!(
                "{:<width$}  {} {}{}\n",
                id,
                label,
                chart.sparkline(),
                range,
                width = width
            ));
        } else if !el.is_canvas() && !el.hidden && !el.text.is_empty() {
            out.push_str(&format!("{:<width$}  {}\n", id, el.text, width = width));
        } else if !el.hidden && el.href.is_some() {
            let href = el.href.as_deref().unwrap_or("");
            out.push_str(&format!("{:<width$}  -> {}\n", id, href, width = width));
        }
    }
    for failure in &outcome.failures {
        out.push_str(&format!("!! {}\n", failure));
    }
    out
}

/// Write the page view-models as pretty JSON for a front-end to bind.
pub fn write_snapshot(path: &Path, outcomes: &[ViewOutcome]) -> Result<()> {
    let json = serde_json::to_string_pretty(outcomes).context("serializing view snapshot")?;
    fs::write(path, json).with_context(|| format!("writing snapshot {:?}", path))
}
