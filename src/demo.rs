// src/demo.rs

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{fs, path::Path};
use tracing::info;

use crate::pipeline::{CREDIT_KPIS, FRAUD_KPIS, FRAUD_METRICS};

pub const DEFAULT_DAYS: usize = 30;
pub const DEFAULT_SEED: u64 = 42;

/// Synthetic daily KPIs for the bundled demo site.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoSeries {
    /// `date,avg_pd,el_today,approvals,rejections`
    pub credit: Vec<[String; 5]>,
    /// `date,flagged_rate,precision,recall`
    pub fraud: Vec<[String; 4]>,
}

/// `days` consecutive dates ending at `end`, oldest first.
pub fn last_n_days(end: NaiveDate, days: usize) -> Vec<NaiveDate> {
    (0..days)
        .rev()
        .map(|back| end - Duration::days(back as i64))
        .collect()
}

/// Bounded random walks around typical portfolio values.
pub fn generate(end: NaiveDate, days: usize, seed: u64) -> DemoSeries {
    let mut rng = StdRng::seed_from_u64(seed);
    let dates = last_n_days(end, days);
    let mut jitter = |width: f64| (rng.gen::<f64>() - 0.5) * width;

    let (pd_base, el_base, approvals, rejections) = (0.08, 120_000.0, 150.0, 50.0);
    let mut credit = Vec::with_capacity(days);
    for d in &dates {
        let pd = (pd_base + jitter(0.006)).clamp(0.04, 0.12);
        let el = (el_base * (1.0 + jitter(0.1))) as i64;
        let a = ((approvals + jitter(0.1) * approvals) as i64).max(50);
        let r = ((rejections + jitter(0.1) * rejections) as i64).max(10);
        credit.push([
            d.to_string(),
            format!("{:.3}", pd),
            el.to_string(),
            a.to_string(),
            r.to_string(),
        ]);
    }

    let (mut flagged, mut precision, mut recall) = (0.032_f64, 0.840_f64, 0.610_f64);
    let mut fraud = Vec::with_capacity(days);
    for d in &dates {
        flagged = (flagged + jitter(0.002)).clamp(0.02, 0.05);
        precision = (precision + jitter(0.006)).clamp(0.80, 0.87);
        recall = (recall + jitter(0.006)).clamp(0.55, 0.70);
        fraud.push([
            d.to_string(),
            format!("{:.3}", flagged),
            format!("{:.3}", precision),
            format!("{:.3}", recall),
        ]);
    }

    DemoSeries { credit, fraud }
}

fn write_csv<const N: usize>(path: &Path, header: [&str; N], rows: &[[String; N]]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
    }
    let mut out = header.join(",");
    out.push('\n');
    for row in rows {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    fs::write(path, out).with_context(|| format!("writing {:?}", path))
}

/// Write the three demo data sets under `out_dir` (normally `<site>/demo_data`).
pub fn write_demo_data(out_dir: &Path, series: &DemoSeries) -> Result<()> {
    write_csv(
        &out_dir.join(CREDIT_KPIS),
        ["date", "avg_pd", "el_today", "approvals", "rejections"],
        &series.credit,
    )?;
    write_csv(
        &out_dir.join(FRAUD_KPIS),
        ["date", "flagged_rate", "precision", "recall"],
        &series.fraud,
    )?;
    let metrics: Vec<[String; 3]> = series
        .fraud
        .iter()
        .map(|[d, _, p, r]| [d.clone(), p.clone(), r.clone()])
        .collect();
    write_csv(
        &out_dir.join(FRAUD_METRICS),
        ["date", "precision", "recall"],
        &metrics,
    )?;
    info!(dir = %out_dir.display(), days = series.credit.len(), "wrote demo data");
    Ok(())
}
