// src/views/overview.rs

use crate::config::Mode;
use crate::dom::{Axis, ChartFeed, ChartKind};
use crate::format::{fmt_money, fmt_pct};
use crate::pipeline::{CsvPipeline, CREDIT_KPIS, FRAUD_KPIS};
use crate::table::{aggregate::DATE_KEY, latest_by_date, window};

use super::ViewOutcome;

const SPARK_DAYS: usize = 14;

/// Home page: one card per domain, a freshness banner, and 14-day sparklines.
/// Credit and fraud degrade independently.
pub(super) async fn render(view: &mut ViewOutcome, pipeline: &CsvPipeline) {
    let (credit, fraud) = tokio::join!(
        pipeline.load_table(CREDIT_KPIS),
        pipeline.load_table(FRAUD_KPIS)
    );
    let mut latest_dates: Vec<String> = Vec::new();

    match credit {
        Ok(rows) => match latest_by_date(&rows, DATE_KEY) {
            Some(latest) => {
                view.set(
                    "credit-kpi",
                    format!(
                        "Avg PD {} · EL Today: {}",
                        fmt_pct(latest.get("avg_pd")),
                        fmt_money(latest.get("el_today"))
                    ),
                );
                latest_dates.push(latest.cell(DATE_KEY).to_string());
                view.chart(
                    "credit-sparkline",
                    ChartFeed::from_rows(
                        ChartKind::Sparkline,
                        window(&rows, SPARK_DAYS),
                        "avg_pd",
                        "Avg PD",
                        Axis::Percent,
                    ),
                );
            }
            None => view.fail("credit-kpi", "no rows in credit/kpis_daily.csv"),
        },
        Err(e) => view.fail("credit-kpi", e),
    }

    match fraud {
        Ok(rows) => match latest_by_date(&rows, DATE_KEY) {
            Some(latest) => {
                view.set(
                    "fraud-kpi",
                    format!(
                        "Flagged {} · Precision: {}",
                        fmt_pct(latest.get("flagged_rate")),
                        fmt_pct(latest.get("precision"))
                    ),
                );
                latest_dates.push(latest.cell(DATE_KEY).to_string());
                view.chart(
                    "fraud-sparkline",
                    ChartFeed::from_rows(
                        ChartKind::Sparkline,
                        window(&rows, SPARK_DAYS),
                        "flagged_rate",
                        "Flagged %",
                        Axis::Percent,
                    ),
                );
            }
            None => view.fail("fraud-kpi", "no rows in fraud/kpis_daily.csv"),
        },
        Err(e) => view.fail("fraud-kpi", e),
    }

    if let Some(freshest) = latest_dates.into_iter().max() {
        let source = match view.config.mode {
            Mode::Local => "Local pipelines",
            Mode::Hosted => "Bundled demo data",
        };
        view.set("freshness-label", format!("Freshness: {}", freshest));
        view.set("freshness-kpi", format!("Most Recent Data {} · {}", freshest, source));
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::super::{run, Page, ViewState, LOADING_TEXT};
    use crate::fetch::Origin;
    use tempfile::tempdir;

    #[tokio::test]
    async fn both_sources_render() {
        init_test_logging();
        let tmp = tempdir().unwrap();
        write(tmp.path(), "config.json", HOSTED_MOCK);
        write(tmp.path(), "demo_data/credit/kpis_daily.csv", CREDIT_CSV);
        write(tmp.path(), "demo_data/fraud/kpis_daily.csv", FRAUD_CSV);

        let out = run(Page::Overview, &Origin::Dir(tmp.path().to_path_buf()), None).await;
        assert_eq!(out.state, ViewState::Rendered);
        let doc = &out.document;
        assert_eq!(doc.text("credit-kpi"), Some("Avg PD 5.0% · EL Today: $1,000"));
        assert_eq!(doc.text("fraud-kpi"), Some("Flagged 3.3% · Precision: 85.0%"));
        assert_eq!(doc.text("freshness-label"), Some("Freshness: 2024-06-02"));
        assert_eq!(
            doc.text("freshness-kpi"),
            Some("Most Recent Data 2024-06-02 · Bundled demo data")
        );
        let spark = doc.get("credit-sparkline").unwrap().chart.as_ref().unwrap();
        assert_eq!(spark.labels, vec!["2024-05-31", "2024-06-01"]);
    }

    #[tokio::test]
    async fn fraud_outage_keeps_credit_card() {
        init_test_logging();
        let tmp = tempdir().unwrap();
        write(tmp.path(), "config.json", HOSTED_MOCK);
        write(tmp.path(), "demo_data/credit/kpis_daily.csv", CREDIT_CSV);

        let out = run(Page::Overview, &Origin::Dir(tmp.path().to_path_buf()), None).await;
        assert_eq!(out.state, ViewState::PartiallyRendered);
        assert_eq!(out.failures.len(), 1);
        assert!(out.failures[0].starts_with("fraud-kpi: Failed to load"));

        let doc = &out.document;
        assert_eq!(doc.text("credit-kpi"), Some("Avg PD 5.0% · EL Today: $1,000"));
        assert_eq!(doc.text("fraud-kpi"), Some(LOADING_TEXT));
        assert!(doc.get("fraud-sparkline").unwrap().chart.is_none());
        assert_eq!(doc.text("freshness-label"), Some("Freshness: 2024-06-01"));
    }

    #[tokio::test]
    async fn nothing_loads_without_data() {
        let tmp = tempdir().unwrap();
        let out = run(Page::Overview, &Origin::Dir(tmp.path().to_path_buf()), None).await;
        assert_eq!(out.state, ViewState::PartiallyRendered);
        assert_eq!(out.failures.len(), 2);
        assert_eq!(out.document.text("freshness-label"), Some("Freshness: Loading..."));
    }
}
