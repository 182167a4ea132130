// src/views/fraud.rs

use crate::dom::{Axis, ChartFeed, ChartKind};
use crate::format::fmt_pct;
use crate::pipeline::{CsvPipeline, FRAUD_KPIS, FRAUD_METRICS};
use crate::report::{show_report_if_local, Kind};
use crate::table::{aggregate::DATE_KEY, latest_by_date, window};

use super::{wire_score_button, ViewOutcome};

const TREND_DAYS: usize = 30;

/// KPIs come from the daily KPI export, trend charts from the metrics export.
pub(super) async fn render(view: &mut ViewOutcome, pipeline: &CsvPipeline) {
    let (kpis, metrics) = tokio::join!(
        pipeline.load_table(FRAUD_KPIS),
        pipeline.load_table(FRAUD_METRICS)
    );

    match kpis {
        Ok(rows) => match latest_by_date(&rows, DATE_KEY) {
            Some(latest) => {
                view.set("flagged-rate", fmt_pct(latest.get("flagged_rate")));
                view.set("precision", fmt_pct(latest.get("precision")));
                view.set("recall", fmt_pct(latest.get("recall")));
            }
            None => view.fail("fraud-kpis", "no rows in fraud/kpis_daily.csv"),
        },
        Err(e) => view.fail("fraud-kpis", e),
    }

    match metrics {
        Ok(rows) if !rows.is_empty() => {
            let last = window(&rows, TREND_DAYS);
            view.chart(
                "precision-trend-chart",
                ChartFeed::from_rows(ChartKind::Line, last, "precision", "Precision", Axis::Percent),
            );
            view.chart(
                "recall-trend-chart",
                ChartFeed::from_rows(ChartKind::Line, last, "recall", "Recall", Axis::Percent),
            );
        }
        Ok(_) => view.fail("fraud-trends", "no rows in fraud/metrics_daily.csv"),
        Err(e) => view.fail("fraud-trends", e),
    }

    wire_score_button(view, Kind::Fraud);
    let config = view.config.clone();
    show_report_if_local(&mut view.document, &config, Kind::Fraud, "fraud-report-button");
}
