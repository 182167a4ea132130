// src/views/credit.rs

use crate::dom::{Axis, ChartFeed, ChartKind};
use crate::format::{fmt_int, fmt_money, fmt_pct};
use crate::pipeline::{CsvPipeline, CREDIT_KPIS};
use crate::report::{show_report_if_local, Kind};
use crate::table::{aggregate::DATE_KEY, latest_by_date, window};

use super::{wire_score_button, ViewOutcome};

const TREND_DAYS: usize = 30;

pub(super) async fn render(view: &mut ViewOutcome, pipeline: &CsvPipeline) {
    match pipeline.load_table(CREDIT_KPIS).await {
        Ok(rows) => match latest_by_date(&rows, DATE_KEY) {
            Some(latest) => {
                view.set("avg-pd", fmt_pct(latest.get("avg_pd")));
                view.set("expected-loss", fmt_money(latest.get("el_today")));
                view.set("approvals", fmt_int(latest.get("approvals")));
                view.set("rejections", fmt_int(latest.get("rejections")));

                let last = window(&rows, TREND_DAYS);
                view.chart(
                    "pd-trend-chart",
                    ChartFeed::from_rows(ChartKind::Line, last, "avg_pd", "Avg PD", Axis::Percent),
                );
                view.chart(
                    "el-trend-chart",
                    ChartFeed::from_rows(
                        ChartKind::Line,
                        last,
                        "el_today",
                        "Expected Loss",
                        Axis::Dollars,
                    ),
                );
            }
            None => view.fail("credit-kpis", "no rows in credit/kpis_daily.csv"),
        },
        Err(e) => view.fail("credit-kpis", e),
    }

    wire_score_button(view, Kind::Credit);
    let config = view.config.clone();
    show_report_if_local(&mut view.document, &config, Kind::Credit, "report-button");
}
