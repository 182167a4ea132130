// src/report.rs

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{Config, Mode};
use crate::dom::Document;

/// Which risk domain a page, report, or scoring call belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Credit,
    Fraud,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Credit => "credit",
            Kind::Fraud => "fraud",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Same-origin path of the daily report published for `date`.
pub fn report_href(kind: Kind, date: NaiveDate) -> String {
    format!(
        "../docs_global/reports/{kind}/{date}/{kind}_daily_report.html",
        kind = kind,
        date = date.format("%Y-%m-%d")
    )
}

/// Today's report, by the local calendar.
pub fn today_report_href(kind: Kind) -> String {
    report_href(kind, Local::now().date_naive())
}

/// Reports only exist next to the pipelines, so the link shows in local mode only.
pub fn show_report_if_local(doc: &mut Document, config: &Config, kind: Kind, container_id: &str) {
    if config.mode != Mode::Local {
        return;
    }
    doc.reveal_link(container_id, &today_report_href(kind));
}
