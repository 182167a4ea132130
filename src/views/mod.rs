// src/views/mod.rs

mod credit;
mod fraud;
mod overview;

use reqwest::Client;
use serde::Serialize;
use std::fmt;
use tracing::{error, info, instrument};

use crate::config::{load_config, Config};
use crate::dom::{ChartFeed, Document};
use crate::fetch::Origin;
use crate::pipeline::CsvPipeline;
use crate::report::Kind;
use crate::score::{score, MOCK_DISABLED_TITLE, SCORING_TEXT};

pub const LOADING_TEXT: &str = "Loading...";

/// The dashboard pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Overview,
    Credit,
    Fraud,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Overview, Page::Credit, Page::Fraud];

    pub fn file_name(self) -> &'static str {
        match self {
            Page::Overview => "index.html",
            Page::Credit => "credit.html",
            Page::Fraud => "fraud.html",
        }
    }

    /// Built-in host page markup.
    pub fn template(self) -> &'static str {
        match self {
            Page::Overview => include_str!("../../assets/pages/index.html"),
            Page::Credit => include_str!("../../assets/pages/credit.html"),
            Page::Fraud => include_str!("../../assets/pages/fraud.html"),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Page::Overview => "overview",
            Page::Credit => "credit",
            Page::Fraud => "fraud",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewState {
    Loading,
    Rendered,
    PartiallyRendered,
}

/// Ids of the demo scoring widgets on a page.
struct ScoreWidgets {
    payload: &'static str,
    button: &'static str,
    response: &'static str,
}

fn score_widgets(kind: Kind) -> ScoreWidgets {
    match kind {
        Kind::Credit => ScoreWidgets {
            payload: "credit-payload",
            button: "score-api-btn",
            response: "api-response",
        },
        Kind::Fraud => ScoreWidgets {
            payload: "fraud-payload",
            button: "fraud-api-btn",
            response: "fraud-api-response",
        },
    }
}

/// One page run: the host page being filled in plus what went wrong.
#[derive(Debug, Clone, Serialize)]
pub struct ViewOutcome {
    pub page: Page,
    pub config: Config,
    pub state: ViewState,
    pub failures: Vec<String>,
    pub document: Document,
}

impl ViewOutcome {
    pub fn new(page: Page, config: Config, document: Document) -> Self {
        Self {
            page,
            config,
            state: ViewState::Loading,
            failures: Vec::new(),
            document,
        }
    }

    /// Record a widget that could not be filled; it keeps its placeholder.
    fn fail(&mut self, widget: &str, err: impl fmt::Display) {
        error!(page = %self.page, widget, error = %err, "widget left unrendered");
        self.failures.push(format!("{}: {}", widget, err));
    }

    fn chart(&mut self, id: &str, feed: ChartFeed) {
        if let Err(e) = self.document.draw_chart(id, feed) {
            self.fail(id, e);
        }
    }

    fn set(&mut self, id: &str, value: String) {
        self.document.set_text(id, value);
    }

    fn finish(&mut self) {
        self.state = if self.failures.is_empty() {
            ViewState::Rendered
        } else {
            ViewState::PartiallyRendered
        };
        info!(page = %self.page, state = ?self.state, failures = self.failures.len(), "page rendered");
    }

    /// Press the page's score button: read the payload textarea, write the
    /// response panel.
    pub async fn press_score(&mut self, client: &Client, kind: Kind, payload: Option<&str>) -> String {
        let ids = score_widgets(kind);
        let body = payload
            .map(str::to_string)
            .or_else(|| {
                let doc = &self.document;
                doc.value(ids.payload).or_else(|| doc.text(ids.payload)).map(str::to_string)
            })
            .unwrap_or_default();
        self.set(ids.response, SCORING_TEXT.to_string());
        let out = score(client, &self.config, kind, &body).await;
        self.set(ids.response, out.clone());
        out
    }
}

/// Mock mode cannot reach a backend; say so on the button.
fn wire_score_button(outcome: &mut ViewOutcome, kind: Kind) {
    if outcome.config.use_mock {
        let ids = score_widgets(kind);
        outcome.document.disable(ids.button, MOCK_DISABLED_TITLE);
    }
}

/// Fill `document` for `page` using an already-loaded config.
pub async fn render(page: Page, pipeline: &CsvPipeline, document: Document) -> ViewOutcome {
    let mut outcome = ViewOutcome::new(page, pipeline.config().clone(), document);
    match page {
        Page::Overview => overview::render(&mut outcome, pipeline).await,
        Page::Credit => credit::render(&mut outcome, pipeline).await,
        Page::Fraud => fraud::render(&mut outcome, pipeline).await,
    }
    outcome.finish();
    outcome
}

/// Full page load: config, then data, then binding. `template` overrides the
/// built-in host page markup.
#[instrument(level = "info", skip(origin, template))]
pub async fn run(page: Page, origin: &Origin, template: Option<&str>) -> ViewOutcome {
    let config = load_config(origin).await;
    let pipeline = CsvPipeline::new(origin.clone(), config);
    let document = Document::parse(template.unwrap_or_else(|| page.template()));
    render(page, &pipeline, document).await
}
