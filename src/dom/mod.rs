// src/dom/mod.rs

pub mod chart;

pub use chart::{Axis, ChartFeed, ChartKind, Dataset};

use scraper::{Html, Selector};
use serde::Serialize;
use std::{collections::BTreeMap, fmt};
use tracing::trace;

/// An element of the host page that views can address by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: String,
    pub text: String,
    /// Raw contents of a `<textarea>`, whitespace intact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub hidden: bool,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `href` of the first anchor inside the element (or of the element itself).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartFeed>,
}

impl Element {
    pub fn is_canvas(&self) -> bool {
        self.tag == "canvas"
    }
}

/// A chart was bound to an id that is missing or not a canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartError {
    pub id: String,
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no canvas element with id `{}`", self.id)
    }
}

impl std::error::Error for ChartError {}

/// Id-addressable elements of a host page. Writes to unknown ids are no-ops,
/// except charts, which need their canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    elements: BTreeMap<String, Element>,
}

impl Document {
    /// Collect every element carrying an `id` attribute.
    pub fn parse(html: &str) -> Self {
        let doc = Html::parse_document(html);
        let with_id = Selector::parse("[id]").expect("id selector should parse");
        let anchor = Selector::parse("a[href]").expect("anchor selector should parse");

        let mut elements = BTreeMap::new();
        for el in doc.select(&with_id) {
            let v = el.value();
            let Some(id) = v.attr("id") else { continue };
            let href = v
                .attr("href")
                .or_else(|| el.select(&anchor).next().and_then(|a| a.value().attr("href")))
                .map(str::to_string);
            let text = el.text().collect::<Vec<_>>().join(" ");
            let value = (v.name() == "textarea").then(|| el.text().collect::<String>());
            let element = Element {
                tag: v.name().to_string(),
                text: text.split_whitespace().collect::<Vec<_>>().join(" "),
                value,
                hidden: v.classes().any(|c| c == "hidden") || v.attr("hidden").is_some(),
                disabled: v.attr("disabled").is_some(),
                title: v.attr("title").map(str::to_string),
                href,
                chart: None,
            };
            trace!(id, tag = %element.tag, "registered element");
            elements.insert(id.to_string(), element);
        }
        Self { elements }
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.get(id).map(|e| e.text.as_str())
    }

    /// Form value of a textarea; `None` for anything else.
    pub fn value(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(|e| e.value.as_deref())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    pub fn set_text(&mut self, id: &str, value: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(id) {
            el.text = value.into();
        }
    }

    pub fn disable(&mut self, id: &str, title: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.disabled = true;
            el.title = Some(title.to_string());
        }
    }

    /// Point the link inside `id` at `href` and unhide it. Needs an anchor.
    pub fn reveal_link(&mut self, id: &str, href: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            if el.href.is_some() {
                el.href = Some(href.to_string());
                el.hidden = false;
            }
        }
    }

    pub fn draw_chart(&mut self, id: &str, feed: ChartFeed) -> Result<(), ChartError> {
        match self.elements.get_mut(id) {
            Some(el) if el.is_canvas() => {
                el.chart = Some(feed);
                Ok(())
            }
            _ => Err(ChartError { id: id.to_string() }),
        }
    }
}
