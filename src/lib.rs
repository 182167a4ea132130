pub mod config;
pub mod demo;
pub mod dom;
pub mod fetch;
pub mod format;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod score;
pub mod table;
pub mod views;

#[cfg(test)]
mod test_http;

pub use config::{load_config, Config, Mode};
pub use fetch::{LoadError, Origin};
pub use pipeline::{resolve_csv_url, CsvPipeline};
pub use table::{parse, Row, Table};
pub use views::{Page, ViewOutcome, ViewState};
