// src/config.rs

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::fetch::{fetch_text, Origin};

pub const CONFIG_PATH: &str = "config.json";
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Where the site's data sets come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Running next to the pipelines; data lives in `../docs_global/bi`.
    Local,
    /// Published site; data is the bundled `demo_data`.
    Hosted,
}

/// The site descriptor served as `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub mode: Mode,
    pub api_base: String,
    pub use_mock: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Hosted,
            api_base: DEFAULT_API_BASE.to_string(),
            use_mock: true,
        }
    }
}

/// Load `config.json` from the site. Never fails: an unreachable or
/// malformed descriptor yields [`Config::default`].
pub async fn load_config(origin: &Origin) -> Config {
    let text = match fetch_text(origin, CONFIG_PATH).await {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "config unavailable, using fallback");
            return Config::default();
        }
    };
    match serde_json::from_str::<Config>(&text) {
        Ok(cfg) => {
            info!(mode = ?cfg.mode, api_base = %cfg.api_base, use_mock = cfg.use_mock, "loaded config");
            cfg
        }
        Err(e) => {
            warn!(error = %e, "config malformed, using fallback");
            Config::default()
        }
    }
}
