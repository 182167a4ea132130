// src/pipeline.rs

use tracing::{info, instrument, warn};

use crate::config::{Config, Mode};
use crate::fetch::{fetch_text, LoadError, Origin};
use crate::table::{aggregate::DATE_KEY, parse, Table};

pub const CREDIT_KPIS: &str = "credit/kpis_daily.csv";
pub const FRAUD_KPIS: &str = "fraud/kpis_daily.csv";
pub const FRAUD_METRICS: &str = "fraud/metrics_daily.csv";

/// Site-relative path of a data set. Local mode reads the shared BI export
/// next to the site, hosted mode the bundled demo copy.
pub fn resolve_csv_url(config: &Config, name: &str) -> String {
    match config.mode {
        Mode::Local => format!("../docs_global/bi/{}", name),
        Mode::Hosted => format!("demo_data/{}", name),
    }
}

/// Loads data sets for one page run with an already-resolved config.
#[derive(Debug, Clone)]
pub struct CsvPipeline {
    origin: Origin,
    config: Config,
}

impl CsvPipeline {
    pub fn new(origin: Origin, config: Config) -> Self {
        Self { origin, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    #[instrument(level = "info", skip(self))]
    pub async fn load_table(&self, name: &str) -> Result<Table, LoadError> {
        let rel = resolve_csv_url(&self.config, name);
        let text = fetch_text(&self.origin, &rel).await?;
        let table = parse(&text);

        let bad = table.unordered_dates(DATE_KEY);
        if table.headers.iter().any(|h| h == DATE_KEY) && !bad.is_empty() {
            warn!(data_set = name, count = bad.len(), first = bad[0], "dates are not YYYY-MM-DD; latest-by-date may be wrong");
        }
        info!(data_set = name, rows = table.len(), "loaded table");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn cfg(mode: Mode) -> Config {
        Config {
            mode,
            ..Config::default()
        }
    }

    #[test]
    fn mode_picks_the_data_root() {
        assert_eq!(
            resolve_csv_url(&cfg(Mode::Local), CREDIT_KPIS),
            "../docs_global/bi/credit/kpis_daily.csv"
        );
        assert_eq!(
            resolve_csv_url(&cfg(Mode::Hosted), CREDIT_KPIS),
            "demo_data/credit/kpis_daily.csv"
        );
    }

    #[tokio::test]
    async fn hosted_loads_bundled_demo_data() -> Result<()> {
        let tmp = tempdir()?;
        let dir = tmp.path().join("demo_data/fraud");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("metrics_daily.csv"), "date,precision,recall\n2024-01-01,0.8,0.6\n")?;

        let pipeline = CsvPipeline::new(Origin::Dir(tmp.path().to_path_buf()), cfg(Mode::Hosted));
        let t = pipeline.load_table(FRAUD_METRICS).await?;
        assert_eq!(t.len(), 1);
        assert_eq!(t.rows[0].get("recall"), Some("0.6"));
        Ok(())
    }

    #[tokio::test]
    async fn local_mode_reads_outside_the_site() -> Result<()> {
        let tmp = tempdir()?;
        let site = tmp.path().join("docs_site");
        let bi = tmp.path().join("docs_global/bi/credit");
        fs::create_dir_all(&site)?;
        fs::create_dir_all(&bi)?;
        fs::write(bi.join("kpis_daily.csv"), "date,avg_pd\n2024-01-01,0.05\n2024-01-02,0.06\n")?;

        let pipeline = CsvPipeline::new(Origin::Dir(site), cfg(Mode::Local));
        assert_eq!(pipeline.load_table(CREDIT_KPIS).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn missing_data_set_is_a_load_error() -> Result<()> {
        let tmp = tempdir()?;
        let pipeline = CsvPipeline::new(Origin::Dir(tmp.path().to_path_buf()), cfg(Mode::Hosted));
        let err = pipeline.load_table(FRAUD_KPIS).await.unwrap_err();
        assert!(err.location.contains("demo_data"));
        Ok(())
    }
}
