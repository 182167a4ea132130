// src/fetch/mod.rs

use anyhow::Context;
use reqwest::{
    header::{CACHE_CONTROL, PRAGMA},
    Client,
};
use std::{fmt, path::PathBuf};
use tracing::{debug, instrument};
use url::Url;

/// Where site-relative paths (`config.json`, `demo_data/...`) are read from.
#[derive(Debug, Clone)]
pub enum Origin {
    /// A static file server; paths are joined onto `base`.
    Http { client: Client, base: Url },
    /// A site checked out on disk; paths are joined onto the directory.
    Dir(PathBuf),
}

impl Origin {
    /// `http(s)://` becomes an HTTP origin, anything else a directory.
    /// A trailing slash is added to URLs so relative joins stay inside the site.
    pub fn parse(site: &str) -> anyhow::Result<Self> {
        if site.starts_with("http://") || site.starts_with("https://") {
            let mut s = site.to_string();
            if !s.ends_with('/') {
                s.push('/');
            }
            let base = Url::parse(&s).with_context(|| format!("parsing site URL {}", site))?;
            Ok(Origin::Http {
                client: Client::new(),
                base,
            })
        } else {
            Ok(Origin::Dir(PathBuf::from(site)))
        }
    }

    /// The absolute location a site-relative path resolves to.
    pub fn locate(&self, rel: &str) -> Result<String, LoadError> {
        match self {
            Origin::Http { base, .. } => base
                .join(rel)
                .map(|u| u.to_string())
                .map_err(|e| LoadError::new(rel, LoadErrorKind::BadUrl(e.to_string()))),
            Origin::Dir(root) => Ok(root.join(rel).display().to_string()),
        }
    }

    /// Client used for calls outside the site (the scoring API).
    pub fn client(&self) -> Client {
        match self {
            Origin::Http { client, .. } => client.clone(),
            Origin::Dir(_) => Client::new(),
        }
    }
}

#[derive(Debug)]
pub enum LoadErrorKind {
    BadUrl(String),
    Transport(String),
    Status(u16),
    Io(std::io::Error),
}

/// A site resource could not be read. Carries the resolved location.
#[derive(Debug)]
pub struct LoadError {
    pub location: String,
    pub kind: LoadErrorKind,
}

impl LoadError {
    pub fn new(location: impl Into<String>, kind: LoadErrorKind) -> Self {
        Self {
            location: location.into(),
            kind,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LoadErrorKind::BadUrl(e) => write!(f, "Failed to load {}: bad url ({})", self.location, e),
            LoadErrorKind::Transport(e) => write!(f, "Failed to load {}: {}", self.location, e),
            LoadErrorKind::Status(code) => {
                write!(f, "Failed to load {}: HTTP {}", self.location, code)
            }
            LoadErrorKind::Io(e) => write!(f, "Failed to load {}: {}", self.location, e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            LoadErrorKind::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Read a site-relative resource as text, bypassing any HTTP cache.
#[instrument(level = "debug", skip(origin))]
pub async fn fetch_text(origin: &Origin, rel: &str) -> Result<String, LoadError> {
    let location = origin.locate(rel)?;
    debug!("Fetching text from {}", location);
    match origin {
        Origin::Http { client, .. } => {
            let resp = client
                .get(&location)
                .header(CACHE_CONTROL, "no-cache, no-store")
                .header(PRAGMA, "no-cache")
                .send()
                .await
                .map_err(|e| LoadError::new(&location, LoadErrorKind::Transport(e.to_string())))?;
            let status = resp.status();
            if !status.is_success() {
                return Err(LoadError::new(&location, LoadErrorKind::Status(status.as_u16())));
            }
            resp.text()
                .await
                .map_err(|e| LoadError::new(&location, LoadErrorKind::Transport(e.to_string())))
        }
        Origin::Dir(_) => tokio::fs::read_to_string(&location)
            .await
            .map_err(|e| LoadError::new(&location, LoadErrorKind::Io(e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_http::serve_once;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn http_site_gets_trailing_slash() -> Result<()> {
        let origin = Origin::parse("http://example.test/site")?;
        assert_eq!(
            origin.locate("demo_data/credit/kpis_daily.csv")?,
            "http://example.test/site/demo_data/credit/kpis_daily.csv"
        );
        Ok(())
    }

    #[test]
    fn parent_paths_leave_the_site_dir() -> Result<()> {
        let origin = Origin::parse("http://example.test/docs_site/")?;
        assert_eq!(
            origin.locate("../docs_global/bi/fraud/kpis_daily.csv")?,
            "http://example.test/docs_global/bi/fraud/kpis_daily.csv"
        );
        Ok(())
    }

    #[tokio::test]
    async fn dir_origin_reads_files() -> Result<()> {
        let tmp = tempdir()?;
        std::fs::write(tmp.path().join("config.json"), "{}")?;
        let origin = Origin::Dir(tmp.path().to_path_buf());
        assert_eq!(fetch_text(&origin, "config.json").await?, "{}");
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_names_the_location() -> Result<()> {
        let tmp = tempdir()?;
        let origin = Origin::Dir(tmp.path().to_path_buf());
        let err = fetch_text(&origin, "demo_data/nope.csv").await.unwrap_err();
        assert!(err.location.ends_with("demo_data/nope.csv"));
        assert!(matches!(err.kind, LoadErrorKind::Io(_)));
        assert!(err.to_string().starts_with("Failed to load"));
        Ok(())
    }

    #[tokio::test]
    async fn http_404_is_a_status_error_with_the_joined_url() -> Result<()> {
        let (base, server) = serve_once("404 Not Found", "text/plain", "nope").await;
        let origin = Origin::parse(&format!("{}/site", base))?;

        let err = fetch_text(&origin, "demo_data/fraud/kpis_daily.csv")
            .await
            .unwrap_err();
        assert!(matches!(err.kind, LoadErrorKind::Status(404)));
        assert_eq!(err.location, format!("{}/site/demo_data/fraud/kpis_daily.csv", base));
        assert!(err.to_string().ends_with("HTTP 404"));

        let request = server.await?.to_ascii_lowercase();
        assert!(request.starts_with("get /site/demo_data/fraud/kpis_daily.csv http/1.1"));
        assert!(request.contains("cache-control: no-cache, no-store"));
        assert!(request.contains("pragma: no-cache"));
        Ok(())
    }

    #[tokio::test]
    async fn http_200_returns_the_body() -> Result<()> {
        let (base, server) =
            serve_once("200 OK", "text/csv", "date,precision,recall\n2024-01-01,0.8,0.6\n").await;
        let origin = Origin::parse(&base)?;

        let text = fetch_text(&origin, "demo_data/fraud/metrics_daily.csv").await?;
        assert_eq!(text, "date,precision,recall\n2024-01-01,0.8,0.6\n");
        server.await?;
        Ok(())
    }
}
