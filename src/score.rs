// src/score.rs

use anyhow::{Context, Result};
use reqwest::{header::CONTENT_TYPE, Client};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::Config;
use crate::report::Kind;

const MOCK_DELAY: Duration = Duration::from_millis(200);

pub const SCORING_TEXT: &str = "Scoring...";
pub const MOCK_DISABLED_TITLE: &str = "Disabled in hosted/mock mode";

/// Canned response returned in mock mode.
pub fn mock_response(kind: Kind) -> Value {
    match kind {
        Kind::Credit => json!({ "pd": 0.083, "confidence": 0.92, "model": "demo-nonflat-v1" }),
        Kind::Fraud => json!({
            "fraud_probability": 0.21,
            "decision": "review",
            "confidence": 0.88,
            "model": "demo-fraud-v1"
        }),
    }
}

pub fn endpoint(config: &Config, kind: Kind) -> String {
    format!("{}/{}/score", config.api_base.trim_end_matches('/'), kind)
}

async fn call_live(client: &Client, url: &str, body: String) -> Result<Value> {
    let resp = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .with_context(|| format!("POST {} failed", url))?;
    resp.json::<Value>()
        .await
        .with_context(|| format!("reading JSON from {}", url))
}

/// Run the demo scoring action and return the response panel text:
/// pretty-printed JSON, or `Error: ...`. An empty payload is sent as `{}`;
/// anything else, whitespace included, goes out untouched.
pub async fn score(client: &Client, config: &Config, kind: Kind, payload: &str) -> String {
    let body = if payload.is_empty() {
        "{}".to_string()
    } else {
        payload.to_string()
    };

    let result = if config.use_mock {
        sleep(MOCK_DELAY).await;
        Ok(mock_response(kind))
    } else {
        let url = endpoint(config, kind);
        info!(%url, "scoring");
        call_live(client, &url, body).await
    };

    match result.and_then(|v| serde_json::to_string_pretty(&v).map_err(Into::into)) {
        Ok(text) => text,
        Err(e) => {
            warn!(%kind, error = %format!("{:#}", e), "scoring failed");
            format!("Error: {:#}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_http::{request_body, serve_once};

    fn live(base: &str) -> Config {
        Config {
            api_base: base.to_string(),
            use_mock: false,
            ..Config::default()
        }
    }

    #[test]
    fn endpoint_joins_api_base() {
        let cfg = Config {
            api_base: "http://api.test/".into(),
            ..Config::default()
        };
        assert_eq!(endpoint(&cfg, Kind::Credit), "http://api.test/credit/score");
        assert_eq!(endpoint(&cfg, Kind::Fraud), "http://api.test/fraud/score");
    }

    #[tokio::test]
    async fn mock_mode_returns_canned_payload() {
        let out = score(&Client::new(), &Config::default(), Kind::Fraud, "").await;
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["decision"], "review");
        assert_eq!(v["model"], "demo-fraud-v1");
        assert!(out.contains('\n'));
    }

    #[tokio::test]
    async fn live_failure_is_an_inline_error() {
        let cfg = Config {
            api_base: "http://127.0.0.1:9".into(),
            use_mock: false,
            ..Config::default()
        };
        let out = score(&Client::new(), &cfg, Kind::Credit, "{}").await;
        assert!(out.starts_with("Error: POST http://127.0.0.1:9/credit/score failed"));
    }

    #[tokio::test]
    async fn live_success_is_pretty_json_of_the_response() {
        let (base, server) =
            serve_once("200 OK", "application/json", r#"{"pd":0.12,"model":"live"}"#).await;
        let payload = r#"{"income": 52000}"#;

        let out = score(&Client::new(), &live(&base), Kind::Credit, payload).await;
        let expected = serde_json::to_string_pretty(&json!({ "pd": 0.12, "model": "live" })).unwrap();
        assert_eq!(out, expected);

        let raw = server.await.unwrap();
        let head = raw.to_ascii_lowercase();
        assert!(head.starts_with("post /credit/score http/1.1"), "{}", raw);
        assert!(head.contains("content-type: application/json"));
        assert_eq!(request_body(&raw), payload);
    }

    #[tokio::test]
    async fn live_non_json_body_is_an_inline_error() {
        let (base, server) = serve_once("200 OK", "text/html", "<html>oops</html>").await;

        let out = score(&Client::new(), &live(&base), Kind::Fraud, "{}").await;
        assert!(
            out.starts_with(&format!("Error: reading JSON from {}/fraud/score", base)),
            "{}",
            out
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn empty_payload_is_sent_as_an_empty_object() {
        let (base, server) = serve_once("200 OK", "application/json", "{}").await;
        score(&Client::new(), &live(&base), Kind::Credit, "").await;
        assert_eq!(request_body(&server.await.unwrap()), "{}");
    }

    #[tokio::test]
    async fn whitespace_payload_is_sent_as_is() {
        let (base, server) = serve_once("200 OK", "application/json", "{}").await;
        let out = score(&Client::new(), &live(&base), Kind::Credit, "  ").await;
        assert_eq!(out, "{}");
        assert_eq!(request_body(&server.await.unwrap()), "  ");
    }
}
