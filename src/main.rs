use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use futures::future::join_all;
use riskdash::{
    demo, load_config, render,
    report::Kind,
    views::{self, Page},
    Origin,
};
use std::{fs, path::PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Credit and fraud KPI dashboard over a static site's CSV exports.
#[derive(Debug, Parser)]
#[command(name = "riskdash", version)]
struct Cli {
    /// Site root: an http(s) URL or a directory holding config.json.
    #[arg(long, default_value = "docs_site", global = true)]
    site: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load the data sets and render one page, or all of them.
    Render {
        #[arg(long, value_enum)]
        page: Option<Page>,
        /// Directory with replacement index.html / credit.html / fraud.html.
        #[arg(long)]
        templates: Option<PathBuf>,
        /// Also write the page view-models as JSON.
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Run the demo scoring action (mock or live, per config.json).
    Score {
        #[arg(long, value_enum)]
        kind: Kind,
        /// JSON body; defaults to the sample in the page's payload box.
        #[arg(long)]
        payload: Option<String>,
    },
    /// Write synthetic demo_data CSVs ending today.
    DemoData {
        #[arg(long, default_value = "docs_site/demo_data")]
        out: PathBuf,
        #[arg(long, default_value_t = demo::DEFAULT_DAYS)]
        days: usize,
        #[arg(long, default_value_t = demo::DEFAULT_SEED)]
        seed: u64,
    },
}

fn read_template(dir: &Option<PathBuf>, page: Page) -> Result<Option<String>> {
    match dir {
        Some(d) => {
            let path = d.join(page.file_name());
            if path.is_file() {
                let html = fs::read_to_string(&path)
                    .with_context(|| format!("reading template {:?}", path))?;
                Ok(Some(html))
            } else {
                warn!(path = %path.display(), "no template override, using built-in page");
                Ok(None)
            }
        }
        None => Ok(None),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,riskdash=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let origin = Origin::parse(&cli.site)?;
    info!(site = %cli.site, "startup");

    match cli.command {
        Command::Render {
            page,
            templates,
            json,
        } => {
            // ─── 2) collect pages + host markup ──────────────────────
            let pages: Vec<Page> = page.map(|p| vec![p]).unwrap_or_else(|| Page::ALL.to_vec());
            let mut markup = Vec::with_capacity(pages.len());
            for p in &pages {
                markup.push(read_template(&templates, *p)?);
            }

            // ─── 3) each page loads independently ────────────────────
            let outcomes = join_all(
                pages
                    .iter()
                    .zip(&markup)
                    .map(|(p, html)| views::run(*p, &origin, html.as_deref())),
            )
            .await;

            for outcome in &outcomes {
                println!("{}", render::summary(outcome));
            }
            if let Some(path) = json {
                render::write_snapshot(&path, &outcomes)?;
                info!(path = %path.display(), "wrote snapshot");
            }
        }

        Command::Score { kind, payload } => {
            let config = load_config(&origin).await;
            let page = match kind {
                Kind::Credit => Page::Credit,
                Kind::Fraud => Page::Fraud,
            };
            let mut outcome = views::ViewOutcome::new(
                page,
                config,
                riskdash::dom::Document::parse(page.template()),
            );
            let out = outcome
                .press_score(&origin.client(), kind, payload.as_deref())
                .await;
            println!("{}", out);
        }

        Command::DemoData { out, days, seed } => {
            let series = demo::generate(Local::now().date_naive(), days, seed);
            demo::write_demo_data(&out, &series)?;
        }
    }

    info!("all done");
    Ok(())
}
