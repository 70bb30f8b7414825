// ABOUTME: CLI binary for the examhub crawler: source selection, dry-run, notify, verbose logging.
// ABOUTME: Wires env-configured collaborators together and maps the error count to the exit code.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use examhub_crawler::{
    builtin_sources, run_crawl, select_sources, Collaborators, CrawlOptions, ExamStore,
    LogNotifier, MemoryStore, RestStore, SessionOptions, WebhookConfig,
};

/// Fetch competitive exam notifications from official government sites.
#[derive(Parser, Debug)]
#[command(name = "examhub")]
#[command(about = "Crawl government exam sites and extract exam notifications")]
struct Args {
    /// Comma-separated source names to run (e.g. upsc,ssc,ibps). Default: all.
    #[arg(long = "sources", value_delimiter = ',')]
    sources: Vec<String>,

    /// Extract only: no persistence, notifications, or webhook push.
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Email registered users about newly discovered exams.
    #[arg(long = "notify")]
    notify: bool,

    /// Enable debug-level logging.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let all = builtin_sources();
    let configs = if args.sources.is_empty() {
        info!(count = all.len(), "running all sources");
        all
    } else {
        let valid: Vec<String> = all.iter().map(|c| c.name.clone()).collect();
        match select_sources(all, &args.sources) {
            Ok(selected) => {
                let names: Vec<&str> = selected.iter().map(|c| c.name.as_str()).collect();
                info!(?names, "running selected sources");
                selected
            }
            Err(unknown) => {
                eprintln!(
                    "error: unknown source(s) {}; valid sources are {}",
                    unknown.join(", "),
                    valid.join(", ")
                );
                return ExitCode::from(1);
            }
        }
    };

    let opts = CrawlOptions {
        dry_run: args.dry_run,
        notify: args.notify,
        session: session_options_from_env(),
        webhook: webhook_from_env(),
    };

    // Collaborators are built once here and handed down; nothing inside the
    // crawler reaches for global state.
    let store = build_store();
    let notifier = LogNotifier;

    let summary = run_crawl(
        &configs,
        &Collaborators {
            store: store.as_ref(),
            notifier: &notifier,
            renderer: None,
        },
        &opts,
    )
    .await;

    println!(
        "scraped={} new={} updated={} errors={} notified={}",
        summary.stats.scraped,
        summary.stats.new,
        summary.stats.updated,
        summary.stats.errors,
        summary.stats.notified
    );

    if summary.stats.errors > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn build_store() -> Box<dyn ExamStore> {
    let endpoint = std::env::var("STORE_URL").unwrap_or_default();
    let key = std::env::var("STORE_SERVICE_KEY").unwrap_or_default();
    if endpoint.is_empty() || key.is_empty() {
        warn!("STORE_URL/STORE_SERVICE_KEY not set; records stay in memory for this run");
        return Box::new(MemoryStore::new());
    }
    Box::new(RestStore::new(endpoint, key))
}

fn session_options_from_env() -> SessionOptions {
    let mut opts = SessionOptions::default();
    if let Some(secs) = env_u64("REQUEST_TIMEOUT") {
        opts.timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = env_f64("REQUEST_DELAY") {
        opts.request_delay = Duration::from_secs_f64(secs);
        opts.retry_wait = opts.request_delay;
    }
    if let Some(retries) = env_u64("MAX_RETRIES") {
        opts.max_retries = retries as u32;
    }
    if let Ok(agent) = std::env::var("USER_AGENT") {
        if !agent.is_empty() {
            opts.user_agent = agent;
        }
    }
    opts
}

fn webhook_from_env() -> Option<WebhookConfig> {
    let url = std::env::var("CRAWLER_WEBHOOK_URL").ok()?;
    if url.is_empty() {
        return None;
    }
    Some(WebhookConfig {
        url,
        secret: std::env::var("CRON_SECRET").unwrap_or_default(),
    })
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok()?.parse().ok()
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name).ok()?.parse().ok()
}
