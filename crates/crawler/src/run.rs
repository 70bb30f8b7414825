// ABOUTME: Run orchestration: sources sequentially, per-record persistence, notifications, webhook.
// ABOUTME: No error in one source or record aborts the run; failures only move counters.

use tracing::{debug, error, info, warn};

use examhub_extract::ExamRecord;

use crate::notify::Notifier;
use crate::session::{Renderer, Session, SessionOptions};
use crate::source::SourceConfig;
use crate::store::{ExamStore, Recipient};
use crate::strategy::{run_source, SourceReport};
use crate::webhook::{push_results, RunStats, WebhookConfig};

/// Settings for one orchestration pass.
#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    /// Extract only: no persistence, notifications, or webhook push.
    pub dry_run: bool,
    /// Email registered users about newly discovered exams.
    pub notify: bool,
    pub session: SessionOptions,
    pub webhook: Option<WebhookConfig>,
}

/// Externally constructed collaborators, handed in once per run.
pub struct Collaborators<'a> {
    pub store: &'a dyn ExamStore,
    pub notifier: &'a dyn Notifier,
    pub renderer: Option<&'a dyn Renderer>,
}

/// What a full pass produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub stats: RunStats,
    pub reports: Vec<SourceReport>,
}

/// Runs the requested sources one after another (deliberately sequential;
/// politeness, not a limitation), persists and notifies per record, and
/// pushes the webhook report. Always completes every requested source; the
/// caller decides what a non-zero error count means.
pub async fn run_crawl(
    configs: &[SourceConfig],
    deps: &Collaborators<'_>,
    opts: &CrawlOptions,
) -> RunSummary {
    let mut summary = RunSummary::default();
    let mut all_records: Vec<ExamRecord> = Vec::new();

    let recipients = load_recipients(deps.store, opts).await;

    for config in configs {
        info!(source = %config.name, "running source");

        let session = match Session::new(opts.session.clone()) {
            Ok(session) => session,
            Err(e) => {
                error!(source = %config.name, error = %e, "could not build session");
                summary.stats.errors += 1;
                continue;
            }
        };

        // The session is owned by this source for the duration of the run
        // and dropped at the end of the loop body, success or not.
        let report = run_source(&session, deps.renderer, config).await;
        summary.stats.scraped += report.records.len();

        for record in &report.records {
            if !record.is_valid() {
                debug!(source = %config.name, "skipping incomplete record");
                continue;
            }
            all_records.push(record.clone());

            if opts.dry_run {
                info!(exam = %record.exam_name, "[dry-run] would upsert");
                continue;
            }

            match deps.store.upsert(record).await {
                Ok(outcome) if outcome.is_new => {
                    summary.stats.new += 1;
                    info!(exam = %record.exam_name, id = %outcome.id, "new exam saved");
                    if opts.notify && !recipients.is_empty() {
                        let sent = deps.notifier.notify(record, &recipients).await;
                        summary.stats.notified += sent;
                        info!(
                            exam = %record.exam_name,
                            sent,
                            total = recipients.len(),
                            "notifications sent"
                        );
                    }
                }
                Ok(outcome) => {
                    summary.stats.updated += 1;
                    debug!(exam = %record.exam_name, id = %outcome.id, "updated existing exam");
                }
                Err(e) => {
                    summary.stats.errors += 1;
                    error!(exam = %record.exam_name, error = %e, "upsert failed");
                }
            }
        }

        summary.reports.push(report);
    }

    info!(
        scraped = summary.stats.scraped,
        new = summary.stats.new,
        updated = summary.stats.updated,
        errors = summary.stats.errors,
        notified = summary.stats.notified,
        "run finished"
    );

    if !opts.dry_run {
        let sources: Vec<String> = configs.iter().map(|c| c.name.clone()).collect();
        let error_log = if summary.stats.errors == 0 {
            String::new()
        } else {
            format!("{} error(s) during run", summary.stats.errors)
        };
        push_results(
            opts.webhook.as_ref(),
            &sources,
            &all_records,
            &summary.stats,
            &error_log,
        )
        .await;
    }

    summary
}

async fn load_recipients(store: &dyn ExamStore, opts: &CrawlOptions) -> Vec<Recipient> {
    if !opts.notify || opts.dry_run {
        return Vec::new();
    }
    match store.recipients().await {
        Ok(recipients) => {
            info!(count = recipients.len(), "loaded notification recipients");
            recipients
        }
        Err(e) => {
            warn!(error = %e, "could not load recipients");
            Vec::new()
        }
    }
}
