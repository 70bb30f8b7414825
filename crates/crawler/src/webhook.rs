// ABOUTME: Post-run webhook push: sources run, extracted records, aggregate counters.
// ABOUTME: Skipped without a secret, logged on failure, never fatal to the run.

use std::time::Duration;

use serde::Serialize;
use tracing::{error, info, warn};

use examhub_extract::ExamRecord;

use crate::error::CrawlError;

/// Aggregate counters for one orchestration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub scraped: usize,
    pub new: usize,
    pub updated: usize,
    pub errors: usize,
    pub notified: usize,
}

/// Where and how to deliver the post-run report.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: String,
    /// Bearer secret the receiving endpoint requires. Empty disables the push.
    pub secret: String,
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    scrapers: &'a [String],
    exams: &'a [ExamRecord],
    stats: &'a RunStats,
    error_log: &'a str,
}

/// Pushes the run report to the configured webhook. Returns true on a
/// successful delivery; a missing config or secret skips the push with a
/// warning and any failure is logged rather than propagated.
pub async fn push_results(
    config: Option<&WebhookConfig>,
    sources: &[String],
    exams: &[ExamRecord],
    stats: &RunStats,
    error_log: &str,
) -> bool {
    let config = match config {
        Some(c) if !c.secret.is_empty() => c,
        _ => {
            warn!("webhook secret not configured; skipping push");
            return false;
        }
    };

    let payload = WebhookPayload {
        scrapers: sources,
        exams,
        stats,
        error_log,
    };

    match deliver(config, &payload).await {
        Ok(()) => {
            info!(url = %config.url, new = stats.new, updated = stats.updated, "webhook push ok");
            true
        }
        Err(e) => {
            error!(url = %config.url, error = %e, "webhook push failed");
            false
        }
    }
}

async fn deliver(config: &WebhookConfig, payload: &WebhookPayload<'_>) -> Result<(), CrawlError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| CrawlError::webhook(&config.url, "Push", Some(anyhow::anyhow!(e))))?;

    let response = client
        .post(&config.url)
        .bearer_auth(&config.secret)
        .json(payload)
        .send()
        .await
        .map_err(|e| CrawlError::webhook(&config.url, "Push", Some(anyhow::anyhow!(e))))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let snippet: String = body.chars().take(500).collect();
        return Err(CrawlError::webhook(
            &config.url,
            "Push",
            Some(anyhow::anyhow!("HTTP status {}: {}", status.as_u16(), snippet)),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn stats_serialize_with_the_receiving_endpoints_counter_names() {
        let stats = RunStats {
            scraped: 3,
            new: 1,
            updated: 2,
            errors: 0,
            notified: 4,
        };
        let value = serde_json::to_value(stats).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"scraped": 3, "new": 1, "updated": 2, "errors": 0, "notified": 4})
        );
    }

    #[tokio::test]
    async fn skips_without_secret() {
        let pushed = push_results(None, &[], &[], &RunStats::default(), "").await;
        assert!(!pushed);

        let config = WebhookConfig {
            url: "https://example.com/webhook".to_string(),
            secret: String::new(),
        };
        let pushed = push_results(Some(&config), &[], &[], &RunStats::default(), "").await;
        assert!(!pushed);
    }

    #[tokio::test]
    async fn posts_payload_with_bearer_secret() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/crawler/webhook")
                .header("authorization", "Bearer s3cret")
                .header("content-type", "application/json");
            then.status(200).json_body(serde_json::json!({"run_id": "r1"}));
        });

        let config = WebhookConfig {
            url: server.url("/api/crawler/webhook"),
            secret: "s3cret".to_string(),
        };
        let stats = RunStats {
            scraped: 3,
            new: 1,
            updated: 2,
            errors: 0,
            notified: 0,
        };
        let pushed =
            push_results(Some(&config), &["UPSC".to_string()], &[], &stats, "").await;
        mock.assert();
        assert!(pushed);
    }

    #[tokio::test]
    async fn failure_reports_false() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/hook");
            then.status(500);
        });

        let config = WebhookConfig {
            url: server.url("/hook"),
            secret: "s3cret".to_string(),
        };
        let pushed = push_results(Some(&config), &[], &[], &RunStats::default(), "").await;
        assert!(!pushed);
    }
}
