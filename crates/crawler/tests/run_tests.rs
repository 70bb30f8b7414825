// ABOUTME: Integration tests for the run orchestrator: isolation, counters, notify, dry-run, webhook.
// ABOUTME: Uses mocked listings, the in-memory store, and the log notifier.

use httpmock::prelude::*;
use regex::Regex;

use examhub_crawler::{
    run_crawl, Collaborators, CrawlOptions, ListingPage, LogNotifier, MemoryStore, NameStyle,
    Recipient, SessionOptions, SourceConfig, WebhookConfig,
};
use examhub_extract::{ExamLevel, ExamStatus, MetadataTable};

fn config(name: &str, server: &MockServer, listing_path: &str) -> SourceConfig {
    SourceConfig {
        name: name.to_string(),
        organization: format!("{} Commission", name),
        level: ExamLevel::Central,
        state: None,
        base_url: server.base_url(),
        listing_pages: vec![ListingPage::anchors(server.url(listing_path))],
        relevance: Regex::new(r"(?i)exam|notice").unwrap(),
        min_title_len: 0,
        max_anchors: 0,
        metadata: MetadataTable::default(),
        default_metadata: None,
        name_style: NameStyle::Verbatim,
        fallback_description: None,
        render_fallback: None,
    }
}

fn options() -> CrawlOptions {
    CrawlOptions {
        dry_run: false,
        notify: false,
        session: SessionOptions::immediate(),
        webhook: None,
    }
}

fn mock_listing(server: &MockServer, path: &str, body: &str) {
    let owned = body.to_string();
    let owned_path = path.to_string();
    server.mock(move |when, then| {
        when.method(GET).path(owned_path.clone());
        then.status(200)
            .header("content-type", "text/html")
            .body(owned.clone());
    });
}

#[tokio::test]
async fn one_failing_source_never_aborts_the_others() {
    let server = MockServer::start();
    mock_listing(
        &server,
        "/a",
        r#"<a href="/docs/a.pdf">Alpha Exam 2026 Notice</a>"#,
    );
    server.mock(|when, then| {
        when.method(GET).path("/b");
        then.status(500);
    });
    mock_listing(
        &server,
        "/c",
        r#"<a href="/docs/c.pdf">Gamma Exam 2026 Notice</a>"#,
    );

    let configs = vec![
        config("ALPHA", &server, "/a"),
        config("BETA", &server, "/b"),
        config("GAMMA", &server, "/c"),
    ];

    let store = MemoryStore::new();
    let notifier = LogNotifier;
    let summary = run_crawl(
        &configs,
        &Collaborators {
            store: &store,
            notifier: &notifier,
            renderer: None,
        },
        &options(),
    )
    .await;

    // Sources before and after the failing one both contributed.
    assert_eq!(summary.stats.scraped, 2);
    assert_eq!(summary.stats.new, 2);
    assert_eq!(store.len(), 2);
    assert_eq!(summary.reports.len(), 3);
    assert_eq!(summary.reports[1].page_failures.len(), 1);
    assert!(summary.reports[1].records.is_empty());

    let names: Vec<String> = store.records().iter().map(|r| r.exam_name.clone()).collect();
    assert_eq!(names, vec!["Alpha Exam 2026 Notice", "Gamma Exam 2026 Notice"]);
}

#[tokio::test]
async fn repeat_runs_update_instead_of_duplicating() {
    let server = MockServer::start();
    mock_listing(
        &server,
        "/a",
        r#"<a href="/docs/a.pdf">Alpha Exam 2026 Notice</a>"#,
    );
    let configs = vec![config("ALPHA", &server, "/a")];

    let store = MemoryStore::new();
    let notifier = LogNotifier;
    let deps = Collaborators {
        store: &store,
        notifier: &notifier,
        renderer: None,
    };

    let first = run_crawl(&configs, &deps, &options()).await;
    assert_eq!(first.stats.new, 1);
    assert_eq!(first.stats.updated, 0);

    let second = run_crawl(&configs, &deps, &options()).await;
    assert_eq!(second.stats.new, 0);
    assert_eq!(second.stats.updated, 1);
    assert_eq!(store.len(), 1);
    // The store filled in a status on write; the pipeline never set one.
    assert_eq!(store.records()[0].status, Some(ExamStatus::Open));
}

#[tokio::test]
async fn notify_counts_successful_sends_for_new_exams_only() {
    let server = MockServer::start();
    mock_listing(
        &server,
        "/a",
        r#"<a href="/docs/a.pdf">Alpha Exam 2026 Notice</a>"#,
    );
    let configs = vec![config("ALPHA", &server, "/a")];

    let store = MemoryStore::with_recipients(vec![
        Recipient {
            email: "one@example.com".to_string(),
            full_name: Some("One".to_string()),
        },
        Recipient {
            email: "two@example.com".to_string(),
            full_name: None,
        },
    ]);
    let notifier = LogNotifier;
    let deps = Collaborators {
        store: &store,
        notifier: &notifier,
        renderer: None,
    };

    let mut opts = options();
    opts.notify = true;

    let first = run_crawl(&configs, &deps, &opts).await;
    assert_eq!(first.stats.notified, 2);

    // Second run: the exam is an update, nobody is notified again.
    let second = run_crawl(&configs, &deps, &opts).await;
    assert_eq!(second.stats.notified, 0);
}

#[tokio::test]
async fn dry_run_extracts_but_persists_nothing() {
    let server = MockServer::start();
    mock_listing(
        &server,
        "/a",
        r#"<a href="/docs/a.pdf">Alpha Exam 2026 Notice</a>"#,
    );
    let webhook_mock = server.mock(|when, then| {
        when.method(POST).path("/hook");
        then.status(200);
    });

    let configs = vec![config("ALPHA", &server, "/a")];
    let store = MemoryStore::new();
    let notifier = LogNotifier;

    let opts = CrawlOptions {
        dry_run: true,
        notify: true,
        session: SessionOptions::immediate(),
        webhook: Some(WebhookConfig {
            url: server.url("/hook"),
            secret: "s3cret".to_string(),
        }),
    };

    let summary = run_crawl(
        &configs,
        &Collaborators {
            store: &store,
            notifier: &notifier,
            renderer: None,
        },
        &opts,
    )
    .await;

    assert_eq!(summary.stats.scraped, 1);
    assert_eq!(summary.stats.new, 0);
    assert_eq!(summary.stats.notified, 0);
    assert!(store.is_empty());
    assert_eq!(webhook_mock.calls(), 0);
}

#[tokio::test]
async fn webhook_receives_the_run_report() {
    let server = MockServer::start();
    mock_listing(
        &server,
        "/a",
        r#"<a href="/docs/a.pdf">Alpha Exam 2026 Notice</a>"#,
    );
    let webhook_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/hook")
            .header("authorization", "Bearer s3cret");
        then.status(200);
    });

    let configs = vec![config("ALPHA", &server, "/a")];
    let store = MemoryStore::new();
    let notifier = LogNotifier;

    let mut opts = options();
    opts.webhook = Some(WebhookConfig {
        url: server.url("/hook"),
        secret: "s3cret".to_string(),
    });

    run_crawl(
        &configs,
        &Collaborators {
            store: &store,
            notifier: &notifier,
            renderer: None,
        },
        &opts,
    )
    .await;

    webhook_mock.assert();
}
