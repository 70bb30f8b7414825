// ABOUTME: Crawl engine for examhub: fetch sessions, source configs, the shared strategy, collaborators.
// ABOUTME: Re-exports the public API used by the CLI and by embedding applications.

//! examhub-crawler - fetches exam notification pages and runs the extraction
//! pipeline over the built-in government exam sources.
//!
//! The crate is organized around one shared strategy function
//! ([`strategy::run_source`]) parameterized by a [`SourceConfig`]: sources
//! are data, not types. Fetching is polite by construction: sequential
//! sources, a fixed delay after every request, and bounded fixed-interval
//! retries. Collaborators (storage, notifications, webhook, rendering) sit
//! behind explicit seams and are constructed once per run by the caller.

pub mod error;
pub mod notify;
pub mod run;
pub mod session;
pub mod source;
pub mod sources;
pub mod store;
pub mod strategy;
pub mod webhook;

pub use crate::error::{CrawlError, ErrorCode};
pub use crate::notify::{notification_html, notification_subject, LogNotifier, Notifier};
pub use crate::run::{run_crawl, Collaborators, CrawlOptions, RunSummary};
pub use crate::session::{Renderer, Session, SessionOptions};
pub use crate::source::{ListingPage, NameStyle, PageLayout, RenderFallback, SourceConfig};
pub use crate::sources::{builtin_sources, select_sources};
pub use crate::store::{infer_status, ExamStore, MemoryStore, Recipient, RestStore, UpsertOutcome};
pub use crate::strategy::{
    run_source, CandidateOutcome, DetailFailure, DetailOutcome, PageFailure, SourceReport,
};
pub use crate::webhook::{push_results, RunStats, WebhookConfig};
