// ABOUTME: Core extraction library for examhub: text, dates, links, metadata, records.
// ABOUTME: Pure functions over strings and parsed HTML; no network I/O lives here.

//! examhub-extract - the text-to-structured-record extraction pipeline.
//!
//! This crate turns scraped notification pages into canonical [`ExamRecord`]
//! values: normalizing free text, parsing messy dates with day-first
//! preference, selecting relevant notification links, matching titles against
//! per-source metadata templates, and assembling the result with fixed field
//! caps. Everything here is deterministic and side-effect-free; fetching and
//! persistence live in `examhub-crawler`.

pub mod dates;
pub mod links;
pub mod meta;
pub mod page;
pub mod record;
pub mod text;

pub use dates::{extract_dates, parse_date, DateFields};
pub use links::{
    filter_candidates, is_pdf_href, resolve_href, Anchor, FilterOutcome, FilterPolicy,
    LinkCandidate, RejectReason, Rejection,
};
pub use meta::{resolve_metadata, MetadataTable, MetadataTemplate};
pub use page::{calendar_rows, collect_anchors, first_pdf_link, visible_text};
pub use record::{build_record, ExamLevel, ExamRecord, ExamStatus, RecordContext, RecordDraft};
pub use text::clean;
