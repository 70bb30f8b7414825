// ABOUTME: The shared site-extraction skeleton: listing fetch, candidate enrichment, dedup, report.
// ABOUTME: One function runs every source; failures stay isolated per page and per candidate.

use std::collections::HashSet;

use scraper::Html;
use tracing::{debug, info, warn};

use examhub_extract::{
    build_record, calendar_rows, collect_anchors, extract_dates, filter_candidates,
    first_pdf_link, parse_date, resolve_metadata, visible_text, DateFields, ExamRecord,
    FilterOutcome, FilterPolicy, LinkCandidate, RecordContext, RecordDraft, Rejection,
};

use crate::session::{Renderer, Session};
use crate::source::{PageLayout, SourceConfig};

/// Calendar-table cells are capped at this many characters.
const CELL_CAP: usize = 200;

/// What happened to a candidate's detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    /// The candidate linked straight to a PDF; no detail fetch attempted.
    DirectPdf,
    /// Detail page fetched and mined for dates and a notification PDF.
    Fetched,
    /// Detail fetch failed; the record was still emitted without dates.
    FetchFailed,
}

/// A listing page that could not be fetched. Isolated; never fails the run.
#[derive(Debug, Clone)]
pub struct PageFailure {
    pub url: String,
    pub error: String,
}

/// A candidate whose detail page could not be fetched.
#[derive(Debug, Clone)]
pub struct DetailFailure {
    pub title: String,
    pub url: String,
    pub error: String,
}

/// How each candidate was processed, in extraction order.
#[derive(Debug, Clone)]
pub struct CandidateOutcome {
    pub title: String,
    pub url: String,
    pub detail: DetailOutcome,
}

/// Everything one source run produced: records plus the structured reasons
/// for whatever was skipped. The contract is "return whatever could be
/// extracted"; content-level problems never surface as errors.
#[derive(Debug, Default)]
pub struct SourceReport {
    pub source: String,
    pub records: Vec<ExamRecord>,
    pub candidates: Vec<CandidateOutcome>,
    pub rejections: Vec<Rejection>,
    pub page_failures: Vec<PageFailure>,
    pub detail_failures: Vec<DetailFailure>,
}

/// Runs the extraction strategy for one source: every configured listing page
/// independently, each candidate enriched from its detail page, the whole run
/// deduplicated by exam name (case-insensitive, first occurrence wins).
pub async fn run_source(
    session: &Session,
    renderer: Option<&dyn Renderer>,
    config: &SourceConfig,
) -> SourceReport {
    let mut report = SourceReport {
        source: config.name.clone(),
        ..Default::default()
    };
    let mut seen_names: HashSet<String> = HashSet::new();
    let mut any_listing_ok = false;

    for listing in &config.listing_pages {
        let html = match session.get_text(&listing.url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(source = %config.name, url = %listing.url, error = %e, "listing page fetch failed");
                report.page_failures.push(PageFailure {
                    url: listing.url.clone(),
                    error: e.to_string(),
                });
                continue;
            }
        };
        any_listing_ok = true;

        match listing.layout {
            PageLayout::AnchorList => {
                let outcome = listing_candidates(&html, config);
                report.rejections.extend(outcome.rejections);
                for candidate in outcome.candidates {
                    extract_candidate(session, config, &candidate, &mut seen_names, &mut report)
                        .await;
                }
            }
            PageLayout::CalendarTable => {
                for record in table_records(&html, config) {
                    push_deduped(record, &mut seen_names, &mut report);
                }
            }
        }
    }

    // Static fetching got nowhere; fall back to a rendered page when the
    // source names one and a renderer was supplied.
    if !any_listing_ok {
        if let (Some(fallback), Some(renderer)) = (&config.render_fallback, renderer) {
            info!(source = %config.name, url = %fallback.url, "falling back to rendered page");
            match renderer.render(&fallback.url, fallback.wait_for.as_deref()).await {
                Ok(html) => {
                    let outcome = listing_candidates(&html, config);
                    report.rejections.extend(outcome.rejections);
                    for candidate in outcome.candidates {
                        extract_candidate(session, config, &candidate, &mut seen_names, &mut report)
                            .await;
                    }
                }
                Err(e) => {
                    warn!(source = %config.name, error = %e, "render fallback failed");
                    report.page_failures.push(PageFailure {
                        url: fallback.url.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    info!(source = %config.name, records = report.records.len(), "source extraction finished");
    report
}

/// Turns one candidate link into a record, fetching its detail page for dates
/// and a notification PDF when it is not already a direct document link.
/// Detail failures are swallowed into the report; the candidate still yields
/// a record.
async fn extract_candidate(
    session: &Session,
    config: &SourceConfig,
    candidate: &LinkCandidate,
    seen_names: &mut HashSet<String>,
    report: &mut SourceReport,
) {
    let mut dates = DateFields::default();
    let mut pdf_url = candidate.is_pdf.then(|| candidate.url.clone());
    let mut outcome = DetailOutcome::DirectPdf;

    if !candidate.is_pdf {
        match session.get_text(&candidate.url).await {
            Ok(html) => {
                let (found_dates, found_pdf) = parse_detail(&html, &config.base_url);
                dates = found_dates;
                pdf_url = found_pdf;
                outcome = DetailOutcome::Fetched;
            }
            Err(e) => {
                debug!(url = %candidate.url, error = %e, "detail page fetch failed");
                report.detail_failures.push(DetailFailure {
                    title: candidate.title.clone(),
                    url: candidate.url.clone(),
                    error: e.to_string(),
                });
                outcome = DetailOutcome::FetchFailed;
            }
        }
    }
    report.candidates.push(CandidateOutcome {
        title: candidate.title.clone(),
        url: candidate.url.clone(),
        detail: outcome,
    });

    // A PDF link cannot serve as the official website; the site base does.
    let official_website = if candidate.is_pdf {
        config.base_url.clone()
    } else {
        candidate.url.clone()
    };

    let meta = resolve_metadata(
        &candidate.title,
        &config.metadata,
        config.default_metadata.as_ref(),
    );
    let description = config.describe(meta.description.clone(), &candidate.title);
    let exam_name = config.name_style.apply(&candidate.title, &config.name);

    let record = build_record(
        RecordDraft {
            exam_name,
            official_website,
            notification_pdf: pdf_url,
            description,
            eligibility: meta.eligibility.unwrap_or_default(),
            qualification: meta.qualification.unwrap_or_default(),
            age_limit: meta.age_limit.unwrap_or_default(),
            application_fee: meta.application_fee.unwrap_or_default(),
            selection_process: meta.selection_process.unwrap_or_default(),
            dates,
        },
        &record_context(config),
    );

    push_deduped(record, seen_names, report);
}

/// Anchor-list listing: collect, filter, done. Pure and synchronous so no
/// parsed DOM ever crosses an await point.
fn listing_candidates(html: &str, config: &SourceConfig) -> FilterOutcome {
    let doc = Html::parse_document(html);
    let anchors = collect_anchors(&doc);
    filter_candidates(
        &anchors,
        &FilterPolicy {
            base_url: &config.base_url,
            relevance: &config.relevance,
            min_title_len: config.min_title_len,
            max_anchors: config.max_anchors,
        },
    )
}

/// Calendar-table listing: each data row becomes a record. The exam name is
/// the first non-empty of the first two cells; the first parseable date in
/// any cell becomes the application deadline.
fn table_records(html: &str, config: &SourceConfig) -> Vec<ExamRecord> {
    let doc = Html::parse_document(html);
    let mut records = Vec::new();

    for cells in calendar_rows(&doc, CELL_CAP) {
        if cells.len() < 3 {
            continue;
        }
        let name = cells
            .iter()
            .take(2)
            .find(|c| !c.is_empty())
            .cloned()
            .unwrap_or_default();
        if name.is_empty() {
            continue;
        }

        let mut dates = DateFields::default();
        for cell in &cells {
            if let Some(date) = parse_date(cell) {
                dates.application_last_date.get_or_insert(date);
            }
        }

        let meta = resolve_metadata(&name, &config.metadata, config.default_metadata.as_ref());
        let description = config.describe(meta.description.clone(), &name);
        let exam_name = config.name_style.apply(&name, &config.name);

        records.push(build_record(
            RecordDraft {
                exam_name,
                official_website: config.base_url.clone(),
                notification_pdf: None,
                description,
                eligibility: meta.eligibility.unwrap_or_default(),
                qualification: meta.qualification.unwrap_or_default(),
                age_limit: meta.age_limit.unwrap_or_default(),
                application_fee: meta.application_fee.unwrap_or_default(),
                selection_process: meta.selection_process.unwrap_or_default(),
                dates,
            },
            &record_context(config),
        ));
    }

    records
}

/// Detail page: dates from the visible text, first PDF link resolved against
/// the source base.
fn parse_detail(html: &str, base_url: &str) -> (DateFields, Option<String>) {
    let doc = Html::parse_document(html);
    let dates = extract_dates(&visible_text(&doc));
    let pdf = first_pdf_link(&doc, base_url);
    (dates, pdf)
}

fn record_context(config: &SourceConfig) -> RecordContext<'_> {
    RecordContext {
        organization: &config.organization,
        level: config.level,
        state: config.state.as_deref(),
    }
}

/// Appends a record unless invalid or its exam name was already seen this
/// run. First occurrence wins.
fn push_deduped(record: ExamRecord, seen_names: &mut HashSet<String>, report: &mut SourceReport) {
    if !record.is_valid() {
        debug!(source = %report.source, "dropping incomplete record");
        return;
    }
    if seen_names.insert(record.exam_name.to_lowercase()) {
        report.records.push(record);
    }
}
