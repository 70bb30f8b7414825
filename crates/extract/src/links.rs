// ABOUTME: Link candidate filtering: relevance matching, URL resolution, PDF tagging, title dedup.
// ABOUTME: Every rejected anchor is reported with a structured reason instead of being dropped silently.

use std::collections::HashSet;

use regex::Regex;

use crate::text::clean;

/// Cleaned anchor titles are capped at this many characters.
pub const TITLE_CAP: usize = 300;

/// A raw anchor element pulled off a page: visible text plus href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub text: String,
    pub href: String,
}

impl Anchor {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// An anchor that survived filtering: cleaned title, absolute URL, PDF flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    pub title: String,
    pub url: String,
    pub is_pdf: bool,
}

/// Why an anchor was rejected by the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyTitle,
    TitleTooShort,
    Duplicate,
    NotRelevant,
}

/// A rejected anchor together with the reason, so callers and tests can
/// assert on why something was excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub title: String,
    pub reason: RejectReason,
}

/// Filtering rules for one listing page.
#[derive(Debug)]
pub struct FilterPolicy<'a> {
    pub base_url: &'a str,
    pub relevance: &'a Regex,
    /// Titles shorter than this (in chars) are rejected. 0 disables the check.
    pub min_title_len: usize,
    /// Only the first N anchors of the page are considered. 0 means no cap.
    pub max_anchors: usize,
}

/// Candidates accepted and anchors rejected, both in document order.
#[derive(Debug, Default)]
pub struct FilterOutcome {
    pub candidates: Vec<LinkCandidate>,
    pub rejections: Vec<Rejection>,
}

/// Selects the anchors worth extracting from a listing page.
///
/// Per anchor: the text is cleaned and capped; empty, too-short and
/// already-seen titles are rejected (dedup is case-sensitive on the cleaned
/// title, first occurrence wins); anchors whose combined href + title does
/// not match the relevance pattern are rejected. The relevance check uses the
/// href as written on the page: the resolved URL would make any pattern
/// containing the site's own abbreviation match every same-site link. Hrefs
/// ending in `.pdf` (case-insensitive) are tagged as direct document links.
pub fn filter_candidates(anchors: &[Anchor], policy: &FilterPolicy) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();
    let mut seen: HashSet<String> = HashSet::new();

    let scan = if policy.max_anchors > 0 {
        &anchors[..anchors.len().min(policy.max_anchors)]
    } else {
        anchors
    };

    for anchor in scan {
        let title = clean(&anchor.text, TITLE_CAP);
        if title.is_empty() {
            outcome.rejections.push(Rejection {
                title,
                reason: RejectReason::EmptyTitle,
            });
            continue;
        }
        if policy.min_title_len > 0 && title.chars().count() < policy.min_title_len {
            outcome.rejections.push(Rejection {
                title,
                reason: RejectReason::TitleTooShort,
            });
            continue;
        }
        if !seen.insert(title.clone()) {
            outcome.rejections.push(Rejection {
                title,
                reason: RejectReason::Duplicate,
            });
            continue;
        }

        let combined = format!("{}{}", anchor.href, title);
        if !policy.relevance.is_match(&combined) {
            outcome.rejections.push(Rejection {
                title,
                reason: RejectReason::NotRelevant,
            });
            continue;
        }

        let url = resolve_href(policy.base_url, &anchor.href);
        let is_pdf = is_pdf_href(&url);
        outcome.candidates.push(LinkCandidate { title, url, is_pdf });
    }

    outcome
}

/// Resolves an href to absolute form. Scheme-qualified hrefs pass through
/// unchanged; anything else is prefixed with the base URL, joined with exactly
/// one slash regardless of existing leading/trailing slashes.
pub fn resolve_href(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}

/// True when the URL points directly at a PDF document.
pub fn is_pdf_href(href: &str) -> bool {
    href.to_lowercase().ends_with(".pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use pretty_assertions::assert_eq;

    static SSC_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)ssc|cgl").unwrap());

    fn policy<'a>(relevance: &'a Regex) -> FilterPolicy<'a> {
        FilterPolicy {
            base_url: "https://ssc.nic.in",
            relevance,
            min_title_len: 0,
            max_anchors: 0,
        }
    }

    #[test]
    fn dedup_and_relevance() {
        let anchors = [
            Anchor::new("SSC CGL 2026", "/notice/1"),
            Anchor::new("SSC CGL 2026", "/notice/2"),
            Anchor::new("Contact Us", "/contact"),
        ];
        let outcome = filter_candidates(&anchors, &policy(&SSC_PATTERN));

        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].title, "SSC CGL 2026");
        assert_eq!(outcome.candidates[0].url, "https://ssc.nic.in/notice/1");

        let reasons: Vec<RejectReason> = outcome.rejections.iter().map(|r| r.reason).collect();
        assert_eq!(
            reasons,
            vec![RejectReason::Duplicate, RejectReason::NotRelevant]
        );
    }

    #[test]
    fn resolves_relative_hrefs_with_single_slash() {
        assert_eq!(
            resolve_href("https://ssc.nic.in", "portal/x.pdf"),
            "https://ssc.nic.in/portal/x.pdf"
        );
        assert_eq!(
            resolve_href("https://ssc.nic.in/", "/portal/x.pdf"),
            "https://ssc.nic.in/portal/x.pdf"
        );
        assert_eq!(
            resolve_href("https://ssc.nic.in", "https://other.gov.in/a.pdf"),
            "https://other.gov.in/a.pdf"
        );
    }

    #[test]
    fn pdf_hrefs_are_tagged() {
        let anchors = [
            Anchor::new("SSC CGL Notification", "/docs/cgl.PDF"),
            Anchor::new("SSC CGL Apply Online", "/apply/cgl"),
        ];
        let outcome = filter_candidates(&anchors, &policy(&SSC_PATTERN));
        assert_eq!(outcome.candidates.len(), 2);
        assert!(outcome.candidates[0].is_pdf);
        assert!(!outcome.candidates[1].is_pdf);
    }

    #[test]
    fn relevance_can_match_the_url_alone() {
        let anchors = [Anchor::new("Notification No. 12", "/exams/cgl/notice")];
        let outcome = filter_candidates(&anchors, &policy(&SSC_PATTERN));
        assert_eq!(outcome.candidates.len(), 1);
    }

    #[test]
    fn empty_and_short_titles_are_rejected() {
        let relevance = Regex::new(r"(?i).").unwrap();
        let anchors = [Anchor::new("   ", "/a"), Anchor::new("Advt", "/b")];
        let p = FilterPolicy {
            base_url: "https://uppsc.up.nic.in",
            relevance: &relevance,
            min_title_len: 8,
            max_anchors: 0,
        };
        let outcome = filter_candidates(&anchors, &p);
        assert!(outcome.candidates.is_empty());
        assert_eq!(outcome.rejections[0].reason, RejectReason::EmptyTitle);
        assert_eq!(outcome.rejections[1].reason, RejectReason::TitleTooShort);
    }

    #[test]
    fn anchor_cap_limits_the_scan() {
        let anchors = [
            Anchor::new("SSC CGL first", "/1"),
            Anchor::new("SSC CGL second", "/2"),
            Anchor::new("SSC CGL third", "/3"),
        ];
        let mut p = policy(&SSC_PATTERN);
        p.max_anchors = 2;
        let outcome = filter_candidates(&anchors, &p);
        assert_eq!(outcome.candidates.len(), 2);
    }

    #[test]
    fn long_titles_are_capped() {
        let long = "SSC CGL ".repeat(60);
        let anchors = [Anchor::new(long, "/notice")];
        let outcome = filter_candidates(&anchors, &policy(&SSC_PATTERN));
        assert!(outcome.candidates[0].title.chars().count() <= TITLE_CAP + 1);
    }
}
