// ABOUTME: Source configuration: everything that distinguishes one exam site from another.
// ABOUTME: A source is data (URLs, relevance pattern, templates, naming policy) driving one shared strategy.

use regex::Regex;

use examhub_extract::{ExamLevel, MetadataTable, MetadataTemplate};

/// How a listing page lays out its notices; the shared strategy dispatches on
/// this instead of per-site code paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLayout {
    /// Notices are anchor links scattered over the page.
    AnchorList,
    /// Notices are rows of the page's first table (exam calendar style).
    CalendarTable,
}

/// One listing endpoint of a source.
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub url: String,
    pub layout: PageLayout,
}

impl ListingPage {
    pub fn anchors(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            layout: PageLayout::AnchorList,
        }
    }

    pub fn calendar(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            layout: PageLayout::CalendarTable,
        }
    }
}

/// How a candidate title becomes the final exam name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStyle {
    /// Use the cleaned title as-is.
    Verbatim,
    /// Prepend the source abbreviation unless the title already contains it.
    EnsurePrefix,
    /// Strip the abbreviation from the title, title-case the rest, and
    /// prepend the abbreviation.
    PrefixTitleCase,
}

impl NameStyle {
    pub fn apply(&self, title: &str, abbreviation: &str) -> String {
        match self {
            NameStyle::Verbatim => title.to_string(),
            NameStyle::EnsurePrefix => {
                if title.to_lowercase().contains(&abbreviation.to_lowercase()) {
                    title.to_string()
                } else {
                    format!("{} {}", abbreviation, title)
                }
            }
            NameStyle::PrefixTitleCase => {
                let stripped = strip_ignore_case(title, abbreviation);
                format!("{} {}", abbreviation, title_case(stripped.trim()))
            }
        }
    }
}

/// Rendered-page fallback used when every static listing fetch failed.
#[derive(Debug, Clone)]
pub struct RenderFallback {
    pub url: String,
    pub wait_for: Option<String>,
}

/// The full extraction configuration for one exam-publishing website.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Short display name, also the `--sources` selection key ("UPSC").
    pub name: String,
    pub organization: String,
    pub level: ExamLevel,
    pub state: Option<String>,
    pub base_url: String,
    pub listing_pages: Vec<ListingPage>,
    /// Case-insensitive pattern a candidate's href + title must match.
    pub relevance: Regex,
    /// Titles shorter than this are skipped. 0 disables the check.
    pub min_title_len: usize,
    /// Anchors scanned per listing page. 0 means no cap.
    pub max_anchors: usize,
    pub metadata: MetadataTable,
    pub default_metadata: Option<MetadataTemplate>,
    pub name_style: NameStyle,
    /// Description used when no template provides one; `{title}` is replaced
    /// with the candidate title.
    pub fallback_description: Option<String>,
    pub render_fallback: Option<RenderFallback>,
}

impl SourceConfig {
    /// Description for a candidate: template text first, then the source's
    /// fallback with the title substituted in.
    pub fn describe(&self, template_description: Option<String>, title: &str) -> String {
        if let Some(desc) = template_description {
            return desc;
        }
        self.fallback_description
            .as_ref()
            .map(|tpl| tpl.replace("{title}", title))
            .unwrap_or_default()
    }
}

/// Removes every case-insensitive occurrence of `needle` from `text`.
fn strip_ignore_case(text: &str, needle: &str) -> String {
    let low_text = text.to_lowercase();
    let low_needle = needle.to_lowercase();
    if low_needle.is_empty() {
        return text.to_string();
    }
    // Byte offsets below assume lowercasing preserved lengths; when it did
    // not (rare non-ASCII titles), settle for exact-case removal.
    if low_text.len() != text.len() {
        return text.replace(needle, "");
    }

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(found) = low_text[pos..].find(&low_needle) {
        let start = pos + found;
        out.push_str(&text[pos..start]);
        pos = start + low_needle.len();
    }
    out.push_str(&text[pos..]);
    out
}

/// Title-cases a phrase, keeping common stop words lowercase except in first
/// position.
fn title_case(s: &str) -> String {
    const STOP: [&str; 8] = ["of", "for", "and", "in", "the", "a", "an", "to"];
    s.split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            let low = word.to_lowercase();
            if i > 0 && STOP.contains(&low.as_str()) {
                low
            } else {
                capitalize(&low)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
