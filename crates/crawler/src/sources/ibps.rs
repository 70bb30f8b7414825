// ABOUTME: IBPS source configuration: home-page notices with a rendered-page fallback.
// ABOUTME: IBPS loads most content via JavaScript, so the careers page is rendered when static fetching fails.

use regex::Regex;

use examhub_extract::{ExamLevel, MetadataTable, MetadataTemplate};

use crate::source::{ListingPage, NameStyle, RenderFallback, SourceConfig};

pub fn source() -> SourceConfig {
    SourceConfig {
        name: "IBPS".to_string(),
        organization: "Institute of Banking Personnel Selection (IBPS)".to_string(),
        level: ExamLevel::Central,
        state: None,
        base_url: "https://www.ibps.in".to_string(),
        listing_pages: vec![ListingPage::anchors("https://www.ibps.in")],
        relevance: Regex::new(r"(?i)\bibps\b|crp|rrb|clerk|po\b|specialist").unwrap(),
        min_title_len: 0,
        max_anchors: 0,
        metadata: metadata(),
        default_metadata: None,
        name_style: NameStyle::Verbatim,
        fallback_description: None,
        render_fallback: Some(RenderFallback {
            url: "https://www.ibps.in/careers".to_string(),
            wait_for: Some("a".to_string()),
        }),
    }
}

fn metadata() -> MetadataTable {
    MetadataTable::new(vec![
        (
            "po",
            MetadataTemplate {
                description: Some(
                    "IBPS PO for Probationary Officers in participating Public Sector Banks."
                        .to_string(),
                ),
                eligibility: Some("Graduate in any discipline, age 20–30 years.".to_string()),
                qualification: Some("Any Graduate from a Recognised University".to_string()),
                age_limit: Some("20–30 years (relaxation as per Govt norms)".to_string()),
                application_fee: Some("₹850 for GEN/EWS/OBC; ₹175 for SC/ST/PwD".to_string()),
                selection_process: Some("Preliminary Exam → Main Exam → Interview".to_string()),
            },
        ),
        (
            "clerk",
            MetadataTemplate {
                description: Some(
                    "IBPS Clerk for Clerical Cadre posts in participating PSBs.".to_string(),
                ),
                eligibility: Some("Graduate in any discipline, age 20–28 years.".to_string()),
                qualification: Some("Any Graduate from a Recognised University".to_string()),
                age_limit: Some("20–28 years".to_string()),
                application_fee: Some("₹850 for GEN/EWS/OBC; ₹175 for SC/ST/PwD".to_string()),
                selection_process: Some("Preliminary Exam → Main Exam".to_string()),
            },
        ),
        (
            "rrb",
            MetadataTemplate {
                description: Some(
                    "IBPS RRB for Officer Scale and Office Assistant posts in Regional Rural Banks."
                        .to_string(),
                ),
                eligibility: Some(
                    "Graduate degree + proficiency in local official language.".to_string(),
                ),
                qualification: Some("Bachelor's Degree from a Recognised University".to_string()),
                age_limit: Some("18–30 years (varies by post and RRB)".to_string()),
                application_fee: Some("₹850 for GEN/EWS/OBC; ₹175 for SC/ST/PwD".to_string()),
                selection_process: Some(
                    "Preliminary Exam → Main Exam → Interview (for Officers)".to_string(),
                ),
            },
        ),
        (
            "so",
            MetadataTemplate {
                description: Some(
                    "IBPS SO (Specialist Officer) for IT Officer, Law Officer, HR/Personnel \
                     Officer etc."
                        .to_string(),
                ),
                eligibility: Some("Graduate + relevant professional qualification.".to_string()),
                qualification: Some(
                    "Relevant Professional Degree (IT/Law/Agriculture etc.)".to_string(),
                ),
                age_limit: Some("20–30 years".to_string()),
                application_fee: Some("₹850 for GEN/EWS/OBC; ₹175 for SC/ST/PwD".to_string()),
                selection_process: Some(
                    "Preliminary (Objective) → Main (Objective) → Interview".to_string(),
                ),
            },
        ),
    ])
}
