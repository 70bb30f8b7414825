// ABOUTME: UPPSC source configuration: Uttar Pradesh PSC public notices, state level.
// ABOUTME: A default template covers every notice; keyword templates override per exam family.

use regex::Regex;

use examhub_extract::{ExamLevel, MetadataTable, MetadataTemplate};

use crate::source::{ListingPage, NameStyle, SourceConfig};

pub fn source() -> SourceConfig {
    SourceConfig {
        name: "UPPSC".to_string(),
        organization: "Uttar Pradesh Public Service Commission (UPPSC)".to_string(),
        level: ExamLevel::State,
        state: Some("Uttar Pradesh".to_string()),
        base_url: "https://uppsc.up.nic.in".to_string(),
        listing_pages: vec![ListingPage::anchors("https://uppsc.up.nic.in/pub_notices.aspx")],
        relevance: Regex::new(r"(?i)exam|recruit|advt|notification|circular|vacancy").unwrap(),
        min_title_len: 8,
        max_anchors: 0,
        metadata: metadata(),
        default_metadata: Some(default_metadata()),
        name_style: NameStyle::EnsurePrefix,
        fallback_description: Some("Official UPPSC recruitment: {title}".to_string()),
        render_fallback: None,
    }
}

fn default_metadata() -> MetadataTemplate {
    MetadataTemplate {
        eligibility: Some(
            "UP domicile; Bachelor's degree from a recognised university; age 21–40 years \
             (relaxation for reserved categories per UP Govt rules)."
                .to_string(),
        ),
        qualification: Some("Bachelor's Degree from a Recognised University".to_string()),
        age_limit: Some("21–40 years (OBC/SC/ST relaxation as per UP Govt rules)".to_string()),
        application_fee: Some("₹105 for UR/OBC; ₹65 for SC/ST; ₹25 for PwD".to_string()),
        selection_process: Some(
            "Preliminary Exam (screening) → Main Exam → Interview".to_string(),
        ),
        ..Default::default()
    }
}

fn metadata() -> MetadataTable {
    MetadataTable::new(vec![
        (
            "pcs",
            MetadataTemplate {
                description: Some(
                    "UPPSC PCS exam for State Service posts including SDM, CDPO, ARTO etc."
                        .to_string(),
                ),
                selection_process: Some(
                    "Preliminary Exam → Main Exam (General Studies + Optional) → Interview"
                        .to_string(),
                ),
                ..Default::default()
            },
        ),
        (
            "ro",
            MetadataTemplate {
                description: Some(
                    "UPPSC Review Officer / Assistant Review Officer Exam.".to_string(),
                ),
                selection_process: Some("Preliminary Exam → Main Exam".to_string()),
                ..Default::default()
            },
        ),
        (
            "aro",
            MetadataTemplate {
                description: Some(
                    "UPPSC Special Selection/Assistant Review Officer Exam.".to_string(),
                ),
                selection_process: Some("Written Exam → Skill Test".to_string()),
                ..Default::default()
            },
        ),
        (
            "lecturers",
            MetadataTemplate {
                description: Some(
                    "UPPSC Lecturers / Assistant Professor recruitment.".to_string(),
                ),
                qualification: Some("Post Graduate in relevant subject + NET/SLET".to_string()),
                ..Default::default()
            },
        ),
        (
            "beo",
            MetadataTemplate {
                description: Some("UPPSC Block Education Officer Exam.".to_string()),
                qualification: Some("Bachelor's Degree in Education (B.Ed.)".to_string()),
                ..Default::default()
            },
        ),
    ])
}
