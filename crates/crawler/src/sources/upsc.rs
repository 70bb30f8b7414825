// ABOUTME: UPSC source configuration: recruitment notifications on a static anchor-list page.
// ABOUTME: Known exam families carry rich eligibility/fee metadata matched by title substring.

use regex::Regex;

use examhub_extract::{ExamLevel, MetadataTable, MetadataTemplate};

use crate::source::{ListingPage, NameStyle, SourceConfig};

pub fn source() -> SourceConfig {
    SourceConfig {
        name: "UPSC".to_string(),
        organization: "Union Public Service Commission (UPSC)".to_string(),
        level: ExamLevel::Central,
        state: None,
        base_url: "https://www.upsc.gov.in".to_string(),
        listing_pages: vec![ListingPage::anchors("https://www.upsc.gov.in/recruitment")],
        relevance: Regex::new(r"(?i)exam|recruit|advt|notification|cse|cds|nda|capf|ies|ifs|geo")
            .unwrap(),
        min_title_len: 0,
        // Cap the scan; the recruitment page links half the site.
        max_anchors: 20,
        metadata: metadata(),
        default_metadata: None,
        name_style: NameStyle::PrefixTitleCase,
        fallback_description: Some(
            "Official recruitment notification by UPSC. Title: {title}".to_string(),
        ),
        render_fallback: None,
    }
}

fn metadata() -> MetadataTable {
    MetadataTable::new(vec![
        (
            "civil services",
            MetadataTemplate {
                eligibility: Some(
                    "Indian citizen, Bachelor's degree from a recognised university, age 21–32 years."
                        .to_string(),
                ),
                qualification: Some("Bachelor's Degree in Any Discipline".to_string()),
                age_limit: Some(
                    "21–32 years (relaxation for SC/ST/OBC/PwD as per rules)".to_string(),
                ),
                application_fee: Some("₹100 (exempted for Female/SC/ST/PwD)".to_string()),
                selection_process: Some(
                    "Preliminary Examination → Main Examination → Personality Test (Interview)"
                        .to_string(),
                ),
                ..Default::default()
            },
        ),
        (
            "combined defence",
            MetadataTemplate {
                eligibility: Some(
                    "Indian citizen, 10+2 or equivalent (service-dependent), age 16.5–24 years."
                        .to_string(),
                ),
                qualification: Some("Class XII or equivalent".to_string()),
                age_limit: Some("16.5–24 years depending on service".to_string()),
                application_fee: Some("₹200".to_string()),
                selection_process: Some("Written Exam → SSB Interview → Medical".to_string()),
                ..Default::default()
            },
        ),
        (
            "nda",
            MetadataTemplate {
                eligibility: Some(
                    "Male Indian citizen, unmarried, passed Class 12 or appearing.".to_string(),
                ),
                qualification: Some("Class 10+2 / equivalent (Science for AF/Navy)".to_string()),
                age_limit: Some("16.5–19.5 years".to_string()),
                application_fee: Some("₹100 (exempted for SC/ST/Sons of JCO/NCO)".to_string()),
                selection_process: Some("Written Exam → SSB Interview → Medical".to_string()),
                ..Default::default()
            },
        ),
        (
            "engineering services",
            MetadataTemplate {
                eligibility: Some("Degree in Engineering or equivalent.".to_string()),
                qualification: Some("B.E. / B.Tech in relevant discipline".to_string()),
                age_limit: Some("21–30 years".to_string()),
                application_fee: Some("₹200".to_string()),
                selection_process: Some(
                    "Preliminary (Objective) → Main (Conventional) → Personality Test".to_string(),
                ),
                ..Default::default()
            },
        ),
        (
            "capf",
            MetadataTemplate {
                eligibility: Some("Bachelor's degree, age 20–25 years.".to_string()),
                qualification: Some("Bachelor's Degree from a Recognised University".to_string()),
                age_limit: Some("20–25 years".to_string()),
                application_fee: Some("₹200".to_string()),
                selection_process: Some(
                    "Written Exam → Physical/Medical Test → Interview".to_string(),
                ),
                ..Default::default()
            },
        ),
    ])
}
