// ABOUTME: SSC source configuration: latest notices anchor list plus the exam calendar table.
// ABOUTME: SSC renders static HTML, so both listings work without a renderer.

use regex::Regex;

use examhub_extract::{ExamLevel, MetadataTable, MetadataTemplate};

use crate::source::{ListingPage, NameStyle, SourceConfig};

pub fn source() -> SourceConfig {
    SourceConfig {
        name: "SSC".to_string(),
        organization: "Staff Selection Commission (SSC)".to_string(),
        level: ExamLevel::Central,
        state: None,
        base_url: "https://ssc.nic.in".to_string(),
        listing_pages: vec![
            ListingPage::anchors("https://ssc.nic.in/portal/LatestNews"),
            ListingPage::calendar("https://ssc.nic.in/portal/ExamCalendar"),
        ],
        relevance: Regex::new(r"(?i)\bssc\b|cgl|chsl|gd|mts|cpo|jht|steno|je\b").unwrap(),
        min_title_len: 0,
        max_anchors: 30,
        metadata: metadata(),
        default_metadata: None,
        name_style: NameStyle::Verbatim,
        fallback_description: None,
        render_fallback: None,
    }
}

fn metadata() -> MetadataTable {
    MetadataTable::new(vec![
        (
            "cgl",
            MetadataTemplate {
                description: Some(
                    "SSC CGL is conducted for Group B and Group C posts in various Ministries \
                     including Inspector, Sub-Inspector, AAO etc."
                        .to_string(),
                ),
                eligibility: Some(
                    "Graduate from a recognised university, age 18–32 years.".to_string(),
                ),
                qualification: Some("Bachelor's Degree in Any Subject".to_string()),
                age_limit: Some("18–32 years (varies by post; relaxation available)".to_string()),
                application_fee: Some("₹100 (Exempted for Female/SC/ST/PwD/ESM)".to_string()),
                selection_process: Some(
                    "Tier-I (CBT) → Tier-II (CBT) → Document Verification".to_string(),
                ),
            },
        ),
        (
            "chsl",
            MetadataTemplate {
                description: Some(
                    "SSC CHSL for LDC, JSA, PA, SA and DEO posts across Central Departments."
                        .to_string(),
                ),
                eligibility: Some(
                    "12th pass from a recognised board, age 18–27 years.".to_string(),
                ),
                qualification: Some(
                    "Class 12 / Intermediate from a Recognised Board".to_string(),
                ),
                age_limit: Some("18–27 years (relaxation for SC/ST/OBC/PwD)".to_string()),
                application_fee: Some("₹100 (Exempted for Female/SC/ST/PwD/ESM)".to_string()),
                selection_process: Some(
                    "Tier-I (CBT) → Tier-II (CBT + Skill Test / Typing Test)".to_string(),
                ),
            },
        ),
        (
            "mts",
            MetadataTemplate {
                description: Some(
                    "SSC MTS for Multi Tasking (Non-Technical) Staff and Havaldar posts."
                        .to_string(),
                ),
                eligibility: Some(
                    "10th pass from a recognised board, age 18–25 years.".to_string(),
                ),
                qualification: Some("Class 10 / Matriculation".to_string()),
                age_limit: Some("18–25 years".to_string()),
                application_fee: Some("₹100 (Exempted for Female/SC/ST/PwD/ESM)".to_string()),
                selection_process: Some(
                    "Paper-I (CBT) → Paper-II (Descriptive, qualifying)".to_string(),
                ),
            },
        ),
        (
            "gd",
            MetadataTemplate {
                description: Some(
                    "SSC GD Constable in CAPFs, NIA, SSF and Rifleman in AR.".to_string(),
                ),
                eligibility: Some(
                    "10th pass, age 18–23 years, medical fitness required.".to_string(),
                ),
                qualification: Some("Class 10 / Matriculation".to_string()),
                age_limit: Some("18–23 years (relaxation for SC/ST/OBC)".to_string()),
                application_fee: Some("₹100 (Exempted for Female/SC/ST/PwD/ExSM)".to_string()),
                selection_process: Some("CBT → Physical Efficiency Test → Medical".to_string()),
            },
        ),
        (
            "cpo",
            MetadataTemplate {
                description: Some(
                    "SSC CPO for Sub-Inspector in Delhi Police, CAPFs and Assistant Sub-Inspector \
                     in CISF."
                        .to_string(),
                ),
                eligibility: Some("Bachelor's degree, age 20–25 years.".to_string()),
                qualification: Some(
                    "Bachelor's Degree from a Recognised University".to_string(),
                ),
                age_limit: Some("20–25 years".to_string()),
                application_fee: Some("₹100 (Exempted for Female/SC/ST/PwD/ExSM)".to_string()),
                selection_process: Some(
                    "Paper-I → Physical Standard/Efficiency Test → Medical → Paper-II → DV"
                        .to_string(),
                ),
            },
        ),
        (
            "jht",
            MetadataTemplate {
                description: Some(
                    "SSC JHT (Junior Hindi Translator) and related posts.".to_string(),
                ),
                eligibility: Some(
                    "Master's degree in Hindi/English, age 18–30 years.".to_string(),
                ),
                qualification: Some("Master's Degree in Hindi or English".to_string()),
                age_limit: Some("18–30 years".to_string()),
                application_fee: Some("₹100".to_string()),
                selection_process: Some(
                    "Paper-I (Objective) → Paper-II (Descriptive)".to_string(),
                ),
            },
        ),
    ])
}
