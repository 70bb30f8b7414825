// ABOUTME: MPPSC source configuration: Madhya Pradesh PSC advertisements, state level.
// ABOUTME: Static HTML listing with occasional direct PDF notifications.

use regex::Regex;

use examhub_extract::{ExamLevel, MetadataTable, MetadataTemplate};

use crate::source::{ListingPage, NameStyle, SourceConfig};

pub fn source() -> SourceConfig {
    SourceConfig {
        name: "MPPSC".to_string(),
        organization: "Madhya Pradesh Public Service Commission (MPPSC)".to_string(),
        level: ExamLevel::State,
        state: Some("Madhya Pradesh".to_string()),
        base_url: "https://mppsc.mp.gov.in".to_string(),
        listing_pages: vec![ListingPage::anchors("https://mppsc.mp.gov.in/advertisements")],
        relevance: Regex::new(r"(?i)exam|recruit|advt|notification|vacancy|advertisement")
            .unwrap(),
        min_title_len: 8,
        max_anchors: 0,
        metadata: metadata(),
        default_metadata: Some(default_metadata()),
        name_style: NameStyle::EnsurePrefix,
        fallback_description: Some("Official MPPSC recruitment: {title}".to_string()),
        render_fallback: None,
    }
}

fn default_metadata() -> MetadataTemplate {
    MetadataTemplate {
        eligibility: Some(
            "MP domicile; Bachelor's degree from a recognised university; age 21–40 years \
             (relaxation for reserved categories per MP Govt rules)."
                .to_string(),
        ),
        qualification: Some("Bachelor's Degree from a Recognised University".to_string()),
        age_limit: Some("21–40 years (SC/ST/OBC relaxation as per MP Govt rules)".to_string()),
        application_fee: Some("₹500 for GEN; ₹250 for SC/ST/OBC of MP".to_string()),
        selection_process: Some("Preliminary Exam → Main Exam → Interview".to_string()),
        ..Default::default()
    }
}

fn metadata() -> MetadataTable {
    MetadataTable::new(vec![
        (
            "state service",
            MetadataTemplate {
                description: Some(
                    "MPPSC State Service Exam for Deputy Collector, DSP, Treasury Officer and \
                     other Group A/B posts."
                        .to_string(),
                ),
                selection_process: Some(
                    "Preliminary Exam → Main Exam (9 papers + 2 optional papers) → Interview"
                        .to_string(),
                ),
                ..Default::default()
            },
        ),
        (
            "forest service",
            MetadataTemplate {
                description: Some(
                    "MPPSC State Forest Service Exam for Deputy Forest Ranger and District Range \
                     Officer posts."
                        .to_string(),
                ),
                qualification: Some(
                    "B.Sc. (with Physics/Chemistry/Math/Biology) or equivalent".to_string(),
                ),
                ..Default::default()
            },
        ),
        (
            "assistant professor",
            MetadataTemplate {
                description: Some(
                    "MPPSC Assistant Professor exam for government degree colleges.".to_string(),
                ),
                qualification: Some("Post Graduate + NET/SLET/SET qualification".to_string()),
                ..Default::default()
            },
        ),
        (
            "sub engineer",
            MetadataTemplate {
                description: Some(
                    "MPPSC Sub Engineer/Junior Engineer posts in various state departments."
                        .to_string(),
                ),
                qualification: Some("Diploma or B.E./B.Tech in relevant discipline".to_string()),
                ..Default::default()
            },
        ),
    ])
}
