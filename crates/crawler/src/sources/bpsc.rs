// ABOUTME: BPSC source configuration: Bihar PSC notices, state level.
// ABOUTME: Same shape as the other state commissions: default template plus per-family overrides.

use regex::Regex;

use examhub_extract::{ExamLevel, MetadataTable, MetadataTemplate};

use crate::source::{ListingPage, NameStyle, SourceConfig};

pub fn source() -> SourceConfig {
    SourceConfig {
        name: "BPSC".to_string(),
        organization: "Bihar Public Service Commission (BPSC)".to_string(),
        level: ExamLevel::State,
        state: Some("Bihar".to_string()),
        base_url: "https://bpsc.bih.nic.in".to_string(),
        listing_pages: vec![ListingPage::anchors("https://bpsc.bih.nic.in/whats-new.htm")],
        relevance: Regex::new(r"(?i)exam|recruit|advt|notification|vacancy|bpsc").unwrap(),
        min_title_len: 8,
        max_anchors: 0,
        metadata: metadata(),
        default_metadata: Some(default_metadata()),
        name_style: NameStyle::EnsurePrefix,
        fallback_description: Some("Official BPSC recruitment: {title}".to_string()),
        render_fallback: None,
    }
}

fn default_metadata() -> MetadataTemplate {
    MetadataTemplate {
        eligibility: Some(
            "Bihar domicile; Bachelor's degree from a recognised university; age 21–37 years \
             (relaxation for reserved categories per Bihar Govt rules)."
                .to_string(),
        ),
        qualification: Some("Bachelor's Degree from a Recognised University".to_string()),
        age_limit: Some("21–37 years (SC/ST/OBC/Female relaxation as per Bihar Govt rules)"
            .to_string()),
        application_fee: Some("₹600 for GEN; ₹150 for SC/ST/Female of Bihar".to_string()),
        selection_process: Some("Preliminary Exam → Main Exam → Interview".to_string()),
        ..Default::default()
    }
}

fn metadata() -> MetadataTable {
    MetadataTable::new(vec![
        (
            "combined competitive",
            MetadataTemplate {
                description: Some(
                    "BPSC Combined Competitive Exam for SDM, DSP, Revenue Officer and other state \
                     services."
                        .to_string(),
                ),
                selection_process: Some(
                    "Preliminary Exam → Main Exam (GS + Optional) → Interview".to_string(),
                ),
                ..Default::default()
            },
        ),
        (
            "judicial",
            MetadataTemplate {
                description: Some(
                    "BPSC Judicial Services Exam for Civil Judge (Junior Division) posts."
                        .to_string(),
                ),
                qualification: Some("Bachelor's Degree in Law (LLB)".to_string()),
                ..Default::default()
            },
        ),
        (
            "assistant professor",
            MetadataTemplate {
                description: Some(
                    "BPSC Assistant Professor recruitment for government colleges.".to_string(),
                ),
                qualification: Some("Post Graduate + NET/SLET in relevant subject".to_string()),
                ..Default::default()
            },
        ),
        (
            "teacher",
            MetadataTemplate {
                description: Some(
                    "BPSC School Teacher recruitment for government schools of Bihar.".to_string(),
                ),
                qualification: Some("Graduate with B.Ed. / D.El.Ed. as per post".to_string()),
                selection_process: Some("Written Exam → Document Verification".to_string()),
                ..Default::default()
            },
        ),
    ])
}
