// ABOUTME: The canonical ExamRecord value object plus the normalizer that assembles it.
// ABOUTME: Applies per-field length caps, source defaults, and the name/website validity gate.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::DateFields;
use crate::text::clean;

/// Whether an exam is run by a central or a state body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamLevel {
    Central,
    State,
}

impl fmt::Display for ExamLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExamLevel::Central => "Central",
            ExamLevel::State => "State",
        };
        write!(f, "{}", s)
    }
}

/// Application lifecycle status. Left unset by the pipeline; the storage
/// collaborator infers it from the date fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamStatus {
    Open,
    Closed,
    #[serde(rename = "Coming Soon")]
    ComingSoon,
}

impl fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExamStatus::Open => "Open",
            ExamStatus::Closed => "Closed",
            ExamStatus::ComingSoon => "Coming Soon",
        };
        write!(f, "{}", s)
    }
}

/// Per-field length caps, preserved from the downstream store's schema.
pub mod caps {
    pub const EXAM_NAME: usize = 255;
    pub const ORGANIZATION: usize = 255;
    pub const DESCRIPTION: usize = 2000;
    pub const ELIGIBILITY: usize = 1000;
    pub const QUALIFICATION: usize = 500;
    pub const AGE_LIMIT: usize = 200;
    pub const APPLICATION_FEE: usize = 200;
    pub const SELECTION_PROCESS: usize = 500;
}

/// One extracted exam notification in its canonical shape.
///
/// `(exam_name, organization)` is the natural key, case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamRecord {
    pub exam_name: String,
    pub organization: String,
    pub level: ExamLevel,
    pub state: Option<String>,
    pub description: String,
    pub eligibility: String,
    pub qualification: String,
    pub age_limit: String,
    pub application_start_date: Option<NaiveDate>,
    pub application_last_date: Option<NaiveDate>,
    pub exam_date: Option<NaiveDate>,
    pub official_website: String,
    pub notification_pdf: Option<String>,
    pub application_fee: String,
    pub selection_process: String,
    pub status: Option<ExamStatus>,
}

impl ExamRecord {
    /// A record without a name or an official website must never reach
    /// storage or notifications.
    pub fn is_valid(&self) -> bool {
        !self.exam_name.is_empty() && !self.official_website.is_empty()
    }

    /// Case-insensitive natural key for dedup and upsert identity.
    pub fn natural_key(&self) -> (String, String) {
        (
            self.exam_name.to_lowercase(),
            self.organization.to_lowercase(),
        )
    }
}

/// Source-level defaults applied while normalizing a record.
#[derive(Debug, Clone)]
pub struct RecordContext<'a> {
    pub organization: &'a str,
    pub level: ExamLevel,
    pub state: Option<&'a str>,
}

/// The raw field set a strategy hands to the normalizer. Free-text fields are
/// uncleaned; the normalizer owns the caps.
#[derive(Debug, Clone, Default)]
pub struct RecordDraft {
    pub exam_name: String,
    pub official_website: String,
    pub notification_pdf: Option<String>,
    pub description: String,
    pub eligibility: String,
    pub qualification: String,
    pub age_limit: String,
    pub application_fee: String,
    pub selection_process: String,
    pub dates: DateFields,
}

/// Assembles a canonical record: cleans and caps every free-text field,
/// copies dates and URLs through, and fills organization/level/state from the
/// source context. Never fails; missing fields become empty/None. `status` is
/// always left unset for downstream inference.
pub fn build_record(draft: RecordDraft, ctx: &RecordContext) -> ExamRecord {
    ExamRecord {
        exam_name: clean(&draft.exam_name, caps::EXAM_NAME),
        organization: clean(ctx.organization, caps::ORGANIZATION),
        level: ctx.level,
        state: ctx.state.map(|s| s.to_string()),
        description: clean(&draft.description, caps::DESCRIPTION),
        eligibility: clean(&draft.eligibility, caps::ELIGIBILITY),
        qualification: clean(&draft.qualification, caps::QUALIFICATION),
        age_limit: clean(&draft.age_limit, caps::AGE_LIMIT),
        application_start_date: draft.dates.application_start_date,
        application_last_date: draft.dates.application_last_date,
        exam_date: draft.dates.exam_date,
        official_website: draft.official_website,
        notification_pdf: draft.notification_pdf,
        application_fee: clean(&draft.application_fee, caps::APPLICATION_FEE),
        selection_process: clean(&draft.selection_process, caps::SELECTION_PROCESS),
        status: None,
    }
}
