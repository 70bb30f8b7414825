// ABOUTME: Keyword-to-template metadata matching for known exam families.
// ABOUTME: Table order is significant: first substring match wins, defaults merge underneath.

use serde::{Deserialize, Serialize};

/// Static descriptive fields attached to a matched exam family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataTemplate {
    pub description: Option<String>,
    pub eligibility: Option<String>,
    pub qualification: Option<String>,
    pub age_limit: Option<String>,
    pub application_fee: Option<String>,
    pub selection_process: Option<String>,
}

impl MetadataTemplate {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self == &MetadataTemplate::default()
    }

    /// Merges this template over a base: set fields win, unset fields fall
    /// through to the base (partial override, never full replacement).
    pub fn over(&self, base: &MetadataTemplate) -> MetadataTemplate {
        MetadataTemplate {
            description: self.description.clone().or_else(|| base.description.clone()),
            eligibility: self.eligibility.clone().or_else(|| base.eligibility.clone()),
            qualification: self
                .qualification
                .clone()
                .or_else(|| base.qualification.clone()),
            age_limit: self.age_limit.clone().or_else(|| base.age_limit.clone()),
            application_fee: self
                .application_fee
                .clone()
                .or_else(|| base.application_fee.clone()),
            selection_process: self
                .selection_process
                .clone()
                .or_else(|| base.selection_process.clone()),
        }
    }
}

/// Ordered keyword-to-template table for one source. Keywords are lowercase
/// substrings; the defined order decides ties, so overlapping keywords match
/// deterministically by position.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    entries: Vec<(String, MetadataTemplate)>,
}

impl MetadataTable {
    pub fn new(entries: Vec<(&str, MetadataTemplate)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first entry whose keyword is a substring of the lowercased
    /// title. Deterministic, side-effect-free.
    pub fn lookup(&self, title: &str) -> Option<&MetadataTemplate> {
        let low = title.to_lowercase();
        self.entries
            .iter()
            .find(|(keyword, _)| low.contains(keyword))
            .map(|(_, template)| template)
    }
}

/// Matches a title against the table and merges the result over the source's
/// default template. No match and no default yields an empty template.
pub fn resolve_metadata(
    title: &str,
    table: &MetadataTable,
    default: Option<&MetadataTemplate>,
) -> MetadataTemplate {
    let matched = table.lookup(title).cloned().unwrap_or_default();
    match default {
        Some(base) => matched.over(base),
        None => matched,
    }
}
