// ABOUTME: Registry of the six built-in source configurations, in run order.
// ABOUTME: Selection by name is case-insensitive; unknown names are an error listing the valid set.

mod bpsc;
mod ibps;
mod mppsc;
mod ssc;
mod uppsc;
mod upsc;

use crate::source::SourceConfig;

/// All built-in sources in their canonical run order.
pub fn builtin_sources() -> Vec<SourceConfig> {
    vec![
        upsc::source(),
        ssc::source(),
        ibps::source(),
        bpsc::source(),
        uppsc::source(),
        mppsc::source(),
    ]
}

/// Filters the built-in sources down to the requested names
/// (case-insensitive). Returns the unknown names as the error.
pub fn select_sources(
    all: Vec<SourceConfig>,
    requested: &[String],
) -> Result<Vec<SourceConfig>, Vec<String>> {
    let unknown: Vec<String> = requested
        .iter()
        .filter(|name| {
            !all.iter()
                .any(|config| config.name.eq_ignore_ascii_case(name.trim()))
        })
        .map(|name| name.trim().to_string())
        .collect();
    if !unknown.is_empty() {
        return Err(unknown);
    }

    Ok(all
        .into_iter()
        .filter(|config| {
            requested
                .iter()
                .any(|name| config.name.eq_ignore_ascii_case(name.trim()))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use examhub_extract::ExamLevel;

    #[test]
    fn six_sources_in_run_order() {
        let names: Vec<String> = builtin_sources().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["UPSC", "SSC", "IBPS", "BPSC", "UPPSC", "MPPSC"]);
    }

    #[test]
    fn state_sources_carry_their_state() {
        for config in builtin_sources() {
            match config.level {
                ExamLevel::State => assert!(
                    config.state.is_some(),
                    "{} is state-level but has no state",
                    config.name
                ),
                ExamLevel::Central => assert!(config.state.is_none()),
            }
        }
    }

    #[test]
    fn every_source_has_a_listing_and_a_pattern() {
        for config in builtin_sources() {
            assert!(!config.listing_pages.is_empty(), "{}", config.name);
            assert!(!config.base_url.is_empty(), "{}", config.name);
        }
    }

    #[test]
    fn selection_is_case_insensitive_and_keeps_run_order() {
        let selected =
            select_sources(builtin_sources(), &["ssc".to_string(), "upsc".to_string()]).unwrap();
        let names: Vec<&str> = selected.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["UPSC", "SSC"]);
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = select_sources(builtin_sources(), &["nopes".to_string()]).unwrap_err();
        assert_eq!(err, vec!["nopes"]);
    }
}
