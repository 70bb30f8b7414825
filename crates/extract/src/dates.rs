// ABOUTME: Free-text date parsing with day-first preference plus keyword-anchored field extraction.
// ABOUTME: parse_date() turns a messy fragment into a NaiveDate; extract_dates() classifies dates line by line.

use aho_corasick::AhoCorasick;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Parenthetical annotations like "(till 11:59 PM)", removed before parsing.
static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*?\)").unwrap());

/// Ordinal suffixes on day numbers: "15th" -> "15", "22nd" -> "22".
static ORDINAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)(st|nd|rd|th)").unwrap());

/// Numeric day-first triple: D/M/Y with /, - or . separators and a 2-4 digit year.
static NUMERIC_DMY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})[-/.](\d{1,2})[-/.](\d{2,4})$").unwrap());

/// ISO-like triple: YYYY/MM/DD with /, - or . separators.
static NUMERIC_YMD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})$").unwrap());

/// "15 March 2026", "3 Sept. 2026", "15 Mar, 2026".
static DAY_MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d{1,2})\s+([a-z]+)\.?,?\s+(\d{4})$").unwrap());

/// "March 15, 2026", "Sep 3 2026".
static MONTH_DAY_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([a-z]+)\.?\s+(\d{1,2}),?\s+(\d{4})$").unwrap());

/// The three date-token shapes recognized inside running text.
static DATE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4}|\d{1,2}\s+(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{4}|\d{4}[-/.]\d{2}[-/.]\d{2})\b",
    )
    .unwrap()
});

const MONTHS: [(&str, u32); 12] = [
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

static LAST_KEYWORDS: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::new(["last date", "closing date", "end date", "final date", "last day"]).unwrap()
});

static EXAM_KEYWORDS: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::new([
        "exam date",
        "examination date",
        "written test",
        "date of exam",
        "tentative date",
    ])
    .unwrap()
});

static START_KEYWORDS: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::new([
        "notification",
        "start date",
        "begin",
        "opening date",
        "apply from",
    ])
    .unwrap()
});

/// Dates pulled out of a block of free text, classified by keyword proximity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFields {
    pub application_start_date: Option<NaiveDate>,
    pub application_last_date: Option<NaiveDate>,
    pub exam_date: Option<NaiveDate>,
}

impl DateFields {
    /// True when no field was extracted.
    pub fn is_empty(&self) -> bool {
        self.application_start_date.is_none()
            && self.application_last_date.is_none()
            && self.exam_date.is_none()
    }
}

/// Parses a messy free-text date fragment into a calendar date.
///
/// Parenthetical notes are removed, ordinal suffixes stripped, and the
/// remainder parsed with a day-before-month preference ("05/03/2026" is
/// 5 March, not May 3). Time-of-day information is discarded. Returns None on
/// anything unparseable; never fails.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if text.trim().is_empty() {
        return None;
    }

    let stripped = PARENTHETICAL.replace_all(text, "");
    let stripped = ORDINAL_SUFFIX.replace_all(&stripped, "$1");
    let s = stripped.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(caps) = NUMERIC_DMY.captures(s) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year = expand_year(caps[3].parse().ok()?);
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = NUMERIC_YMD.captures(s) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DAY_MONTH_YEAR.captures(s) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_number(&caps[2])?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = MONTH_DAY_YEAR.captures(s) {
        let month = month_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    // Loose fallback for formats the explicit patterns miss, e.g. "15-Mar-2026".
    dateparser::parse(s).ok().map(|dt| dt.date_naive())
}

/// Scans free text line by line and classifies each discovered date token as
/// application start, application last, or exam date based on keywords found
/// in the same line. The first qualifying line wins per field; later lines for
/// an already-set field are ignored. Lines with a date but no keyword are
/// skipped entirely.
pub fn extract_dates(text: &str) -> DateFields {
    let mut fields = DateFields::default();

    for line in text.lines() {
        let token = match DATE_TOKEN.find(line) {
            Some(m) => m.as_str(),
            None => continue,
        };
        let date = match parse_date(token) {
            Some(d) => d,
            None => continue,
        };

        let low = line.to_lowercase();
        if LAST_KEYWORDS.is_match(&low) {
            fields.application_last_date.get_or_insert(date);
        } else if EXAM_KEYWORDS.is_match(&low) {
            fields.exam_date.get_or_insert(date);
        } else if START_KEYWORDS.is_match(&low) {
            fields.application_start_date.get_or_insert(date);
        }
    }

    fields
}

/// Resolves a month word to its number by 3-letter prefix, so "Sept",
/// "September" and "sep" all map to 9.
fn month_number(word: &str) -> Option<u32> {
    let low = word.to_lowercase();
    let prefix = low.get(0..3)?;
    MONTHS
        .iter()
        .find(|(abbr, _)| *abbr == prefix)
        .map(|(_, n)| *n)
}

/// Two-digit years are taken as 2000s; exam notifications are contemporary.
fn expand_year(year: i32) -> i32 {
    if year < 100 {
        2000 + year
    } else {
        year
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_ordinal_day_month_year() {
        assert_eq!(parse_date("15th March, 2026"), Some(date(2026, 3, 15)));
        assert_eq!(parse_date("22nd Feb 2027"), Some(date(2027, 2, 22)));
        assert_eq!(parse_date("1st January 2026"), Some(date(2026, 1, 1)));
    }

    #[test]
    fn numeric_triples_are_day_first() {
        assert_eq!(parse_date("05/03/2026"), Some(date(2026, 3, 5)));
        assert_eq!(parse_date("31-12-2026"), Some(date(2026, 12, 31)));
        assert_eq!(parse_date("15.08.2026"), Some(date(2026, 8, 15)));
    }

    #[test]
    fn two_digit_years_expand_to_2000s() {
        assert_eq!(parse_date("05/03/26"), Some(date(2026, 3, 5)));
    }

    #[test]
    fn iso_triple_parses_as_year_first() {
        assert_eq!(parse_date("2026-03-05"), Some(date(2026, 3, 5)));
        assert_eq!(parse_date("2026/12/31"), Some(date(2026, 12, 31)));
    }

    #[test]
    fn month_day_year_parses() {
        assert_eq!(parse_date("March 15, 2026"), Some(date(2026, 3, 15)));
    }

    #[test]
    fn long_month_abbreviations_resolve_by_prefix() {
        assert_eq!(parse_date("3 Sept 2026"), Some(date(2026, 9, 3)));
        assert_eq!(parse_date("3 September 2026"), Some(date(2026, 9, 3)));
    }

    #[test]
    fn parenthetical_notes_are_removed() {
        assert_eq!(
            parse_date("15/03/2026 (till 11:59 PM)"),
            Some(date(2026, 3, 15))
        );
        assert_eq!(
            parse_date("(tentative) 15 March 2026 (Sunday)"),
            Some(date(2026, 3, 15))
        );
    }

    #[test]
    fn empty_and_garbage_yield_none() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("(only a note)"), None);
    }

    #[test]
    fn impossible_dates_yield_none() {
        assert_eq!(parse_date("32/13/2026"), None);
    }

    #[test]
    fn extracts_and_classifies_by_keyword() {
        let text = "Last Date: 31/12/2026\nExam Date: 15 Feb 2027";
        let fields = extract_dates(text);
        assert_eq!(fields.application_last_date, Some(date(2026, 12, 31)));
        assert_eq!(fields.exam_date, Some(date(2027, 2, 15)));
        assert_eq!(fields.application_start_date, None);
    }

    #[test]
    fn first_qualifying_line_wins() {
        let text = "Last date for applying: 01/01/2026\nExtended last date: 15/01/2026";
        let fields = extract_dates(text);
        assert_eq!(fields.application_last_date, Some(date(2026, 1, 1)));
    }

    #[test]
    fn dated_line_without_keyword_is_ignored() {
        let fields = extract_dates("Published on 12/11/2026");
        assert!(fields.is_empty());
    }

    #[test]
    fn last_date_keywords_take_precedence_over_start() {
        // "notification" is a start keyword but the line names a last date.
        let fields = extract_dates("Notification closing date: 10/10/2026");
        assert_eq!(fields.application_last_date, Some(date(2026, 10, 10)));
        assert_eq!(fields.application_start_date, None);
    }

    #[test]
    fn start_keywords_classify_start_date() {
        let fields = extract_dates("Apply from 01/06/2026");
        assert_eq!(fields.application_start_date, Some(date(2026, 6, 1)));
    }

    #[test]
    fn unparseable_token_skips_the_line() {
        // Token shape matches but the date itself is impossible.
        let fields = extract_dates("Last date: 32/13/2026\nClosing date: 05/03/2026");
        assert_eq!(fields.application_last_date, Some(date(2026, 3, 5)));
    }
}
