// ABOUTME: Whitespace normalization and word-preserving truncation for scraped text.
// ABOUTME: Provides clean(), the single entry point every other component funnels text through.

/// Collapses all whitespace runs (spaces, tabs, newlines) to single spaces and
/// trims the ends. When `max_len > 0` and the cleaned text is longer than
/// `max_len` characters, the text is cut at `max_len`, backtracked to the last
/// space so no word is split, and a single ellipsis character is appended.
///
/// Never fails; empty input yields an empty string. Idempotent for any fixed
/// `max_len`.
pub fn clean(text: &str, max_len: usize) -> String {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if max_len == 0 {
        return cleaned;
    }

    let chars: Vec<char> = cleaned.chars().collect();
    if chars.len() <= max_len {
        return cleaned;
    }

    let prefix = &chars[..max_len];
    // Cut back to the last word boundary; keep the whole prefix when there is none.
    let end = match prefix.iter().rposition(|&c| c == ' ') {
        Some(pos) => pos,
        None => max_len,
    };
    let mut out: String = prefix[..end].iter().collect();
    out.push('…');
    out
}
