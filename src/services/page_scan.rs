//! Page-content scanning for the quiz content agent.
//!
//! Pure text machinery behind the analysis hooks: cleanup, keyword
//! extraction, and the `pageAnalysis` report. The background coordinator
//! logs and drops these reports — nothing downstream consumes them yet.

use std::collections::HashMap;

use crate::types::message::PageAnalysis;

/// Cleaned page text is capped at this many characters.
pub const CONTENT_CAP: usize = 2000;

/// The analysis report carries at most this much of the cleaned text.
pub const REPORT_CONTENT_CAP: usize = 1000;

/// Keywords must be longer than this many characters.
pub const MIN_KEYWORD_LEN: usize = 3;

/// At most this many keywords are reported.
pub const MAX_KEYWORDS: usize = 10;

/// A text selection shorter than this is not worth offering a quiz for.
pub const MIN_SELECTION_LEN: usize = 10;

/// Collapses runs of whitespace, trims, and caps at [`CONTENT_CAP`].
pub fn clean_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapsed, CONTENT_CAP)
}

/// Top keywords by frequency: lowercased, punctuation stripped, words
/// longer than [`MIN_KEYWORD_LEN`] chars, ties broken by first occurrence.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for raw in text.to_lowercase().split_whitespace() {
        let word: String = raw
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        if word.chars().count() <= MIN_KEYWORD_LEN {
            continue;
        }
        let count = counts.entry(word.clone()).or_insert(0);
        if *count == 0 {
            first_seen.push(word);
        }
        *count += 1;
    }

    let mut ranked: Vec<(usize, usize, String)> = first_seen
        .into_iter()
        .enumerate()
        .map(|(order, word)| (counts[&word], order, word))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(_, _, word)| word)
        .collect()
}

/// Builds the report forwarded to the background coordinator.
pub fn analyze(url: &str, title: &str, text: &str, language: Option<&str>) -> PageAnalysis {
    let content = clean_text(text);
    PageAnalysis {
        url: url.to_string(),
        title: title.to_string(),
        keywords: extract_keywords(&content),
        content: truncate_chars(&content, REPORT_CONTENT_CAP),
        language: language.unwrap_or("en").to_string(),
    }
}

/// Whether a text selection is long enough to offer a quiz for.
pub fn selection_worthy(selection: &str) -> bool {
    selection.trim().chars().count() > MIN_SELECTION_LEN
}

/// Char-boundary-safe truncation.
fn truncate_chars(text: &str, cap: usize) -> String {
    if text.chars().count() <= cap {
        return text.to_string();
    }
    text.chars().take(cap).collect()
}
