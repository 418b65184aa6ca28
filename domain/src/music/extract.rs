//! Play-command extraction.
//!
//! Pulls the free-text music query out of a chat message such as
//! `"@bot play meet me there by lucki please"` → `"meet me there by lucki"`.

use crate::core::string::collapse_whitespace;
use regex::Regex;
use std::sync::LazyLock;

/// Verbs that introduce a music query, in matching priority order.
pub const PLAY_KEYWORDS: [&str; 5] = ["play", "put on", "start", "begin", "queue"];

/// Filler phrases removed from an extracted query.
pub const FILLER_PHRASES: [&str; 3] = ["please", "now", "for me"];

static PLAY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    PLAY_KEYWORDS
        .iter()
        .map(|kw| {
            let escaped = regex::escape(kw).replace(' ', r"\s+");
            Regex::new(&format!(r"(?i)\b{}\b", escaped)).expect("static play pattern")
        })
        .collect()
});

static FILLER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = FILLER_PHRASES
        .iter()
        .map(|p| regex::escape(p).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives)).expect("static filler pattern")
});

/// Extract the music query following a play verb.
///
/// Keywords are tried in [`PLAY_KEYWORDS`] order. For the first keyword
/// found (as a whole word), the text after its first occurrence is taken,
/// filler phrases are removed and whitespace is collapsed. A keyword whose
/// remainder is empty falls through to the next keyword.
pub fn extract_music_query(message: &str) -> Option<String> {
    for pattern in PLAY_PATTERNS.iter() {
        let Some(m) = pattern.find(message) else {
            continue;
        };
        let cleaned = strip_filler(&message[m.end()..]);
        if !cleaned.is_empty() {
            return Some(cleaned);
        }
    }
    None
}

/// Remove filler phrases (`please`, `now`, `for me`) and tidy whitespace.
pub fn strip_filler(text: &str) -> String {
    collapse_whitespace(&FILLER_PATTERN.replace_all(text, " "))
}
