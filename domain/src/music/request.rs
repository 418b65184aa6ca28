//! Structured parsing of a free-text music query.

use crate::core::string::collapse_whitespace;
use regex::Regex;
use std::sync::LazyLock;

/// Platforms a user may name with "on <platform>" / "from <platform>".
pub const KNOWN_PLATFORMS: [&str; 5] = ["spotify", "apple", "deezer", "soundcloud", "youtube"];

static LEADING_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:play|put\s+on|start|begin|queue)\s+").expect("static verb pattern")
});

static PLATFORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:on|from)\s+({})\b",
        KNOWN_PLATFORMS.join("|")
    ))
    .expect("static platform pattern")
});

static BY_ARTIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?)\s+by\s+(.+)$").expect("static by pattern"));

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(.+?)""#).expect("static quote pattern"));

/// A music query split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicRequest {
    pub title: String,
    pub artist: Option<String>,
    /// Lower-cased platform name when the user asked for one.
    pub preferred_source: Option<String>,
}

impl MusicRequest {
    /// The term sent to a search back-end: `"<title> <artist>"`.
    pub fn search_term(&self) -> String {
        match &self.artist {
            Some(artist) => format!("{} {}", self.title, artist),
            None => self.title.clone(),
        }
    }
}

/// Parse `"<title> by <artist> on <platform>"` style queries.
///
/// A leading play verb is dropped. Without a `by` clause, a double-quoted
/// span is taken as the title; otherwise the whole remainder is the title.
pub fn parse_music_request(query: &str) -> MusicRequest {
    let mut text = LEADING_VERB.replace(query, "").into_owned();

    let preferred_source = PLATFORM
        .captures(&text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase());
    if preferred_source.is_some() {
        text = PLATFORM.replace(&text, " ").into_owned();
    }
    let text = collapse_whitespace(&text);

    if let Some(caps) = BY_ARTIST.captures(&text) {
        return MusicRequest {
            title: unquote(&caps[1]),
            artist: Some(unquote(&caps[2])),
            preferred_source,
        };
    }

    if let Some(caps) = QUOTED.captures(&text) {
        return MusicRequest {
            title: caps[1].trim().to_string(),
            artist: None,
            preferred_source,
        };
    }

    MusicRequest {
        title: unquote(&text),
        artist: None,
        preferred_source,
    }
}

fn unquote(s: &str) -> String {
    collapse_whitespace(&s.replace('"', ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title_by_artist() {
        let req = parse_music_request("meet me there by lucki");
        assert_eq!(req.title, "meet me there");
        assert_eq!(req.artist.as_deref(), Some("lucki"));
        assert_eq!(req.preferred_source, None);
        assert_eq!(req.search_term(), "meet me there lucki");
    }

    #[test]
    fn test_parse_platform_preference() {
        let req = parse_music_request("play \"Bandit\" by Juice WRLD on YouTube");
        assert_eq!(req.title, "Bandit");
        assert_eq!(req.artist.as_deref(), Some("Juice WRLD"));
        assert_eq!(req.preferred_source.as_deref(), Some("youtube"));
    }

    #[test]
    fn test_parse_quoted_title() {
        let req = parse_music_request("the song \"Blinding Lights\" from spotify");
        assert_eq!(req.title, "Blinding Lights");
        assert_eq!(req.artist, None);
        assert_eq!(req.preferred_source.as_deref(), Some("spotify"));
    }

    #[test]
    fn test_parse_plain_title_keeps_apostrophes() {
        let req = parse_music_request("drake god's plan");
        assert_eq!(req.title, "drake god's plan");
        assert_eq!(req.artist, None);
    }
}
