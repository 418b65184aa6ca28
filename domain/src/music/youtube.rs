//! Video-platform URL handling.
//!
//! A pasted video link is played as-is: no search round-trip, the track is
//! built straight from the URL.

use super::track::{TrackInfo, TrackSource};
use regex::Regex;
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:www\.)?(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)",
    )
    .expect("static youtube url pattern")
});

static ID_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)([^&\n?#]+)")
            .expect("static youtube id pattern"),
        Regex::new(r"youtube\.com/watch\?.*v=([^&\n?#]+)").expect("static youtube id pattern"),
    ]
});

/// Whether `s` is a video-platform watch/short/embed URL.
pub fn is_youtube_url(s: &str) -> bool {
    URL_PATTERN.is_match(s.trim())
}

/// Extract the video id from a video-platform URL.
pub fn extract_video_id(url: &str) -> Option<String> {
    ID_PATTERNS
        .iter()
        .find_map(|p| p.captures(url))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", video_id)
}

/// Build a track directly from a pasted video URL.
///
/// Title and artist are placeholders; the video platform is the source.
pub fn track_from_url(url: &str) -> Option<TrackInfo> {
    let url = url.trim();
    if !is_youtube_url(url) {
        return None;
    }
    let video_id = extract_video_id(url)?;
    Some(TrackInfo {
        title: format!("YouTube video {}", video_id),
        artist: "Unknown".to_string(),
        url: url.to_string(),
        source: TrackSource::YouTube,
        duration_ms: 0,
        thumbnail: Some(thumbnail_url(&video_id)),
    })
}
