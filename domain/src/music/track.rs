//! Resolved track returned by a music source.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a track was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackSource {
    /// The streaming-service catalog.
    Spotify,
    /// The video platform.
    #[serde(rename = "youtube")]
    YouTube,
}

impl TrackSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackSource::Spotify => "spotify",
            TrackSource::YouTube => "youtube",
        }
    }
}

impl fmt::Display for TrackSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spotify" => Ok(TrackSource::Spotify),
            "youtube" | "yt" => Ok(TrackSource::YouTube),
            other => Err(format!("unknown track source: {}", other)),
        }
    }
}

/// A playable track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub title: String,
    pub artist: String,
    pub url: String,
    pub source: TrackSource,
    /// Track length in milliseconds (0 when unknown).
    pub duration_ms: u64,
    pub thumbnail: Option<String>,
}

impl TrackInfo {
    /// Format the duration as `m:ss`, or `None` when unknown.
    pub fn duration_display(&self) -> Option<String> {
        if self.duration_ms == 0 {
            return None;
        }
        let total_secs = self.duration_ms / 1000;
        Some(format!("{}:{:02}", total_secs / 60, total_secs % 60))
    }
}
