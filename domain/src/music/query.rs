//! Music-query result record.

use super::request::parse_music_request;
use super::track::TrackInfo;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Source tag used before a query has been resolved.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// A free-text music query and what is known about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicQuery {
    pub query: String,
    pub artist: Option<String>,
    pub title: Option<String>,
    pub confidence: f64,
    pub source: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl MusicQuery {
    /// Parse a free-text query into title/artist/source parts.
    pub fn parse(query: &str) -> Result<Self, DomainError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::EmptyQuery);
        }
        let request = parse_music_request(query);
        let title = (!request.title.is_empty()).then_some(request.title);
        Ok(Self {
            query: query.to_string(),
            artist: request.artist,
            title,
            confidence: 0.0,
            source: request
                .preferred_source
                .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            metadata: Map::new(),
        })
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// The platform the user asked for, if any.
    pub fn preferred_source(&self) -> Option<&str> {
        (self.source != UNKNOWN_SOURCE).then_some(self.source.as_str())
    }

    /// The term handed to search back-ends.
    pub fn search_term(&self) -> String {
        match (&self.title, &self.artist) {
            (Some(title), Some(artist)) => format!("{} {}", title, artist),
            (Some(title), None) => title.clone(),
            _ => self.query.clone(),
        }
    }

    /// Record a resolved track: source tag and the track details in metadata.
    pub fn resolved(mut self, track: &TrackInfo) -> Self {
        self.source = track.source.to_string();
        self.confidence = 1.0;
        self.metadata
            .insert("url".to_string(), Value::String(track.url.clone()));
        self.metadata
            .insert("resolved_title".to_string(), Value::String(track.title.clone()));
        self.metadata
            .insert("resolved_artist".to_string(), Value::String(track.artist.clone()));
        self.metadata
            .insert("duration_ms".to_string(), Value::from(track.duration_ms));
        if let Some(thumb) = &track.thumbnail {
            self.metadata
                .insert("thumbnail".to_string(), Value::String(thumb.clone()));
        }
        self
    }
}
