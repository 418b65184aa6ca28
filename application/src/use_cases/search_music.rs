//! Search Music use case.
//!
//! Resolves a free-text query to one track by trying the configured sources
//! in order. A later source is only asked when every earlier one came back
//! empty (or failed). A source named in the query (`"... on youtube"`) is
//! moved to the front; a pasted video URL needs no search at all.

use crate::ports::event_logger::{EventLogger, InteractionEvent, NoEventLogger};
use crate::ports::music_source::MusicSource;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tunebridge_domain::{MusicQuery, TrackInfo, track_from_url};

/// A query together with the track it resolved to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MusicSearchResult {
    pub query: MusicQuery,
    pub track: TrackInfo,
}

/// Use case for searching music across sources.
pub struct SearchMusicUseCase {
    sources: Vec<Arc<dyn MusicSource>>,
    event_logger: Arc<dyn EventLogger>,
}

impl SearchMusicUseCase {
    /// Sources are tried in the given order.
    pub fn new(sources: Vec<Arc<dyn MusicSource>>) -> Self {
        Self {
            sources,
            event_logger: Arc::new(NoEventLogger),
        }
    }

    pub fn set_event_logger(&mut self, logger: Arc<dyn EventLogger>) {
        self.event_logger = logger;
    }

    /// Search for `query`. Returns `None` when nothing matched or the query
    /// is unusable.
    pub async fn execute(&self, query: &str) -> Option<MusicSearchResult> {
        let parsed = match MusicQuery::parse(query) {
            Ok(q) => q,
            Err(e) => {
                warn!("Error in music search: {}", e);
                return None;
            }
        };

        let target = parsed.title.as_deref().unwrap_or(&parsed.query);
        if let Some(track) = track_from_url(target) {
            info!("Using video URL directly: {}", track.url);
            return Some(self.finish(parsed, track));
        }

        let term = parsed.search_term();
        for source in self.ordered_sources(parsed.preferred_source()) {
            debug!("Searching {} for '{}'", source.source(), term);
            match source.search(&term).await {
                Ok(Some(track)) => {
                    info!("Found '{}' by {} on {}", track.title, track.artist, track.source);
                    return Some(self.finish(parsed, track));
                }
                Ok(None) => debug!("No match on {}", source.source()),
                Err(e) => warn!("{} search error: {}", source.source(), e),
            }
        }

        info!("No source matched '{}'", term);
        None
    }

    /// Configured order, with the user's preferred platform moved first.
    fn ordered_sources(&self, preferred: Option<&str>) -> Vec<&Arc<dyn MusicSource>> {
        let mut ordered: Vec<_> = self.sources.iter().collect();
        if let Some(pref) = preferred {
            // stable: keeps the configured order within each group
            ordered.sort_by_key(|s| s.source().as_str() != pref);
        }
        ordered
    }

    fn finish(&self, query: MusicQuery, track: TrackInfo) -> MusicSearchResult {
        let query = query.resolved(&track);
        self.event_logger.log(InteractionEvent::new(
            "music_search",
            serde_json::json!({
                "query": query.query,
                "source": track.source,
                "title": track.title,
                "artist": track.artist,
                "url": track.url,
            }),
        ));
        MusicSearchResult { query, track }
    }
}
