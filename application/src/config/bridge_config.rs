//! Bridge parameters: thresholds, cache policy and call limits.
//!
//! These are application-layer concerns: the infrastructure config loader
//! maps the `[nlp]` and `[cache]` file sections onto [`BridgeConfig`].

use std::time::Duration;
use tunebridge_domain::{MUSIC_INTENT_THRESHOLD, MUSIC_KEYWORDS};

/// Runtime parameters for the message and search use cases.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Similarity at or above which a message is a music command.
    pub music_threshold: f64,
    /// Reference phrases for the music-intent similarity check.
    pub music_keywords: Vec<String>,
    /// Whether processed responses are cached.
    pub cache_enabled: bool,
    /// Lifetime of a cached response.
    pub cache_ttl: Duration,
    /// Upper bound on each model call; `None` waits indefinitely.
    pub model_timeout: Option<Duration>,
    /// Number of labels kept by mood/genre classification.
    pub top_k: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            music_threshold: MUSIC_INTENT_THRESHOLD,
            music_keywords: MUSIC_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            cache_enabled: true,
            cache_ttl: Duration::from_secs(3600),
            model_timeout: Some(Duration::from_secs(30)),
            top_k: 3,
        }
    }
}

impl BridgeConfig {
    // ==================== Builder Methods ====================

    pub fn with_music_threshold(mut self, threshold: f64) -> Self {
        self.music_threshold = threshold;
        self
    }

    pub fn with_music_keywords(mut self, keywords: Vec<String>) -> Self {
        self.music_keywords = keywords;
        self
    }

    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_model_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.model_timeout = timeout;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}
