//! Domain layer for tunebridge
//!
//! This crate contains the rules and value objects for analysing chat
//! messages and describing music lookups. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Message analysis
//!
//! Each message is scored by four independent analyses (music intent,
//! sentiment, entities, intent) whose results are combined by
//! [`nlp::response::synthesize`] into an [`NlResponse`].
//!
//! ## Music lookup
//!
//! A free-text query is parsed into a [`MusicQuery`] and resolved to a
//! [`TrackInfo`] by one of the configured music sources.

pub mod config;
pub mod core;
pub mod music;
pub mod nlp;
pub mod stats;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::error::{DomainError, validate_threshold};
pub use music::{
    MusicQuery, MusicRequest, TrackInfo, TrackSource, extract_music_query, is_youtube_url,
    parse_music_request, thumbnail_url, track_from_url,
};
pub use nlp::{
    Classification, Entity, EntityAnalysis, Intent, IntentClassification, MUSIC_INTENT_THRESHOLD,
    MUSIC_KEYWORDS, MessageContext, MusicIntent, NlResponse, SentimentAnalysis, SentimentLabel,
    classify_by_keywords, cosine_similarity, synthesize,
};
pub use stats::PerformanceStats;
