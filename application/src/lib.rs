//! Application layer for tunebridge
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod bridge;
pub mod config;
pub mod models;
pub mod ports;
pub mod stats;
pub mod use_cases;

// Re-export commonly used types
pub use bridge::TuneBridge;
pub use config::BridgeConfig;
pub use models::ModelSet;
pub use ports::{
    event_logger::{EventLogger, InteractionEvent, NoEventLogger},
    inference::{
        AudioClassifier, EntityTagger, InferenceError, IntentClassifier, SentimentAnalyzer,
        TextClassifier, TextEmbedder, silent_wav_clip,
    },
    music_source::{MusicSource, SearchError},
    response_cache::{CacheError, NoCache, ResponseCache},
};
pub use stats::SharedStats;
pub use use_cases::classify::{ClassifyError, ClassifyUseCase};
pub use use_cases::initialize::{InitReport, InitializeModelsUseCase, ModelStatus};
pub use use_cases::process_message::{ProcessMessageUseCase, cache_key};
pub use use_cases::search_music::{MusicSearchResult, SearchMusicUseCase};
