//! Infrastructure layer for tunebridge
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer (hosted models, music catalogs, response cache,
//! event log) plus configuration file loading.

pub mod cache;
pub mod config;
pub mod factory;
pub mod inference;
pub mod logging;
pub mod music;
pub mod nlp;

// Re-export commonly used types
pub use cache::InMemoryResponseCache;
pub use config::{ConfigLoader, FileConfig};
pub use factory::{
    FactoryError, build_bridge, build_cache, build_downloader, build_models, build_sources,
};
pub use inference::{
    HfAudioClassifier, HfEntityTagger, HfIntentClassifier, HfSentimentAnalyzer, HfTextClassifier,
    HfTextEmbedder, InferenceClient,
};
pub use logging::JsonlEventLogger;
pub use music::{DownloadError, SpotifyCatalog, SpotifySettings, YtDlpSource};
pub use nlp::KeywordIntentClassifier;
