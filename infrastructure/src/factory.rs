//! Builds a ready-to-use [`TuneBridge`] from the file configuration.

use crate::cache::InMemoryResponseCache;
use crate::config::FileConfig;
use crate::inference::{
    HfAudioClassifier, HfEntityTagger, HfIntentClassifier, HfSentimentAnalyzer, HfTextClassifier,
    HfTextEmbedder, InferenceClient,
};
use crate::logging::JsonlEventLogger;
use crate::music::{SpotifyCatalog, SpotifySettings, YtDlpSource};
use crate::nlp::KeywordIntentClassifier;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use tunebridge_application::{
    InferenceError, IntentClassifier, ModelSet, MusicSource, NoCache, ResponseCache, SearchError,
    TuneBridge,
};

#[derive(Error, Debug)]
pub enum FactoryError {
    #[error("Inference client: {0}")]
    Inference(#[from] InferenceError),

    #[error("Music source: {0}")]
    Source(#[from] SearchError),
}

/// Model adapters for the configured endpoints.
pub fn build_models(config: &FileConfig) -> Result<ModelSet, FactoryError> {
    let inference = &config.inference;
    let timeout = match inference.timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    let token = inference.resolve_token();
    if token.is_none() {
        warn!(
            "No inference API token (set {}); requests may be rate limited",
            inference.api_token_env
        );
    }
    let client = InferenceClient::new(&inference.base_url, token, timeout)?;
    let ids = &inference.models;

    let intent: Arc<dyn IntentClassifier> = if config.nlp.uses_remote_intent() {
        Arc::new(HfIntentClassifier::new(client.clone(), &ids.intent))
    } else {
        Arc::new(KeywordIntentClassifier)
    };

    let mut models = ModelSet::new(
        Arc::new(HfSentimentAnalyzer::new(client.clone(), &ids.sentiment)),
        Arc::new(HfTextEmbedder::new(client.clone(), &ids.embedding)),
        Arc::new(HfEntityTagger::new(client.clone(), &ids.entities)),
        intent,
    );
    if let Some(mood) = ids.mood() {
        models = models.with_mood(Arc::new(HfTextClassifier::new(client.clone(), mood)));
    }
    if let Some(audio) = ids.audio_genre() {
        models = models.with_audio(Arc::new(HfAudioClassifier::new(client, audio)));
    }
    Ok(models)
}

/// Enabled music sources, Spotify first.
pub fn build_sources(config: &FileConfig) -> Result<Vec<Arc<dyn MusicSource>>, FactoryError> {
    let mut sources: Vec<Arc<dyn MusicSource>> = Vec::new();

    if config.spotify.enabled {
        match config.spotify.resolve_credentials() {
            Some((client_id, client_secret)) => {
                sources.push(Arc::new(SpotifyCatalog::new(SpotifySettings {
                    client_id,
                    client_secret,
                    market: config.spotify.market.clone(),
                    api_base_url: config.spotify.api_base_url.trim_end_matches('/').to_string(),
                    token_url: config.spotify.token_url.clone(),
                    timeout: Duration::from_secs(config.spotify.timeout_secs.max(1)),
                })?));
            }
            None => warn!(
                "Spotify enabled but {} / {} are not set; skipping",
                config.spotify.client_id_env, config.spotify.client_secret_env
            ),
        }
    }

    if config.youtube.enabled {
        sources.push(Arc::new(build_downloader(config)));
    }

    Ok(sources)
}

/// The yt-dlp adapter, also used directly for audio downloads.
pub fn build_downloader(config: &FileConfig) -> YtDlpSource {
    YtDlpSource::new(
        &config.youtube.binary,
        Duration::from_secs(config.youtube.timeout_secs.max(1)),
    )
}

pub fn build_cache(config: &FileConfig) -> Arc<dyn ResponseCache> {
    if config.cache.enabled {
        Arc::new(InMemoryResponseCache::new(config.cache.max_entries))
    } else {
        Arc::new(NoCache)
    }
}

/// Wire every adapter into a [`TuneBridge`].
pub fn build_bridge(config: &FileConfig) -> Result<TuneBridge, FactoryError> {
    let models = build_models(config)?;
    let sources = build_sources(config)?;
    info!(
        sources = sources.len(),
        cache = config.cache.enabled,
        "building bridge"
    );

    let mut bridge = TuneBridge::new(
        models,
        sources,
        build_cache(config),
        config.to_bridge_config(),
    );
    if let Some(path) = &config.logging.event_log
        && let Some(logger) = JsonlEventLogger::new(path)
    {
        bridge = bridge.with_event_logger(Arc::new(logger));
    }
    Ok(bridge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunebridge_domain::TrackSource;

    #[test]
    fn test_keyword_backend_by_default() {
        let models = build_models(&FileConfig::default()).unwrap();
        assert_eq!(models.intent.model_name(), "keyword-rules");
        assert!(models.mood.is_some());
        assert!(models.audio.is_some());
    }

    #[test]
    fn test_remote_backend_and_disabled_optional_models() {
        let mut config = FileConfig::default();
        config.nlp.intent_backend = "remote".to_string();
        config.inference.models.mood = String::new();
        config.inference.models.audio_genre = " ".to_string();

        let models = build_models(&config).unwrap();
        assert_eq!(models.intent.model_name(), "facebook/bart-large-mnli");
        assert!(models.mood.is_none());
        assert!(models.audio.is_none());
    }

    #[test]
    fn test_sources_follow_config() {
        let mut config = FileConfig::default();
        config.spotify.client_id = Some("id".to_string());
        config.spotify.client_secret = Some("secret".to_string());

        let sources = build_sources(&config).unwrap();
        let kinds: Vec<_> = sources.iter().map(|s| s.source()).collect();
        assert_eq!(kinds, vec![TrackSource::Spotify, TrackSource::YouTube]);

        config.youtube.enabled = false;
        assert_eq!(build_sources(&config).unwrap().len(), 1);

        config.spotify.enabled = false;
        assert!(build_sources(&config).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_build_bridge_with_event_log() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FileConfig::default();
        config.spotify.enabled = false;
        config.logging.event_log = Some(dir.path().join("events.jsonl"));

        let bridge = build_bridge(&config).unwrap();
        assert_eq!(bridge.performance_stats().total_requests, 0);
        assert!(dir.path().join("events.jsonl").exists());
    }
}
