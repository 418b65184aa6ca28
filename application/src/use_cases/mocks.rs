//! Test doubles shared by the use case tests.

use crate::models::ModelSet;
use crate::ports::event_logger::{EventLogger, InteractionEvent};
use crate::ports::inference::{
    AudioClassifier, EntityTagger, InferenceError, IntentClassifier, SentimentAnalyzer,
    TextClassifier, TextEmbedder,
};
use crate::ports::music_source::{MusicSource, SearchError};
use crate::ports::response_cache::{CacheError, ResponseCache};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tunebridge_domain::{
    Classification, Entity, EntityAnalysis, IntentClassification, MUSIC_KEYWORDS,
    SentimentAnalysis, SentimentLabel, TrackInfo, TrackSource, classify_by_keywords,
};

// ==================== Models ====================

/// Always positive with high confidence.
pub struct HappySentiment;

#[async_trait]
impl SentimentAnalyzer for HappySentiment {
    fn model_name(&self) -> &str {
        "mock-sentiment"
    }

    async fn analyze(&self, _text: &str) -> Result<SentimentAnalysis, InferenceError> {
        Ok(SentimentAnalysis::new(SentimentLabel::Positive, 0.9))
    }
}

/// Embeds text as a keyword-indicator vector over [`MUSIC_KEYWORDS`].
///
/// Keywords themselves become one-hot vectors, so a message containing a
/// single keyword scores exactly 1.0 and a message with none scores 0.0.
#[derive(Default)]
pub struct KeywordEmbedder {
    pub calls: AtomicUsize,
}

#[async_trait]
impl TextEmbedder for KeywordEmbedder {
    fn model_name(&self) -> &str {
        "mock-embedder"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|t| {
                let lower = t.to_lowercase();
                MUSIC_KEYWORDS
                    .iter()
                    .map(|kw| if lower.contains(kw) { 1.0 } else { 0.0 })
                    .collect()
            })
            .collect())
    }
}

/// Never answers within any sane model timeout.
pub struct SlowSentiment;

#[async_trait]
impl SentimentAnalyzer for SlowSentiment {
    fn model_name(&self) -> &str {
        "mock-slow-sentiment"
    }

    async fn analyze(&self, _text: &str) -> Result<SentimentAnalysis, InferenceError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(SentimentAnalysis::new(SentimentLabel::Positive, 0.9))
    }
}

pub struct FailingSentiment;

#[async_trait]
impl SentimentAnalyzer for FailingSentiment {
    fn model_name(&self) -> &str {
        "mock-failing-sentiment"
    }

    async fn analyze(&self, _text: &str) -> Result<SentimentAnalysis, InferenceError> {
        Err(InferenceError::ModelLoading("mock-failing-sentiment".to_string()))
    }
}

pub struct FailingEmbedder;

#[async_trait]
impl TextEmbedder for FailingEmbedder {
    fn model_name(&self) -> &str {
        "mock-failing-embedder"
    }

    async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, InferenceError> {
        Err(InferenceError::ConnectionError("embedder offline".to_string()))
    }
}

/// Tags a single performer.
pub struct FixedTagger;

#[async_trait]
impl EntityTagger for FixedTagger {
    fn model_name(&self) -> &str {
        "mock-ner"
    }

    async fn tag(&self, text: &str) -> Result<EntityAnalysis, InferenceError> {
        Ok(EntityAnalysis {
            entities: vec![Entity {
                text: "Drake".to_string(),
                label: "PER".to_string(),
                confidence: 0.99,
            }],
            tokens: text.split_whitespace().map(str::to_string).collect(),
        })
    }
}

pub struct FailingTagger;

#[async_trait]
impl EntityTagger for FailingTagger {
    fn model_name(&self) -> &str {
        "mock-failing-ner"
    }

    async fn tag(&self, _text: &str) -> Result<EntityAnalysis, InferenceError> {
        Err(InferenceError::Timeout)
    }
}

pub struct KeywordIntent;

#[async_trait]
impl IntentClassifier for KeywordIntent {
    fn model_name(&self) -> &str {
        "keywords"
    }

    async fn classify(&self, text: &str) -> Result<IntentClassification, InferenceError> {
        Ok(classify_by_keywords(text))
    }
}

pub struct FailingIntent;

#[async_trait]
impl IntentClassifier for FailingIntent {
    fn model_name(&self) -> &str {
        "mock-failing-intent"
    }

    async fn classify(&self, _text: &str) -> Result<IntentClassification, InferenceError> {
        Err(InferenceError::RequestFailed {
            status: 500,
            message: "internal error".to_string(),
        })
    }
}

pub struct FixedMood;

#[async_trait]
impl TextClassifier for FixedMood {
    fn model_name(&self) -> &str {
        "mock-mood"
    }

    async fn classify(&self, _text: &str) -> Result<Vec<Classification>, InferenceError> {
        Ok(vec![
            Classification::new("joy", 0.05),
            Classification::new("sadness", 0.85),
            Classification::new("neutral", 0.10),
        ])
    }
}

pub struct FixedAudio;

#[async_trait]
impl AudioClassifier for FixedAudio {
    fn model_name(&self) -> &str {
        "mock-audio"
    }

    async fn classify(&self, _audio: &[u8]) -> Result<Vec<Classification>, InferenceError> {
        Ok(vec![
            Classification::new("Music", 0.4),
            Classification::new("Hip hop music", 0.6),
        ])
    }
}

/// Rejects every clip, counting how often it was asked.
#[derive(Default)]
pub struct FailingAudio {
    pub calls: AtomicUsize,
    pub last_clip_len: AtomicUsize,
}

#[async_trait]
impl AudioClassifier for FailingAudio {
    fn model_name(&self) -> &str {
        "mock-failing-audio"
    }

    async fn classify(&self, audio: &[u8]) -> Result<Vec<Classification>, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_clip_len.store(audio.len(), Ordering::SeqCst);
        Err(InferenceError::ModelLoading("mock-failing-audio".to_string()))
    }
}

pub fn model_set() -> ModelSet {
    model_set_with_embedder(Arc::new(KeywordEmbedder::default()))
}

pub fn model_set_with_embedder(embedder: Arc<dyn TextEmbedder>) -> ModelSet {
    ModelSet::new(
        Arc::new(HappySentiment),
        embedder,
        Arc::new(FixedTagger),
        Arc::new(KeywordIntent),
    )
}

// ==================== Cache ====================

#[derive(Default)]
pub struct MemoryCache {
    entries: tokio::sync::Mutex<HashMap<String, (String, Duration)>>,
}

impl MemoryCache {
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.entries.lock().await.get(key).map(|(_, ttl)| *ttl)
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.lock().await.get(key).map(|(v, _)| v.clone()))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), (value, ttl));
        Ok(())
    }
}

/// Backend that is down for both reads and writes.
#[derive(Default)]
pub struct FailingCache {
    pub gets: AtomicUsize,
    pub sets: AtomicUsize,
}

#[async_trait]
impl ResponseCache for FailingCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Unavailable("connection refused".to_string()))
    }
}

// ==================== Music sources ====================

pub fn sample_track(source: TrackSource) -> TrackInfo {
    TrackInfo {
        title: "Bandit".to_string(),
        artist: "Juice WRLD".to_string(),
        url: format!("https://{}.example/bandit", source),
        source,
        duration_ms: 189_000,
        thumbnail: None,
    }
}

enum Outcome {
    Hit(TrackInfo),
    Miss,
    Fail,
}

pub struct StaticSource {
    source: TrackSource,
    outcome: Outcome,
    pub calls: AtomicUsize,
    pub last_term: Mutex<String>,
}

impl StaticSource {
    fn new(source: TrackSource, outcome: Outcome) -> Self {
        Self {
            source,
            outcome,
            calls: AtomicUsize::new(0),
            last_term: Mutex::new(String::new()),
        }
    }

    pub fn hit(track: TrackInfo) -> Self {
        Self::new(track.source, Outcome::Hit(track))
    }

    pub fn miss(source: TrackSource) -> Self {
        Self::new(source, Outcome::Miss)
    }

    pub fn failing(source: TrackSource) -> Self {
        Self::new(source, Outcome::Fail)
    }
}

#[async_trait]
impl MusicSource for StaticSource {
    fn source(&self) -> TrackSource {
        self.source
    }

    async fn search(&self, term: &str) -> Result<Option<TrackInfo>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_term.lock().unwrap() = term.to_string();
        match &self.outcome {
            Outcome::Hit(track) => Ok(Some(track.clone())),
            Outcome::Miss => Ok(None),
            Outcome::Fail => Err(SearchError::RequestFailed("HTTP 503".to_string())),
        }
    }
}

// ==================== Event logger ====================

#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl RecordingLogger {
    pub fn events(&self) -> Vec<(&'static str, serde_json::Value)> {
        self.events.lock().unwrap().clone()
    }
}

impl EventLogger for RecordingLogger {
    fn log(&self, event: InteractionEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}
