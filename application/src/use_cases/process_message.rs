//! Process Message use case.
//!
//! Runs one chat message through the model ensemble and synthesizes a reply.
//!
//! 1. Look up the response cache (`nlp:<sha256 of message>`)
//! 2. Run music intent, sentiment, entities and intent concurrently
//! 3. Replace any failed call with an empty result and keep going
//! 4. Synthesize, record latency, cache the response
//!
//! The host never sees an error: any failure turns into
//! [`NlResponse::fallback`].

use crate::config::BridgeConfig;
use crate::models::ModelSet;
use crate::ports::event_logger::{EventLogger, InteractionEvent, NoEventLogger};
use crate::ports::inference::InferenceError;
use crate::ports::response_cache::ResponseCache;
use crate::stats::SharedStats;
use sha2::{Digest, Sha256};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};
use tunebridge_domain::core::string::truncate;
use tunebridge_domain::{
    DomainError, EntityAnalysis, IntentClassification, MessageContext, MusicIntent, NlResponse,
    SentimentAnalysis, cosine_similarity, extract_music_query, synthesize,
};

/// Errors that abort processing (and produce the fallback reply).
#[derive(Error, Debug)]
pub enum ProcessMessageError {
    #[error("Invalid message: {0}")]
    InvalidMessage(#[from] DomainError),

    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Cache key for a message: `nlp:` + hex SHA-256 of the text.
pub fn cache_key(message: &str) -> String {
    format!("nlp:{:x}", Sha256::digest(message.as_bytes()))
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Use case for processing a chat message.
pub struct ProcessMessageUseCase {
    models: ModelSet,
    cache: Arc<dyn ResponseCache>,
    stats: SharedStats,
    config: BridgeConfig,
    event_logger: Arc<dyn EventLogger>,
    keyword_embeddings: OnceCell<Vec<Vec<f32>>>,
}

impl ProcessMessageUseCase {
    pub fn new(
        models: ModelSet,
        cache: Arc<dyn ResponseCache>,
        stats: SharedStats,
        config: BridgeConfig,
    ) -> Self {
        Self {
            models,
            cache,
            stats,
            config,
            event_logger: Arc::new(NoEventLogger),
            keyword_embeddings: OnceCell::new(),
        }
    }

    /// Set an event logger (mutator).
    pub fn set_event_logger(&mut self, logger: Arc<dyn EventLogger>) {
        self.event_logger = logger;
    }

    /// Encode the music keywords once; later calls reuse the vectors.
    pub async fn prepare_keyword_embeddings(&self) -> Result<usize, InferenceError> {
        let vectors = self
            .keyword_embeddings
            .get_or_try_init(|| async {
                debug!(
                    "Encoding {} music keywords with {}",
                    self.config.music_keywords.len(),
                    self.models.embedder.model_name()
                );
                let vectors = self.models.embedder.embed(&self.config.music_keywords).await?;
                if vectors.len() != self.config.music_keywords.len() {
                    return Err(InferenceError::InvalidResponse(format!(
                        "expected {} keyword embeddings, got {}",
                        self.config.music_keywords.len(),
                        vectors.len()
                    )));
                }
                Ok(vectors)
            })
            .await?;
        Ok(vectors.len())
    }

    /// Process a message. Never fails; errors yield the fallback reply.
    pub async fn execute(&self, ctx: &MessageContext) -> NlResponse {
        let start = Instant::now();
        match self.try_execute(ctx, start).await {
            Ok(response) => response,
            Err(e) => {
                error!("Error in natural language processing: {}", e);
                NlResponse::fallback(elapsed_ms(start))
            }
        }
    }

    async fn try_execute(
        &self,
        ctx: &MessageContext,
        start: Instant,
    ) -> Result<NlResponse, ProcessMessageError> {
        ctx.validate()?;
        let message = ctx.message.as_str();
        info!(
            "Processing message from user {} in {}/{}: {}",
            ctx.user_id,
            ctx.guild_id,
            ctx.channel_id,
            truncate(message, 100)
        );

        let key = cache_key(message);
        if self.config.cache_enabled
            && let Some(cached) = self.lookup_cache(&key).await
        {
            return Ok(cached.with_processing_time(elapsed_ms(start)));
        }

        let (music, sentiment, entities, intent) = tokio::join!(
            self.bounded("music_intent", self.detect_music_intent(message)),
            self.bounded("sentiment", self.models.sentiment.analyze(message)),
            self.bounded("entities", self.models.entities.tag(message)),
            self.bounded("intent", self.models.intent.classify(message)),
        );

        let response = synthesize(music.as_ref(), sentiment.as_ref(), intent.as_ref())
            .with_processing_time(elapsed_ms(start));

        if self.config.cache_enabled {
            let encoded = serde_json::to_string(&response)?;
            if let Err(e) = self.cache.set(&key, encoded, self.config.cache_ttl).await {
                warn!("Failed to cache response: {}", e);
            }
        }

        self.stats.record_request(response.processing_time_ms);
        self.log_processed(ctx, &response, sentiment.as_ref(), entities.as_ref(), intent.as_ref());

        debug!(
            "Processed in {:.1}ms (music: {}, confidence: {:.3})",
            response.processing_time_ms, response.is_music_command, response.confidence
        );
        Ok(response)
    }

    /// Cached response for `key`, counting the lookup. Unreadable entries
    /// and cache failures count as misses.
    async fn lookup_cache(&self, key: &str) -> Option<NlResponse> {
        let cached = match self.cache.get(key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!("Cache lookup failed: {}", e);
                None
            }
        };
        let parsed = cached.and_then(|raw| match serde_json::from_str::<NlResponse>(&raw) {
            Ok(r) => Some(r),
            Err(e) => {
                warn!("Discarding unreadable cache entry {}: {}", key, e);
                None
            }
        });
        self.stats.record_cache_lookup(parsed.is_some());
        if parsed.is_some() {
            debug!("Cache hit for {}", key);
        }
        parsed
    }

    /// Run one model call under the configured timeout; failures become `None`.
    async fn bounded<T, F>(&self, role: &str, call: F) -> Option<T>
    where
        F: Future<Output = Result<T, InferenceError>>,
    {
        let result = match self.config.model_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(r) => r,
                Err(_) => Err(InferenceError::Timeout),
            },
            None => call.await,
        };
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("{} analysis failed, continuing without it: {}", role, e);
                None
            }
        }
    }

    /// Compare the message embedding with the keyword embeddings.
    async fn detect_music_intent(&self, message: &str) -> Result<MusicIntent, InferenceError> {
        self.prepare_keyword_embeddings().await?;
        let keyword_vectors = self
            .keyword_embeddings
            .get()
            .ok_or_else(|| InferenceError::Other("keyword embeddings missing".to_string()))?;

        let message_vector = self
            .models
            .embedder
            .embed(&[message.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError::InvalidResponse("empty embedding".to_string()))?;

        let scores = keyword_vectors
            .iter()
            .map(|k| cosine_similarity(&message_vector, k))
            .collect();

        Ok(MusicIntent::from_scores(
            scores,
            self.config.music_threshold,
            extract_music_query(message),
        ))
    }

    fn log_processed(
        &self,
        ctx: &MessageContext,
        response: &NlResponse,
        sentiment: Option<&SentimentAnalysis>,
        entities: Option<&EntityAnalysis>,
        intent: Option<&IntentClassification>,
    ) {
        self.event_logger.log(InteractionEvent::new(
            "message_processed",
            serde_json::json!({
                "user_id": ctx.user_id,
                "guild_id": ctx.guild_id,
                "channel_id": ctx.channel_id,
                "is_music_command": response.is_music_command,
                "extracted_query": response.extracted_query,
                "confidence": response.confidence,
                "processing_time_ms": response.processing_time_ms,
                "sentiment": sentiment.map(|s| s.label),
                "primary_intent": intent.map(|i| i.primary_intent),
                "entity_labels": entities.map(|e| e.labels()).unwrap_or_default(),
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::response_cache::NoCache;
    use crate::use_cases::mocks::{
        FailingCache, FailingEmbedder, FailingIntent, FailingSentiment, FailingTagger,
        FixedTagger, HappySentiment, KeywordEmbedder, KeywordIntent, MemoryCache,
        RecordingLogger, SlowSentiment, model_set, model_set_with_embedder,
    };
    use std::sync::atomic::Ordering;
    use std::time::Duration;
    use tunebridge_domain::Intent;
    use tunebridge_domain::nlp::response::{ENSEMBLE_MODEL, FALLBACK_REPLY, contextual_response};
    use tunebridge_domain::nlp::sentiment::ENERGY_REPLY;

    const PLAY_REPLY_END: &str = "for you right away!";

    fn use_case(models: ModelSet) -> (ProcessMessageUseCase, Arc<MemoryCache>, SharedStats) {
        let cache = Arc::new(MemoryCache::default());
        let stats = SharedStats::new();
        let uc = ProcessMessageUseCase::new(
            models,
            cache.clone(),
            stats.clone(),
            BridgeConfig::default(),
        );
        (uc, cache, stats)
    }

    #[test]
    fn test_cache_key_is_stable_hex() {
        let key = cache_key("play lofi");
        assert_eq!(key, cache_key("play lofi"));
        assert_ne!(key, cache_key("play jazz"));
        assert!(key.starts_with("nlp:"));
        assert_eq!(key.len(), 4 + 64);
    }

    #[tokio::test]
    async fn test_music_command_reply() {
        let (uc, _, stats) = use_case(model_set());
        let r = uc
            .execute(&MessageContext::local("play bohemian rhapsody please"))
            .await;

        assert!(r.is_music_command);
        assert_eq!(r.extracted_query.as_deref(), Some("bohemian rhapsody"));
        assert_eq!(r.model_used, ENSEMBLE_MODEL);
        assert!((r.confidence - 1.0).abs() < 1e-9);
        let text = r.response.unwrap();
        assert!(text.contains("**bohemian rhapsody**"));
        assert!(text.ends_with(ENERGY_REPLY));
        assert_eq!(stats.snapshot().total_requests, 1);
    }

    #[tokio::test]
    async fn test_below_threshold_is_not_music() {
        let (uc, _, _) = use_case(model_set());
        let r = uc.execute(&MessageContext::local("tell me a joke")).await;
        assert!(!r.is_music_command);
        assert_eq!(r.confidence, 0.0);
        assert!(r.response.unwrap().starts_with("😄"));
    }

    #[tokio::test]
    async fn test_failed_model_is_replaced_by_default() {
        let (uc, _, _) = use_case(model_set_with_embedder(Arc::new(FailingEmbedder)));
        let r = uc
            .execute(&MessageContext::local("play some music now"))
            .await;

        // Music intent failed: no music command, reply falls back to intent
        assert!(!r.is_music_command);
        assert_eq!(r.extracted_query, None);
        assert_eq!(r.model_used, ENSEMBLE_MODEL);
        assert!(!r.is_fallback());
    }

    #[tokio::test]
    async fn test_empty_message_gives_fallback() {
        let (uc, cache, stats) = use_case(model_set());
        let r = uc.execute(&MessageContext::local("   ")).await;
        assert!(r.is_fallback());
        assert_eq!(r.response.as_deref(), Some(FALLBACK_REPLY));
        assert_eq!(cache.len().await, 0);
        assert_eq!(stats.snapshot().total_requests, 0);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_models() {
        let embedder = Arc::new(KeywordEmbedder::default());
        let (uc, cache, stats) = use_case(model_set_with_embedder(embedder.clone()));
        let ctx = MessageContext::local("play lofi beats");

        let first = uc.execute(&ctx).await;
        let calls_after_first = embedder.calls.load(Ordering::SeqCst);
        let second = uc.execute(&ctx).await;

        assert_eq!(embedder.calls.load(Ordering::SeqCst), calls_after_first);
        assert_eq!(first.response, second.response);
        assert_eq!(cache.len().await, 1);

        let snap = stats.snapshot();
        assert_eq!(snap.total_requests, 1);
        assert_eq!(snap.cache_lookups, 2);
        assert_eq!(snap.cache_hits, 1);
    }

    #[tokio::test]
    async fn test_cache_entry_uses_configured_ttl() {
        let (uc, cache, _) = use_case(model_set());
        uc.execute(&MessageContext::local("play lofi")).await;
        assert_eq!(
            cache.ttl_of(&cache_key("play lofi")).await,
            Some(Duration::from_secs(3600))
        );
    }

    #[tokio::test]
    async fn test_keyword_embeddings_computed_once() {
        let embedder = Arc::new(KeywordEmbedder::default());
        let uc = ProcessMessageUseCase::new(
            model_set_with_embedder(embedder.clone()),
            Arc::new(NoCache),
            SharedStats::new(),
            BridgeConfig::default(),
        );
        assert_eq!(uc.prepare_keyword_embeddings().await.unwrap(), 14);
        uc.execute(&MessageContext::local("play a")).await;
        uc.execute(&MessageContext::local("play b")).await;
        // one keyword batch + one call per message
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_logs_processed_event() {
        let logger = Arc::new(RecordingLogger::default());
        let (mut uc, _, _) = use_case(model_set());
        uc.set_event_logger(logger.clone());
        uc.execute(&MessageContext::new("play drake", "u1", "g1", "c1"))
            .await;

        let events = logger.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, "message_processed");
        assert_eq!(events[0].1["user_id"], "u1");
        assert_eq!(events[0].1["is_music_command"], true);
        assert_eq!(events[0].1["entity_labels"][0], "PER");
    }

    #[tokio::test]
    async fn test_cache_failures_do_not_block_reply() {
        let cache = Arc::new(FailingCache::default());
        let stats = SharedStats::new();
        let uc = ProcessMessageUseCase::new(
            model_set(),
            cache.clone(),
            stats.clone(),
            BridgeConfig::default(),
        );

        let r = uc.execute(&MessageContext::local("play lofi beats")).await;

        assert!(r.is_music_command);
        assert_eq!(r.model_used, ENSEMBLE_MODEL);
        assert!(!r.is_fallback());
        assert_eq!(cache.gets.load(Ordering::SeqCst), 1);
        assert_eq!(cache.sets.load(Ordering::SeqCst), 1);

        let snap = stats.snapshot();
        assert_eq!(snap.total_requests, 1);
        assert_eq!(snap.cache_lookups, 1);
        assert_eq!(snap.cache_hits, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_model_times_out() {
        let models = ModelSet::new(
            Arc::new(SlowSentiment),
            Arc::new(KeywordEmbedder::default()),
            Arc::new(FixedTagger),
            Arc::new(KeywordIntent),
        );
        let config = BridgeConfig::default().with_model_timeout(Some(Duration::from_millis(50)));
        let uc = ProcessMessageUseCase::new(models, Arc::new(NoCache), SharedStats::new(), config);

        let r = uc.execute(&MessageContext::local("play lofi beats")).await;

        assert!(r.is_music_command);
        assert_eq!(r.model_used, ENSEMBLE_MODEL);
        let text = r.response.unwrap();
        assert!(text.ends_with(PLAY_REPLY_END));
        assert!(!text.contains(ENERGY_REPLY));
    }

    #[tokio::test]
    async fn test_failed_sentiment_drops_empathy() {
        let models = ModelSet::new(
            Arc::new(FailingSentiment),
            Arc::new(KeywordEmbedder::default()),
            Arc::new(FixedTagger),
            Arc::new(KeywordIntent),
        );
        let logger = Arc::new(RecordingLogger::default());
        let (mut uc, _, _) = use_case(models);
        uc.set_event_logger(logger.clone());

        let r = uc.execute(&MessageContext::local("play lofi beats")).await;

        assert!(r.is_music_command);
        assert_eq!(r.model_used, ENSEMBLE_MODEL);
        assert!(r.response.unwrap().ends_with(PLAY_REPLY_END));
        assert!(logger.events()[0].1["sentiment"].is_null());
    }

    #[tokio::test]
    async fn test_failed_entities_leave_labels_empty() {
        let models = ModelSet::new(
            Arc::new(HappySentiment),
            Arc::new(KeywordEmbedder::default()),
            Arc::new(FailingTagger),
            Arc::new(KeywordIntent),
        );
        let logger = Arc::new(RecordingLogger::default());
        let (mut uc, _, _) = use_case(models);
        uc.set_event_logger(logger.clone());

        let r = uc.execute(&MessageContext::local("play drake")).await;

        assert!(r.is_music_command);
        assert_eq!(r.model_used, ENSEMBLE_MODEL);
        assert!(r.response.unwrap().ends_with(ENERGY_REPLY));
        let events = logger.events();
        assert_eq!(events[0].1["entity_labels"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_failed_intent_uses_general_reply() {
        let models = ModelSet::new(
            Arc::new(HappySentiment),
            Arc::new(KeywordEmbedder::default()),
            Arc::new(FixedTagger),
            Arc::new(FailingIntent),
        );
        let (uc, _, _) = use_case(models);

        let r = uc.execute(&MessageContext::local("tell me a joke")).await;

        assert!(!r.is_music_command);
        assert_eq!(r.model_used, ENSEMBLE_MODEL);
        assert_eq!(
            r.response.as_deref(),
            Some(contextual_response(Intent::General))
        );
    }
}
