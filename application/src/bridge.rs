//! The host-facing facade.
//!
//! A chat bot talks to [`TuneBridge`] through three entry points:
//! [`initialize`](TuneBridge::initialize),
//! [`process_message`](TuneBridge::process_message) and
//! [`search_music`](TuneBridge::search_music).

use crate::config::BridgeConfig;
use crate::models::ModelSet;
use crate::ports::event_logger::EventLogger;
use crate::ports::music_source::MusicSource;
use crate::ports::response_cache::ResponseCache;
use crate::stats::SharedStats;
use crate::use_cases::classify::{ClassifyError, ClassifyUseCase};
use crate::use_cases::initialize::{InitReport, InitializeModelsUseCase, ModelStatus};
use crate::use_cases::process_message::ProcessMessageUseCase;
use crate::use_cases::search_music::{MusicSearchResult, SearchMusicUseCase};
use std::sync::Arc;
use tunebridge_domain::{Classification, MessageContext, NlResponse, PerformanceStats};

pub struct TuneBridge {
    initialize: InitializeModelsUseCase,
    process: ProcessMessageUseCase,
    search: SearchMusicUseCase,
    classify: ClassifyUseCase,
    stats: SharedStats,
}

impl TuneBridge {
    /// Wire the use cases. `sources` are searched in the given order.
    pub fn new(
        models: ModelSet,
        sources: Vec<Arc<dyn MusicSource>>,
        cache: Arc<dyn ResponseCache>,
        config: BridgeConfig,
    ) -> Self {
        let stats = SharedStats::new();
        let classify =
            ClassifyUseCase::new(models.mood.clone(), models.audio.clone(), config.top_k);
        Self {
            initialize: InitializeModelsUseCase::new(models.clone()),
            process: ProcessMessageUseCase::new(models, cache, stats.clone(), config),
            search: SearchMusicUseCase::new(sources),
            classify,
            stats,
        }
    }

    /// Create with an interaction event logger.
    pub fn with_event_logger(mut self, logger: Arc<dyn EventLogger>) -> Self {
        self.process.set_event_logger(logger.clone());
        self.search.set_event_logger(logger);
        self
    }

    /// Warm up all models and pre-compute the music keyword embeddings.
    pub async fn initialize(&self) -> InitReport {
        let mut report = self.initialize.execute().await;
        let keywords = match self.process.prepare_keyword_embeddings().await {
            Ok(count) => ModelStatus {
                role: "music_keywords",
                model: format!("{} phrases", count),
                ready: true,
                error: None,
            },
            Err(e) => ModelStatus {
                role: "music_keywords",
                model: "keyword embeddings".to_string(),
                ready: false,
                error: Some(e.to_string()),
            },
        };
        report.push(keywords);
        report
    }

    pub async fn process_message(&self, ctx: &MessageContext) -> NlResponse {
        self.process.execute(ctx).await
    }

    pub async fn search_music(&self, query: &str) -> Option<MusicSearchResult> {
        self.search.execute(query).await
    }

    pub async fn detect_mood(&self, text: &str) -> Result<Vec<Classification>, ClassifyError> {
        self.classify.detect_mood(text).await
    }

    pub async fn classify_genre(&self, audio: &[u8]) -> Result<Vec<Classification>, ClassifyError> {
        self.classify.classify_genre(audio).await
    }

    pub fn performance_stats(&self) -> PerformanceStats {
        self.stats.snapshot()
    }
}
