//! Initialize Models use case.
//!
//! Warms up every configured model concurrently so the first chat message
//! does not pay the model load time, and reports which models are ready.

use crate::models::ModelSet;
use futures::future::{BoxFuture, FutureExt, join_all};
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

/// Readiness of one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStatus {
    /// Role in the ensemble (`sentiment`, `embedding`, ...)
    pub role: &'static str,
    /// Model identifier
    pub model: String,
    pub ready: bool,
    pub error: Option<String>,
}

/// Outcome of an initialization run.
#[derive(Debug, Clone, Serialize)]
pub struct InitReport {
    pub models: Vec<ModelStatus>,
    pub elapsed_ms: f64,
}

impl InitReport {
    pub fn all_ready(&self) -> bool {
        self.models.iter().all(|m| m.ready)
    }

    pub fn ready_count(&self) -> usize {
        self.models.iter().filter(|m| m.ready).count()
    }

    /// Append a status produced outside the model warm-up.
    pub fn push(&mut self, status: ModelStatus) {
        self.models.push(status);
    }
}

pub struct InitializeModelsUseCase {
    models: ModelSet,
}

impl InitializeModelsUseCase {
    pub fn new(models: ModelSet) -> Self {
        Self { models }
    }

    pub async fn execute(&self) -> InitReport {
        info!("Initializing models...");
        let start = Instant::now();
        let m = &self.models;

        let mut tasks: Vec<BoxFuture<'_, ModelStatus>> = vec![
            status("sentiment", m.sentiment.model_name(), m.sentiment.warm_up()).boxed(),
            status("embedding", m.embedder.model_name(), m.embedder.warm_up()).boxed(),
            status("entities", m.entities.model_name(), m.entities.warm_up()).boxed(),
            status("intent", m.intent.model_name(), m.intent.warm_up()).boxed(),
        ];
        if let Some(mood) = &m.mood {
            tasks.push(status("mood", mood.model_name(), mood.warm_up()).boxed());
        }
        if let Some(audio) = &m.audio {
            tasks.push(status("audio_genre", audio.model_name(), audio.warm_up()).boxed());
        }

        let models = join_all(tasks).await;
        let report = InitReport {
            models,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        };
        info!(
            "Models initialized: {}/{} ready in {:.0}ms",
            report.ready_count(),
            report.models.len(),
            report.elapsed_ms
        );
        report
    }
}

async fn status<F, E>(role: &'static str, model: &str, warm_up: F) -> ModelStatus
where
    F: std::future::Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    let model = model.to_string();
    match warm_up.await {
        Ok(()) => ModelStatus {
            role,
            model,
            ready: true,
            error: None,
        },
        Err(e) => {
            warn!("Model {} ({}) failed to load: {}", role, model, e);
            ModelStatus {
                role,
                model,
                ready: false,
                error: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::mocks::{
        FailingAudio, FailingEmbedder, FixedAudio, FixedMood, model_set, model_set_with_embedder,
    };
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_all_ready() {
        let uc = InitializeModelsUseCase::new(model_set());
        let report = uc.execute().await;
        assert_eq!(report.models.len(), 4);
        assert!(report.all_ready());
        let roles: Vec<_> = report.models.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec!["sentiment", "embedding", "entities", "intent"]);
    }

    #[tokio::test]
    async fn test_failure_is_reported_not_fatal() {
        let models = model_set_with_embedder(Arc::new(FailingEmbedder)).with_mood(Arc::new(FixedMood));
        let report = InitializeModelsUseCase::new(models).execute().await;
        assert_eq!(report.models.len(), 5);
        assert!(!report.all_ready());
        assert_eq!(report.ready_count(), 4);
        let embedding = report.models.iter().find(|m| m.role == "embedding").unwrap();
        assert!(embedding.error.as_deref().unwrap().contains("offline"));
    }

    #[tokio::test]
    async fn test_audio_model_is_contacted_on_warm_up() {
        let audio = Arc::new(FailingAudio::default());
        let report = InitializeModelsUseCase::new(model_set().with_audio(audio.clone()))
            .execute()
            .await;

        assert_eq!(audio.calls.load(Ordering::SeqCst), 1);
        assert!(audio.last_clip_len.load(Ordering::SeqCst) > 44);
        let genre = report.models.iter().find(|m| m.role == "audio_genre").unwrap();
        assert!(!genre.ready);
        assert!(genre.error.as_deref().unwrap().contains("loading"));
        assert_eq!(report.ready_count(), 4);
    }

    #[tokio::test]
    async fn test_working_audio_model_is_ready() {
        let report = InitializeModelsUseCase::new(model_set().with_audio(Arc::new(FixedAudio)))
            .execute()
            .await;
        assert_eq!(report.models.len(), 5);
        assert!(report.all_ready());
    }
}
