//! Mood and genre classification.

use crate::ports::inference::{AudioClassifier, InferenceError, TextClassifier};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use tunebridge_domain::nlp::classification::top_k;
use tunebridge_domain::Classification;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("No {0} model configured")]
    NotConfigured(&'static str),

    #[error("Nothing to classify")]
    EmptyInput,

    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),
}

/// Use case for classifying text mood and audio genre.
pub struct ClassifyUseCase {
    mood: Option<Arc<dyn TextClassifier>>,
    audio: Option<Arc<dyn AudioClassifier>>,
    top_k: usize,
}

impl ClassifyUseCase {
    pub fn new(
        mood: Option<Arc<dyn TextClassifier>>,
        audio: Option<Arc<dyn AudioClassifier>>,
        top_k: usize,
    ) -> Self {
        Self { mood, audio, top_k }
    }

    /// Emotions expressed by `text`, strongest first.
    pub async fn detect_mood(&self, text: &str) -> Result<Vec<Classification>, ClassifyError> {
        let model = self.mood.as_ref().ok_or(ClassifyError::NotConfigured("mood"))?;
        if text.trim().is_empty() {
            return Err(ClassifyError::EmptyInput);
        }
        let labels = top_k(model.classify(text).await?, self.top_k);
        info!("Mood via {}: {:?}", model.model_name(), labels.first().map(|l| &l.label));
        Ok(labels)
    }

    /// Genres for an encoded audio clip, strongest first.
    pub async fn classify_genre(&self, audio: &[u8]) -> Result<Vec<Classification>, ClassifyError> {
        let model = self
            .audio
            .as_ref()
            .ok_or(ClassifyError::NotConfigured("audio genre"))?;
        if audio.is_empty() {
            return Err(ClassifyError::EmptyInput);
        }
        let labels = top_k(model.classify(audio).await?, self.top_k);
        info!(
            "Genre via {} for {} bytes: {:?}",
            model.model_name(),
            audio.len(),
            labels.first().map(|l| &l.label)
        );
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::mocks::{FixedAudio, FixedMood};

    #[tokio::test]
    async fn test_detect_mood_top_k() {
        let uc = ClassifyUseCase::new(Some(Arc::new(FixedMood)), None, 2);
        let labels = uc.detect_mood("I miss you").await.unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label, "sadness");
    }

    #[tokio::test]
    async fn test_missing_models() {
        let uc = ClassifyUseCase::new(None, None, 3);
        assert!(matches!(
            uc.detect_mood("hi").await,
            Err(ClassifyError::NotConfigured("mood"))
        ));
        assert!(matches!(
            uc.classify_genre(&[1, 2, 3]).await,
            Err(ClassifyError::NotConfigured(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let uc = ClassifyUseCase::new(Some(Arc::new(FixedMood)), Some(Arc::new(FixedAudio)), 3);
        assert!(matches!(uc.detect_mood("  ").await, Err(ClassifyError::EmptyInput)));
        assert!(matches!(uc.classify_genre(&[]).await, Err(ClassifyError::EmptyInput)));
        let genres = uc.classify_genre(&[0u8; 16]).await.unwrap();
        assert_eq!(genres[0].label, "Hip hop music");
    }
}
