//! Model inference ports
//!
//! One trait per pretrained model role. Implementations (adapters) live in
//! the infrastructure layer and usually call a hosted inference API.

use async_trait::async_trait;
use thiserror::Error;
use tunebridge_domain::{
    Classification, EntityAnalysis, IntentClassification, SentimentAnalysis,
};

/// Errors that can occur while calling a model
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed (status {status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Model is still loading: {0}")]
    ModelLoading(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Sentiment classifier (positive / negative / neutral).
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    /// Identifier of the underlying model
    fn model_name(&self) -> &str;

    async fn analyze(&self, text: &str) -> Result<SentimentAnalysis, InferenceError>;

    /// Load the model ahead of the first real request.
    async fn warm_up(&self) -> Result<(), InferenceError> {
        self.analyze("hello").await.map(|_| ())
    }
}

/// Sentence-embedding encoder.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    fn model_name(&self) -> &str;

    /// Encode each text into one vector, in input order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, InferenceError>;

    async fn warm_up(&self) -> Result<(), InferenceError> {
        self.embed(&["hello".to_string()]).await.map(|_| ())
    }
}

/// Named-entity tagger.
#[async_trait]
pub trait EntityTagger: Send + Sync {
    fn model_name(&self) -> &str;

    async fn tag(&self, text: &str) -> Result<EntityAnalysis, InferenceError>;

    async fn warm_up(&self) -> Result<(), InferenceError> {
        self.tag("hello").await.map(|_| ())
    }
}

/// Chat-intent classifier.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    fn model_name(&self) -> &str;

    async fn classify(&self, text: &str) -> Result<IntentClassification, InferenceError>;

    async fn warm_up(&self) -> Result<(), InferenceError> {
        self.classify("hello").await.map(|_| ())
    }
}

/// Free-form text classifier (used for mood / emotion).
#[async_trait]
pub trait TextClassifier: Send + Sync {
    fn model_name(&self) -> &str;

    async fn classify(&self, text: &str) -> Result<Vec<Classification>, InferenceError>;

    async fn warm_up(&self) -> Result<(), InferenceError> {
        self.classify("hello").await.map(|_| ())
    }
}

/// Audio classifier (used for genre).
#[async_trait]
pub trait AudioClassifier: Send + Sync {
    fn model_name(&self) -> &str;

    /// Classify an encoded audio clip (wav, mp3, flac...).
    async fn classify(&self, audio: &[u8]) -> Result<Vec<Classification>, InferenceError>;

    /// Classify a short silent clip so the model is actually contacted.
    async fn warm_up(&self) -> Result<(), InferenceError> {
        self.classify(&silent_wav_clip()).await.map(|_| ())
    }
}

const WARM_UP_SAMPLE_RATE: u32 = 16_000;
const WARM_UP_SAMPLES: u32 = WARM_UP_SAMPLE_RATE / 2;

/// Half a second of 16 kHz mono 16-bit PCM silence as a WAV file.
pub fn silent_wav_clip() -> Vec<u8> {
    let data_len = WARM_UP_SAMPLES * 2;
    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&WARM_UP_SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&(WARM_UP_SAMPLE_RATE * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.resize(44 + data_len as usize, 0);
    wav
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_wav_clip_header() {
        let wav = silent_wav_clip();
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[36..40], b"data");

        let riff_len = u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]);
        assert_eq!(riff_len as usize, wav.len() - 8);
        let data_len = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(data_len as usize, wav.len() - 44);
        assert!(wav[44..].iter().all(|b| *b == 0));
    }
}
