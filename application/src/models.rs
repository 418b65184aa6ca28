//! The set of models a bridge runs with.

use crate::ports::inference::{
    AudioClassifier, EntityTagger, IntentClassifier, SentimentAnalyzer, TextClassifier,
    TextEmbedder,
};
use std::sync::Arc;

/// Model adapters injected into the use cases.
///
/// The four analysis models are required; mood and audio-genre models are
/// optional extras.
#[derive(Clone)]
pub struct ModelSet {
    pub sentiment: Arc<dyn SentimentAnalyzer>,
    pub embedder: Arc<dyn TextEmbedder>,
    pub entities: Arc<dyn EntityTagger>,
    pub intent: Arc<dyn IntentClassifier>,
    pub mood: Option<Arc<dyn TextClassifier>>,
    pub audio: Option<Arc<dyn AudioClassifier>>,
}

impl ModelSet {
    pub fn new(
        sentiment: Arc<dyn SentimentAnalyzer>,
        embedder: Arc<dyn TextEmbedder>,
        entities: Arc<dyn EntityTagger>,
        intent: Arc<dyn IntentClassifier>,
    ) -> Self {
        Self {
            sentiment,
            embedder,
            entities,
            intent,
            mood: None,
            audio: None,
        }
    }

    pub fn with_mood(mut self, mood: Arc<dyn TextClassifier>) -> Self {
        self.mood = Some(mood);
        self
    }

    pub fn with_audio(mut self, audio: Arc<dyn AudioClassifier>) -> Self {
        self.audio = Some(audio);
        self
    }
}
