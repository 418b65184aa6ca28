//! Hosted model inference adapters.

mod client;
mod models;

pub use client::InferenceClient;
pub use models::{
    HfAudioClassifier, HfEntityTagger, HfIntentClassifier, HfSentimentAnalyzer, HfTextClassifier,
    HfTextEmbedder,
};
