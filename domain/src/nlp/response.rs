//! Natural-language response record and reply synthesis.
//!
//! The ensemble results are combined by fixed rules: a music command with a
//! usable query gets a confirmation (plus the sentiment line when present),
//! anything else gets the canned reply for its primary intent.

use super::intent::{Intent, IntentClassification};
use super::sentiment::SentimentAnalysis;
use super::similarity::MusicIntent;
use serde::{Deserialize, Serialize};

/// Model name reported for a normally synthesized response.
pub const ENSEMBLE_MODEL: &str = "nlp_ensemble";

/// Model name reported for the fallback response.
pub const ERROR_MODEL: &str = "error";

/// Fixed user-facing apology used whenever processing fails.
pub const FALLBACK_REPLY: &str = "I'm having trouble understanding that. Could you try again?";

/// Reply to a chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NlResponse {
    pub response: Option<String>,
    pub is_music_command: bool,
    pub extracted_query: Option<String>,
    pub confidence: f64,
    pub processing_time_ms: f64,
    pub model_used: String,
}

impl NlResponse {
    /// The apology response returned when processing fails.
    pub fn fallback(processing_time_ms: f64) -> Self {
        Self {
            response: Some(FALLBACK_REPLY.to_string()),
            is_music_command: false,
            extracted_query: None,
            confidence: 0.0,
            processing_time_ms,
            model_used: ERROR_MODEL.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.model_used == ERROR_MODEL
    }

    pub fn with_processing_time(mut self, processing_time_ms: f64) -> Self {
        self.processing_time_ms = processing_time_ms;
        self
    }
}

/// Canned reply for a non-music message.
pub fn contextual_response(intent: Intent) -> &'static str {
    match intent {
        Intent::Study => {
            "🧠 I'm here to help with your studies! Try asking me about specific topics or start a focused study session."
        }
        Intent::Fun => {
            "😄 Let's have some fun! I can tell jokes, play music, or help with anything you need!"
        }
        Intent::Emergency => {
            "🚨 Emergency mode activated! I'm here to help - what do you need assistance with?"
        }
        Intent::Music | Intent::General => {
            "Hey there! I can help with music, studies, or just have a great conversation! 🚀"
        }
    }
}

/// Combine the ensemble results into a reply. Missing results count as empty.
pub fn synthesize(
    music: Option<&MusicIntent>,
    sentiment: Option<&SentimentAnalysis>,
    intent: Option<&IntentClassification>,
) -> NlResponse {
    let is_music_command = music.is_some_and(|m| m.is_music_command);
    let extracted_query = music.and_then(|m| m.extracted_query.clone());
    let confidence = music.map_or(0.0, |m| m.confidence);

    let response = match (&extracted_query, is_music_command) {
        (Some(query), true) => {
            let mut reply = format!(
                "🎵 Got it! Let me find and play **{}** for you right away!",
                query
            );
            if let Some(s) = sentiment
                && !s.empathetic_response.is_empty()
            {
                reply.push(' ');
                reply.push_str(&s.empathetic_response);
            }
            reply
        }
        _ => {
            let primary = intent.map_or(Intent::General, |i| i.primary_intent);
            contextual_response(primary).to_string()
        }
    };

    NlResponse {
        response: Some(response),
        is_music_command,
        extracted_query,
        confidence,
        processing_time_ms: 0.0,
        model_used: ENSEMBLE_MODEL.to_string(),
    }
}
