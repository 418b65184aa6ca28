//! Sentiment labels and the empathetic follow-up line.

use serde::{Deserialize, Serialize};

/// Confidence above which the sentiment drives a tailored reply.
pub const EMPATHY_CONFIDENCE: f64 = 0.8;

pub const UPLIFTING_REPLY: &str =
    "I can sense you're feeling down. Let me play something uplifting to brighten your day! 🎵✨";
pub const ENERGY_REPLY: &str =
    "Your positive energy is contagious! Let's keep that vibe going with some great music! 🎶🔥";
pub const NEUTRAL_REPLY: &str = "I'm here to help make your day better with some amazing music! 🎵";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Parse a model label. Accepts word labels in any case and the
    /// three-class `LABEL_0/1/2` form (negative/neutral/positive).
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" | "pos" | "label_2" => SentimentLabel::Positive,
            "negative" | "neg" | "label_0" => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }
}

/// Result of the sentiment call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub label: SentimentLabel,
    pub confidence: f64,
    pub empathetic_response: String,
}

impl SentimentAnalysis {
    pub fn new(label: SentimentLabel, confidence: f64) -> Self {
        Self {
            label,
            confidence,
            empathetic_response: empathetic_response(label, confidence).to_string(),
        }
    }
}

/// Reply line matched to the user's mood.
pub fn empathetic_response(label: SentimentLabel, confidence: f64) -> &'static str {
    match label {
        SentimentLabel::Negative if confidence > EMPATHY_CONFIDENCE => UPLIFTING_REPLY,
        SentimentLabel::Positive if confidence > EMPATHY_CONFIDENCE => ENERGY_REPLY,
        _ => NEUTRAL_REPLY,
    }
}
