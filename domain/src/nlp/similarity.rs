//! Semantic music-intent detection from embedding similarity.

use serde::{Deserialize, Serialize};

/// Reference phrases the message embedding is compared against.
pub const MUSIC_KEYWORDS: [&str; 14] = [
    "play", "put on", "start", "begin", "queue", "listen", "hear", "music", "song", "track",
    "album", "artist", "band", "singer",
];

/// Similarity at or above which a message counts as a music command.
pub const MUSIC_INTENT_THRESHOLD: f64 = 0.3;

/// Cosine similarity of two vectors; 0.0 for mismatched or zero vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut na, mut nb) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicIntent {
    pub is_music_command: bool,
    pub confidence: f64,
    pub extracted_query: Option<String>,
    pub similarity_scores: Vec<f64>,
}

impl MusicIntent {
    /// Decide from per-keyword similarities: the max score is the
    /// confidence, compared against `threshold` inclusively.
    pub fn from_scores(scores: Vec<f64>, threshold: f64, extracted_query: Option<String>) -> Self {
        let confidence = scores.iter().copied().reduce(f64::max).unwrap_or(0.0);
        Self {
            is_music_command: !scores.is_empty() && confidence >= threshold,
            confidence,
            extracted_query,
            similarity_scores: scores,
        }
    }
}
