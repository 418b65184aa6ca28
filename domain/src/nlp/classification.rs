//! Generic label/score pairs from text and audio classifiers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub score: f64,
}

impl Classification {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Sort by descending score and keep the first `k`.
pub fn top_k(mut labels: Vec<Classification>, k: usize) -> Vec<Classification> {
    labels.sort_by(|a, b| b.score.total_cmp(&a.score));
    labels.truncate(k);
    labels
}
