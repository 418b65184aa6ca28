//! Intent classification by keyword membership.

use serde::{Deserialize, Serialize};
use std::fmt;

/// High-level intent of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Music,
    Study,
    Fun,
    Emergency,
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Music => "music",
            Intent::Study => "study",
            Intent::Fun => "fun",
            Intent::Emergency => "emergency",
            Intent::General => "general",
        }
    }

    /// Map a classifier label onto an intent; unknown labels are `General`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "music" => Intent::Music,
            "study" => Intent::Study,
            "fun" => Intent::Fun,
            "emergency" => Intent::Emergency,
            _ => Intent::General,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword rule: score `hit` when any keyword is a substring, else `miss`.
struct KeywordRule {
    intent: Intent,
    keywords: &'static [&'static str],
    hit: f64,
}

const MISS_SCORE: f64 = 0.1;

// Declaration order is the tie-break order for the primary intent.
const RULES: [KeywordRule; 4] = [
    KeywordRule {
        intent: Intent::Music,
        keywords: &["play", "music", "song"],
        hit: 0.8,
    },
    KeywordRule {
        intent: Intent::Study,
        keywords: &["study", "learn", "help"],
        hit: 0.7,
    },
    KeywordRule {
        intent: Intent::Fun,
        keywords: &["joke", "fun", "laugh"],
        hit: 0.6,
    },
    KeywordRule {
        intent: Intent::Emergency,
        keywords: &["emergency", "urgent", "help"],
        hit: 0.9,
    },
];

/// Scored intents for one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentClassification {
    pub scores: Vec<(Intent, f64)>,
    pub primary_intent: Intent,
    pub confidence: f64,
}

impl IntentClassification {
    /// Pick the primary intent: highest score, first one wins on ties.
    pub fn from_scores(scores: Vec<(Intent, f64)>) -> Self {
        let mut best: Option<(Intent, f64)> = None;
        for &(intent, score) in &scores {
            match best {
                Some((_, s)) if score <= s => {}
                _ => best = Some((intent, score)),
            }
        }
        let (primary_intent, confidence) = best.unwrap_or((Intent::General, 0.0));
        Self {
            scores,
            primary_intent,
            confidence,
        }
    }

    pub fn score(&self, intent: Intent) -> Option<f64> {
        self.scores
            .iter()
            .find(|(i, _)| *i == intent)
            .map(|(_, s)| *s)
    }
}

/// Score the message against the fixed keyword rules.
pub fn classify_by_keywords(message: &str) -> IntentClassification {
    let lower = message.to_lowercase();
    let scores = RULES
        .iter()
        .map(|rule| {
            let hit = rule.keywords.iter().any(|kw| lower.contains(kw));
            (rule.intent, if hit { rule.hit } else { MISS_SCORE })
        })
        .collect();
    IntentClassification::from_scores(scores)
}
