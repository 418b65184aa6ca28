//! NLP behaviour from TOML (`[nlp]` section)

use serde::{Deserialize, Serialize};
use tunebridge_domain::{ConfigIssue, ConfigIssueCode, MUSIC_INTENT_THRESHOLD};

/// Intent back-ends that can be selected in `[nlp] intent_backend`.
pub const INTENT_BACKENDS: [&str; 2] = ["keywords", "remote"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNlpConfig {
    /// Similarity at or above which a message is a music command (default: 0.3)
    pub music_threshold: f64,
    /// "keywords" (built-in rules) or "remote" (the configured intent model)
    pub intent_backend: String,
    /// Replacement reference phrases for the music similarity check
    pub music_keywords: Option<Vec<String>>,
    /// Labels kept for mood/genre classification
    pub top_k: usize,
}

impl Default for FileNlpConfig {
    fn default() -> Self {
        Self {
            music_threshold: MUSIC_INTENT_THRESHOLD,
            intent_backend: "keywords".to_string(),
            music_keywords: None,
            top_k: 3,
        }
    }
}

impl FileNlpConfig {
    pub fn uses_remote_intent(&self) -> bool {
        self.intent_backend.eq_ignore_ascii_case("remote")
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if tunebridge_domain::validate_threshold(self.music_threshold).is_err() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "nlp.music_threshold".to_string(),
                },
                format!(
                    "nlp.music_threshold: {} is outside 0.0..=1.0",
                    self.music_threshold
                ),
            ));
        }

        let backend = self.intent_backend.to_lowercase();
        if !INTENT_BACKENDS.contains(&backend.as_str()) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidEnumValue {
                    field: "nlp.intent_backend".to_string(),
                    value: self.intent_backend.clone(),
                    valid_values: INTENT_BACKENDS.iter().map(|s| s.to_string()).collect(),
                },
                format!(
                    "nlp.intent_backend: unknown value '{}', falling back to 'keywords'",
                    self.intent_backend
                ),
            ));
        }

        if let Some(keywords) = &self.music_keywords
            && keywords.iter().all(|k| k.trim().is_empty())
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "nlp.music_keywords".to_string(),
                },
                "nlp.music_keywords: at least one keyword is required",
            ));
        }

        issues
    }
}
