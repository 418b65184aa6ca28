//! Inference API configuration from TOML (`[inference]` section)

use serde::{Deserialize, Serialize};

/// Model identifiers per role. An empty string disables an optional model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelIds {
    pub sentiment: String,
    pub embedding: String,
    pub entities: String,
    /// Only used when `[nlp] intent_backend = "remote"`.
    pub intent: String,
    pub mood: String,
    pub audio_genre: String,
}

impl Default for FileModelIds {
    fn default() -> Self {
        Self {
            sentiment: "cardiffnlp/twitter-roberta-base-sentiment-latest".to_string(),
            embedding: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            entities: "dslim/bert-base-NER".to_string(),
            intent: "facebook/bart-large-mnli".to_string(),
            mood: "j-hartmann/emotion-english-distilroberta-base".to_string(),
            audio_genre: "MIT/ast-finetuned-audioset-10-10-0.4593".to_string(),
        }
    }
}

impl FileModelIds {
    pub fn mood(&self) -> Option<&str> {
        non_empty(&self.mood)
    }

    pub fn audio_genre(&self) -> Option<&str> {
        non_empty(&self.audio_genre)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInferenceConfig {
    /// Base URL; the model id is appended as a path.
    pub base_url: String,
    /// Environment variable holding the API token (default: "HF_API_TOKEN").
    pub api_token_env: String,
    /// Direct API token; prefer the env var.
    pub api_token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub models: FileModelIds,
}

impl Default for FileInferenceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-inference.huggingface.co/models".to_string(),
            api_token_env: "HF_API_TOKEN".to_string(),
            api_token: None,
            timeout_secs: 30,
            models: FileModelIds::default(),
        }
    }
}

impl FileInferenceConfig {
    /// Token from the config file, else from the named env var.
    pub fn resolve_token(&self) -> Option<String> {
        super::resolve_secret(self.api_token.as_deref(), &self.api_token_env)
    }
}
