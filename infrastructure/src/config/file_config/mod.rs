//! Raw TOML configuration data types
//!
//! These structs mirror the TOML file one-to-one. Mapping onto the
//! application's [`BridgeConfig`] happens in [`FileConfig::to_bridge_config`].

mod cache;
mod inference;
mod music;
mod nlp;

pub use cache::{FileCacheConfig, FileLoggingConfig};
pub use inference::{FileInferenceConfig, FileModelIds};
pub use music::{FileSpotifyConfig, FileYoutubeConfig};
pub use nlp::{FileNlpConfig, INTENT_BACKENDS};

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tunebridge_application::BridgeConfig;
use tunebridge_domain::{ConfigIssue, ConfigIssueCode};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub nlp: FileNlpConfig,
    pub inference: FileInferenceConfig,
    pub spotify: FileSpotifyConfig,
    pub youtube: FileYoutubeConfig,
    pub cache: FileCacheConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.nlp.validate();

        if self.inference.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "inference.base_url".to_string(),
                },
                "inference.base_url: must not be empty",
            ));
        }

        let models = &self.inference.models;
        for (field, value) in [
            ("inference.models.sentiment", &models.sentiment),
            ("inference.models.embedding", &models.embedding),
            ("inference.models.entities", &models.entities),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyValue {
                        field: field.to_string(),
                    },
                    format!("{field}: a model id is required"),
                ));
            }
        }

        if self.nlp.uses_remote_intent() && models.intent.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "inference.models.intent".to_string(),
                },
                "inference.models.intent: a model id is required when nlp.intent_backend = \"remote\"",
            ));
        }

        if self.cache.enabled && self.cache.ttl_secs == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "cache.ttl_secs".to_string(),
                },
                "cache.ttl_secs: 0 expires every entry immediately",
            ));
        }

        if !self.spotify.enabled && !self.youtube.enabled {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoMusicSource,
                "both [spotify] and [youtube] are disabled; music search will never find a track",
            ));
        }

        issues
    }

    /// Map the `[nlp]`, `[inference]` and `[cache]` sections onto the bridge parameters.
    pub fn to_bridge_config(&self) -> BridgeConfig {
        let mut config = BridgeConfig::default()
            .with_music_threshold(self.nlp.music_threshold)
            .with_cache_enabled(self.cache.enabled)
            .with_cache_ttl(Duration::from_secs(self.cache.ttl_secs))
            .with_top_k(self.nlp.top_k.max(1));

        config = config.with_model_timeout(match self.inference.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        });

        if let Some(keywords) = &self.nlp.music_keywords {
            let keywords: Vec<String> = keywords
                .iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect();
            if !keywords.is_empty() {
                config = config.with_music_keywords(keywords);
            }
        }

        config
    }
}

/// A secret given directly in the file wins over its environment variable.
pub(crate) fn resolve_secret(direct: Option<&str>, env_var: &str) -> Option<String> {
    direct
        .map(str::to_string)
        .or_else(|| std::env::var(env_var).ok())
        .filter(|s| !s.trim().is_empty())
}
