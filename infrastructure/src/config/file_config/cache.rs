//! Cache and logging configuration from TOML (`[cache]` and `[logging]` sections)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    pub enabled: bool,
    /// Response lifetime in seconds (default: 3600)
    pub ttl_secs: u64,
    /// Entries kept before the oldest is evicted
    pub max_entries: usize,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 3600,
            max_entries: 1024,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving one line per processed message / search
    pub event_log: Option<PathBuf>,
    /// Diagnostic log file (in addition to stderr)
    pub log_file: Option<PathBuf>,
}
