//! Configuration file loading for tunebridge
//!
//! The priority order (highest to lowest):
//!
//! 1. `TUNEBRIDGE_*` environment variables (`__` separates section and key)
//! 2. `--config <path>` specified file
//! 3. Project root: `./tunebridge.toml` or `./.tunebridge.toml`
//! 4. Global: `$XDG_CONFIG_HOME/tunebridge/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileCacheConfig, FileConfig, FileInferenceConfig, FileLoggingConfig, FileModelIds,
    FileNlpConfig, FileSpotifyConfig, FileYoutubeConfig, INTENT_BACKENDS,
};
pub use loader::ConfigLoader;
