//! Music source configuration from TOML (`[spotify]` and `[youtube]` sections)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSpotifyConfig {
    pub enabled: bool,
    /// Environment variable name for the client id (default: "SPOTIFY_CLIENT_ID").
    pub client_id_env: String,
    /// Environment variable name for the client secret (default: "SPOTIFY_CLIENT_SECRET").
    pub client_secret_env: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// ISO country code restricting search results
    pub market: Option<String>,
    pub api_base_url: String,
    pub token_url: String,
    pub timeout_secs: u64,
}

impl Default for FileSpotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            client_id_env: "SPOTIFY_CLIENT_ID".to_string(),
            client_secret_env: "SPOTIFY_CLIENT_SECRET".to_string(),
            client_id: None,
            client_secret: None,
            market: None,
            api_base_url: "https://api.spotify.com/v1".to_string(),
            token_url: "https://accounts.spotify.com/api/token".to_string(),
            timeout_secs: 10,
        }
    }
}

impl FileSpotifyConfig {
    /// Client id and secret, when both are available.
    pub fn resolve_credentials(&self) -> Option<(String, String)> {
        let id = super::resolve_secret(self.client_id.as_deref(), &self.client_id_env)?;
        let secret =
            super::resolve_secret(self.client_secret.as_deref(), &self.client_secret_env)?;
        Some((id, secret))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileYoutubeConfig {
    pub enabled: bool,
    /// yt-dlp executable name or path
    pub binary: String,
    pub timeout_secs: u64,
    /// Where `download` writes audio files
    pub download_dir: PathBuf,
}

impl Default for FileYoutubeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            binary: "yt-dlp".to_string(),
            timeout_secs: 30,
            download_dir: PathBuf::from("."),
        }
    }
}
