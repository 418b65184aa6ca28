//! YouTube lookup and audio download through the `yt-dlp` executable.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};
use tunebridge_application::{MusicSource, SearchError};
use tunebridge_domain::{TrackInfo, TrackSource, thumbnail_url};

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Not a YouTube video URL: {0}")]
    NotYoutubeUrl(String),

    #[error("Could not start {binary}: {message}")]
    Spawn { binary: String, message: String },

    #[error("yt-dlp failed: {0}")]
    Failed(String),

    #[error("yt-dlp timed out after {0:?}")]
    Timeout(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Subset of `yt-dlp --dump-json` output.
#[derive(Debug, Deserialize)]
struct VideoInfo {
    id: String,
    title: String,
    #[serde(default)]
    uploader: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    webpage_url: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    thumbnail: Option<String>,
}

impl From<VideoInfo> for TrackInfo {
    fn from(video: VideoInfo) -> Self {
        let url = video
            .webpage_url
            .unwrap_or_else(|| format!("https://www.youtube.com/watch?v={}", video.id));
        TrackInfo {
            title: video.title,
            artist: video
                .uploader
                .or(video.channel)
                .unwrap_or_else(|| "Unknown".to_string()),
            url,
            source: TrackSource::YouTube,
            duration_ms: video
                .duration
                .map(|secs| (secs.max(0.0) * 1000.0).round() as u64)
                .unwrap_or(0),
            thumbnail: video.thumbnail.or_else(|| Some(thumbnail_url(&video.id))),
        }
    }
}

/// Parse the first JSON document of yt-dlp's stdout.
fn parse_dump(stdout: &str) -> Result<Option<TrackInfo>, SearchError> {
    let Some(line) = stdout.lines().find(|l| !l.trim().is_empty()) else {
        return Ok(None);
    };
    let video: VideoInfo =
        serde_json::from_str(line).map_err(|e| SearchError::InvalidResponse(e.to_string()))?;
    Ok(Some(video.into()))
}

/// [`MusicSource`] that asks `yt-dlp` for the first search hit.
pub struct YtDlpSource {
    binary: String,
    timeout: Duration,
}

impl YtDlpSource {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    async fn run(&self, args: &[&str]) -> Result<std::process::Output, DownloadError> {
        debug!(binary = %self.binary, ?args, "running yt-dlp");
        let child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DownloadError::Spawn {
                binary: self.binary.clone(),
                message: e.to_string(),
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| DownloadError::Timeout(self.timeout))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DownloadError::Failed(stderr.trim().to_string()));
        }
        Ok(output)
    }

    /// Extract the audio of a video into `dir` as mp3; returns the written file.
    pub async fn download_audio(&self, url: &str, dir: &Path) -> Result<PathBuf, DownloadError> {
        if !tunebridge_domain::is_youtube_url(url) {
            return Err(DownloadError::NotYoutubeUrl(url.to_string()));
        }
        tokio::fs::create_dir_all(dir).await?;

        let template = dir.join("%(title)s.%(ext)s");
        let template = template.to_string_lossy();
        let output = self
            .run(&[
                "-x",
                "--audio-format",
                "mp3",
                "-f",
                "bestaudio/best",
                "--no-playlist",
                "--print",
                "after_move:filepath",
                "-o",
                &template,
                url,
            ])
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = stdout
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .map(|l| PathBuf::from(l.trim()))
            .ok_or_else(|| DownloadError::Failed("no output file reported".to_string()))?;
        info!(path = %path.display(), "downloaded audio");
        Ok(path)
    }
}

#[async_trait]
impl MusicSource for YtDlpSource {
    fn source(&self) -> TrackSource {
        TrackSource::YouTube
    }

    async fn search(&self, term: &str) -> Result<Option<TrackInfo>, SearchError> {
        let target = format!("ytsearch1:{}", term);
        let output = self
            .run(&[
                "--dump-json",
                "--no-playlist",
                "--skip-download",
                "--no-warnings",
                &target,
            ])
            .await
            .map_err(|e| match e {
                DownloadError::Timeout(_) => SearchError::Timeout,
                DownloadError::Spawn { .. } => SearchError::Unavailable(e.to_string()),
                other => SearchError::RequestFailed(other.to_string()),
            })?;
        parse_dump(&String::from_utf8_lossy(&output.stdout))
    }
}
