//! Spotify catalog search using the client-credentials flow.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;
use tunebridge_application::{MusicSource, SearchError};
use tunebridge_domain::{TrackInfo, TrackSource};

/// Renew the token this long before Spotify says it expires.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub client_id: String,
    pub client_secret: String,
    pub market: Option<String>,
    pub api_base_url: String,
    pub token_url: String,
    pub timeout: Duration,
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<SpotifyTrack>,
}

#[derive(Debug, Deserialize)]
struct SpotifyTrack {
    name: String,
    #[serde(default)]
    artists: Vec<NamedItem>,
    external_urls: ExternalUrls,
    #[serde(default)]
    duration_ms: u64,
    album: Option<Album>,
}

#[derive(Debug, Deserialize)]
struct NamedItem {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ExternalUrls {
    spotify: String,
}

#[derive(Debug, Deserialize)]
struct Album {
    #[serde(default)]
    images: Vec<Image>,
}

#[derive(Debug, Deserialize)]
struct Image {
    url: String,
}

impl From<SpotifyTrack> for TrackInfo {
    fn from(track: SpotifyTrack) -> Self {
        let artist = match track.artists.first() {
            Some(artist) => artist.name.clone(),
            None => "Unknown".to_string(),
        };
        TrackInfo {
            title: track.name,
            artist,
            url: track.external_urls.spotify,
            source: TrackSource::Spotify,
            duration_ms: track.duration_ms,
            thumbnail: track
                .album
                .and_then(|album| album.images.into_iter().next())
                .map(|image| image.url),
        }
    }
}

fn first_track(body: SearchResponse) -> Option<TrackInfo> {
    body.tracks.items.into_iter().next().map(TrackInfo::from)
}

/// [`MusicSource`] backed by the Spotify Web API.
pub struct SpotifyCatalog {
    http: reqwest::Client,
    settings: SpotifySettings,
    token: Mutex<Option<AccessToken>>,
}

impl SpotifyCatalog {
    pub fn new(settings: SpotifySettings) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| SearchError::Unavailable(format!("HTTP client: {}", e)))?;
        Ok(Self {
            http,
            settings,
            token: Mutex::new(None),
        })
    }

    async fn access_token(&self) -> Result<String, SearchError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref()
            && token.expires_at > Instant::now()
        {
            return Ok(token.value.clone());
        }

        debug!("requesting Spotify access token");
        let response = self
            .http
            .post(&self.settings.token_url)
            .basic_auth(&self.settings.client_id, Some(&self.settings.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(SearchError::AuthenticationFailed(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        let lifetime = Duration::from_secs(body.expires_in).saturating_sub(EXPIRY_MARGIN);
        *cached = Some(AccessToken {
            value: body.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        Ok(body.access_token)
    }
}

fn request_error(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout
    } else {
        SearchError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl MusicSource for SpotifyCatalog {
    fn source(&self) -> TrackSource {
        TrackSource::Spotify
    }

    async fn search(&self, term: &str) -> Result<Option<TrackInfo>, SearchError> {
        let token = self.access_token().await?;

        let mut query = vec![("q", term), ("type", "track"), ("limit", "1")];
        if let Some(market) = &self.settings.market {
            query.push(("market", market.as_str()));
        }

        let response = self
            .http
            .get(format!("{}/search", self.settings.api_base_url))
            .bearer_auth(token)
            .query(&query)
            .send()
            .await
            .map_err(request_error)?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.token.lock().await.take();
            return Err(SearchError::AuthenticationFailed(
                "access token rejected".to_string(),
            ));
        }
        if !response.status().is_success() {
            return Err(SearchError::RequestFailed(format!(
                "search returned {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;
        Ok(first_track(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_BODY: &str = r#"{
        "tracks": {
            "items": [{
                "name": "Bohemian Rhapsody",
                "artists": [{"name": "Queen"}, {"name": "Someone Else"}],
                "external_urls": {"spotify": "https://open.spotify.com/track/4u7EnebtmKWzUH433cf5Qv"},
                "duration_ms": 354320,
                "album": {"images": [{"url": "https://i.scdn.co/image/large", "height": 640}]}
            }]
        }
    }"#;

    #[test]
    fn test_first_track_maps_fields() {
        let body: SearchResponse = serde_json::from_str(SEARCH_BODY).unwrap();
        let track = first_track(body).unwrap();
        assert_eq!(track.title, "Bohemian Rhapsody");
        assert_eq!(track.artist, "Queen");
        assert_eq!(track.source, TrackSource::Spotify);
        assert_eq!(track.duration_ms, 354_320);
        assert_eq!(
            track.thumbnail.as_deref(),
            Some("https://i.scdn.co/image/large")
        );
    }

    #[test]
    fn test_empty_result() {
        let body: SearchResponse = serde_json::from_str(r#"{"tracks":{"items":[]}}"#).unwrap();
        assert!(first_track(body).is_none());
    }

    #[test]
    fn test_missing_artist_and_album() {
        let body: SearchResponse = serde_json::from_str(
            r#"{"tracks":{"items":[{"name":"x","external_urls":{"spotify":"u"}}]}}"#,
        )
        .unwrap();
        let track = first_track(body).unwrap();
        assert_eq!(track.artist, "Unknown");
        assert!(track.thumbnail.is_none());
        assert_eq!(track.duration_ms, 0);
    }

    #[tokio::test]
    async fn test_token_endpoint_unreachable() {
        let catalog = SpotifyCatalog::new(SpotifySettings {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            market: None,
            api_base_url: "http://127.0.0.1:9/v1".to_string(),
            token_url: "http://127.0.0.1:9/token".to_string(),
            timeout: Duration::from_secs(2),
        })
        .unwrap();
        assert!(catalog.search("anything").await.is_err());
    }
}
