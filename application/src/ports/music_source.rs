//! Music source port
//!
//! A searchable back-end that resolves a free-text term to one track.

use async_trait::async_trait;
use thiserror::Error;
use tunebridge_domain::{TrackInfo, TrackSource};

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Timeout")]
    Timeout,
}

#[async_trait]
pub trait MusicSource: Send + Sync {
    /// Which platform this source searches
    fn source(&self) -> TrackSource;

    /// Return the best match for `term`, or `None` when nothing matched.
    async fn search(&self, term: &str) -> Result<Option<TrackInfo>, SearchError>;
}
