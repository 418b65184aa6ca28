//! Music queries, tracks and video-platform links.

pub mod extract;
pub mod query;
pub mod request;
pub mod track;
pub mod youtube;

pub use extract::{PLAY_KEYWORDS, extract_music_query};
pub use query::MusicQuery;
pub use request::{MusicRequest, parse_music_request};
pub use track::{TrackInfo, TrackSource};
pub use youtube::{extract_video_id, is_youtube_url, thumbnail_url, track_from_url};
