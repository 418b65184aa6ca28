//! Music source adapters.

mod spotify;
mod youtube;

pub use spotify::{SpotifyCatalog, SpotifySettings};
pub use youtube::{DownloadError, YtDlpSource};
