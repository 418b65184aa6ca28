//! Message analysis: intent, sentiment, entities, similarity and the
//! synthesized reply.

pub mod classification;
pub mod entities;
pub mod intent;
pub mod message;
pub mod response;
pub mod sentiment;
pub mod similarity;

pub use classification::{Classification, top_k};
pub use entities::{Entity, EntityAnalysis};
pub use intent::{Intent, IntentClassification, classify_by_keywords};
pub use message::MessageContext;
pub use response::{NlResponse, synthesize};
pub use sentiment::{SentimentAnalysis, SentimentLabel};
pub use similarity::{MUSIC_INTENT_THRESHOLD, MUSIC_KEYWORDS, MusicIntent, cosine_similarity};
