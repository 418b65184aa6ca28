//! Local (model-free) NLP adapters.

mod keyword_intent;

pub use keyword_intent::KeywordIntentClassifier;
