//! Rule-based intent classifier.

use async_trait::async_trait;
use tunebridge_application::{InferenceError, IntentClassifier};
use tunebridge_domain::{IntentClassification, classify_by_keywords};

/// [`IntentClassifier`] that scores messages with the built-in keyword rules.
///
/// This is the default `intent_backend`; it never fails and needs no network.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordIntentClassifier;

#[async_trait]
impl IntentClassifier for KeywordIntentClassifier {
    fn model_name(&self) -> &str {
        "keyword-rules"
    }

    async fn classify(&self, text: &str) -> Result<IntentClassification, InferenceError> {
        Ok(classify_by_keywords(text))
    }

    async fn warm_up(&self) -> Result<(), InferenceError> {
        Ok(())
    }
}
