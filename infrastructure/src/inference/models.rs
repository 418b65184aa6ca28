//! Model adapters over [`InferenceClient`], one per port.
//!
//! Each adapter owns the wire shape of its task and converts it into the
//! domain value the port returns.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tunebridge_application::{
    AudioClassifier, EntityTagger, InferenceError, IntentClassifier, SentimentAnalyzer,
    TextClassifier, TextEmbedder,
};
use tunebridge_domain::{
    Classification, Entity, EntityAnalysis, Intent, IntentClassification, SentimentAnalysis,
    SentimentLabel,
};

use super::client::InferenceClient;

/// Pipeline task for sentence embeddings.
pub(crate) const FEATURE_EXTRACTION: &str = "feature-extraction";

/// Candidate labels offered to the zero-shot intent model.
const INTENT_LABELS: [Intent; 5] = [
    Intent::Music,
    Intent::Study,
    Intent::Fun,
    Intent::Emergency,
    Intent::General,
];

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

impl From<LabelScore> for Classification {
    fn from(value: LabelScore) -> Self {
        Classification::new(value.label, value.score)
    }
}

/// Text classification comes back either nested per input or flat.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LabelScores {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl LabelScores {
    fn into_first(self) -> Vec<LabelScore> {
        match self {
            LabelScores::Nested(rows) => rows.into_iter().next().unwrap_or_default(),
            LabelScores::Flat(row) => row,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TaggedSpan {
    #[serde(alias = "entity")]
    entity_group: String,
    word: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
struct ZeroShot {
    labels: Vec<String>,
    scores: Vec<f64>,
}

fn parse_sentiment(raw: LabelScores) -> Result<SentimentAnalysis, InferenceError> {
    let best = raw
        .into_first()
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| InferenceError::InvalidResponse("empty sentiment labels".to_string()))?;
    Ok(SentimentAnalysis::new(
        SentimentLabel::from_label(&best.label),
        best.score,
    ))
}

fn parse_entities(text: &str, spans: Vec<TaggedSpan>) -> EntityAnalysis {
    EntityAnalysis {
        entities: spans
            .into_iter()
            .map(|span| Entity {
                text: span.word.trim().to_string(),
                label: span.entity_group,
                confidence: span.score,
            })
            .collect(),
        tokens: text.split_whitespace().map(str::to_string).collect(),
    }
}

fn parse_zero_shot(raw: ZeroShot) -> Result<IntentClassification, InferenceError> {
    if raw.labels.is_empty() || raw.labels.len() != raw.scores.len() {
        return Err(InferenceError::InvalidResponse(
            "zero-shot labels and scores differ in length".to_string(),
        ));
    }
    let scores = raw
        .labels
        .iter()
        .zip(raw.scores)
        .map(|(label, score)| (Intent::from_label(label), score))
        .collect();
    Ok(IntentClassification::from_scores(scores))
}

/// Sentiment via a text-classification model.
pub struct HfSentimentAnalyzer {
    client: InferenceClient,
    model: String,
}

impl HfSentimentAnalyzer {
    pub fn new(client: InferenceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl SentimentAnalyzer for HfSentimentAnalyzer {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn analyze(&self, text: &str) -> Result<SentimentAnalysis, InferenceError> {
        let raw: LabelScores = self.client.infer(&self.model, json!(text), None).await?;
        parse_sentiment(raw)
    }
}

/// Sentence embeddings, always requested through the feature-extraction
/// pipeline whatever the model's default task.
pub struct HfTextEmbedder {
    client: InferenceClient,
    model: String,
}

impl HfTextEmbedder {
    pub fn new(client: InferenceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Where embedding requests for this model are sent.
    pub fn endpoint(&self) -> String {
        self.client.task_url(FEATURE_EXTRACTION, &self.model)
    }
}

#[async_trait]
impl TextEmbedder for HfTextEmbedder {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, InferenceError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let vectors: Vec<Vec<f32>> = self
            .client
            .infer_task(FEATURE_EXTRACTION, &self.model, json!(texts), None)
            .await?;
        if vectors.len() != texts.len() {
            return Err(InferenceError::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                vectors.len()
            )));
        }
        Ok(vectors)
    }
}

/// Named entities via a token-classification model with grouped spans.
pub struct HfEntityTagger {
    client: InferenceClient,
    model: String,
}

impl HfEntityTagger {
    pub fn new(client: InferenceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl EntityTagger for HfEntityTagger {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn tag(&self, text: &str) -> Result<EntityAnalysis, InferenceError> {
        let spans: Vec<TaggedSpan> = self
            .client
            .infer(
                &self.model,
                json!(text),
                Some(json!({ "aggregation_strategy": "simple" })),
            )
            .await?;
        Ok(parse_entities(text, spans))
    }
}

/// Intent via a zero-shot classification model.
pub struct HfIntentClassifier {
    client: InferenceClient,
    model: String,
}

impl HfIntentClassifier {
    pub fn new(client: InferenceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl IntentClassifier for HfIntentClassifier {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn classify(&self, text: &str) -> Result<IntentClassification, InferenceError> {
        let labels: Vec<&str> = INTENT_LABELS.iter().map(Intent::as_str).collect();
        let raw: ZeroShot = self
            .client
            .infer(
                &self.model,
                json!(text),
                Some(json!({ "candidate_labels": labels })),
            )
            .await?;
        parse_zero_shot(raw)
    }
}

/// Mood / emotion via a text-classification model.
pub struct HfTextClassifier {
    client: InferenceClient,
    model: String,
}

impl HfTextClassifier {
    pub fn new(client: InferenceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl TextClassifier for HfTextClassifier {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn classify(&self, text: &str) -> Result<Vec<Classification>, InferenceError> {
        let raw: LabelScores = self.client.infer(&self.model, json!(text), None).await?;
        Ok(raw.into_first().into_iter().map(Into::into).collect())
    }
}

/// Genre via an audio-classification model.
pub struct HfAudioClassifier {
    client: InferenceClient,
    model: String,
}

impl HfAudioClassifier {
    pub fn new(client: InferenceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl AudioClassifier for HfAudioClassifier {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn classify(&self, audio: &[u8]) -> Result<Vec<Classification>, InferenceError> {
        let raw: Vec<LabelScore> = self.client.infer_bytes(&self.model, audio.to_vec()).await?;
        Ok(raw.into_iter().map(Into::into).collect())
    }
}
