//! HTTP client for a hosted model inference API.
//!
//! Requests are `POST {base_url}/{model_id}`. Text models take a JSON body
//! `{"inputs": ..., "options": {"wait_for_model": true}}`; audio models take
//! the raw clip bytes.
//!
//! Models whose default task is not the one wanted (sentence-transformers
//! default to sentence-similarity) are called through the task route
//! `POST {host}/pipeline/{task}/{model_id}`, where `host` is `base_url`
//! without its trailing `/models`.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;
use tunebridge_application::InferenceError;

/// Shared connection settings for every model adapter.
#[derive(Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl InferenceClient {
    pub fn new(
        base_url: impl Into<String>,
        api_token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, InferenceError> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            "tunebridge/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| InferenceError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token,
        })
    }

    pub fn model_url(&self, model_id: &str) -> String {
        format!("{}/{}", self.base_url, model_id)
    }

    pub fn task_url(&self, task: &str, model_id: &str) -> String {
        let host = self
            .base_url
            .strip_suffix("/models")
            .unwrap_or(&self.base_url);
        format!("{}/pipeline/{}/{}", host, task, model_id)
    }

    /// Run a text model. `parameters` is sent only when present.
    pub async fn infer<T: DeserializeOwned>(
        &self,
        model_id: &str,
        inputs: Value,
        parameters: Option<Value>,
    ) -> Result<T, InferenceError> {
        self.post_json(self.model_url(model_id), model_id, inputs, parameters)
            .await
    }

    /// Run a model under an explicit pipeline task (e.g. `feature-extraction`).
    pub async fn infer_task<T: DeserializeOwned>(
        &self,
        task: &str,
        model_id: &str,
        inputs: Value,
        parameters: Option<Value>,
    ) -> Result<T, InferenceError> {
        self.post_json(self.task_url(task, model_id), model_id, inputs, parameters)
            .await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: String,
        model_id: &str,
        inputs: Value,
        parameters: Option<Value>,
    ) -> Result<T, InferenceError> {
        debug!(model = model_id, url = %url, "inference request");
        let request = self
            .authorize(self.http.post(url))
            .json(&request_body(inputs, parameters));
        self.send(model_id, request).await
    }

    /// Run an audio model on an encoded clip.
    pub async fn infer_bytes<T: DeserializeOwned>(
        &self,
        model_id: &str,
        bytes: Vec<u8>,
    ) -> Result<T, InferenceError> {
        debug!(model = model_id, bytes = bytes.len(), "audio inference request");
        let request = self
            .authorize(self.http.post(self.model_url(model_id)))
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes);
        self.send(model_id, request).await
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        model_id: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, InferenceError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                InferenceError::Timeout
            } else {
                InferenceError::ConnectionError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(status_error(model_id, status, message));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| InferenceError::InvalidResponse(format!("{}: {}", model_id, e)))
    }
}

fn request_body(inputs: Value, parameters: Option<Value>) -> Value {
    let mut body = json!({
        "inputs": inputs,
        "options": { "wait_for_model": true },
    });
    if let Some(parameters) = parameters {
        body["parameters"] = parameters;
    }
    body
}

fn status_error(model_id: &str, status: StatusCode, message: String) -> InferenceError {
    if status == StatusCode::SERVICE_UNAVAILABLE {
        InferenceError::ModelLoading(model_id.to_string())
    } else {
        InferenceError::RequestFailed {
            status: status.as_u16(),
            message,
        }
    }
}
