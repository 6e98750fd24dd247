use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{AdGenError, Result};

/// Stop sequences applied to every completion call, regardless of the
/// prompt. They cut the model off before it can continue the dialogue
/// framing with an invented next turn.
pub const STOP_SEQUENCES: [&str; 4] = ["Human", "Question", "Customer", "Guru"];

/// Sampling parameters for a single completion call. Built fresh by the
/// prompt builders for each stage and never reused.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Seam over the hosted text-completion model, so handler and pipeline
/// tests can substitute a scripted implementation.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, request: &GenerationRequest) -> Result<String>;
}

/// Completion client for a hosted text-completion endpoint.
///
/// One synchronous round trip per call, no retry: a failed call aborts
/// the whole request. Timeouts are whatever the HTTP client defaults to.
pub struct HttpCompletionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model_id: String,
}

impl HttpCompletionClient {
    pub fn new(endpoint: String, api_key: String, model_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key,
            model_id,
        }
    }
}

#[async_trait]
impl CompletionModel for HttpCompletionClient {
    async fn complete(&self, request: &GenerationRequest) -> Result<String> {
        let payload = json!({
            "model": self.model_id,
            "prompt": request.prompt,
            "max_tokens_to_sample": request.max_tokens,
            "temperature": request.temperature,
            "stop_sequences": STOP_SEQUENCES,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| AdGenError::Upstream(format!("completion request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AdGenError::Upstream(format!(
                "completion service returned {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AdGenError::Upstream(format!("malformed completion response: {e}")))?;

        // Diagnostic only, not part of the response contract.
        debug!(response = %body, "raw completion response");

        body.get("completion")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                AdGenError::Upstream("completion response missing 'completion' field".to_string())
            })
    }
}
