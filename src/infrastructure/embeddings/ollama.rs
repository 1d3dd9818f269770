//! Ollama embedding provider.
//!
//! Talks to a local Ollama server's `/api/embed` endpoint. Batch requests
//! send all inputs in one call; the server returns embeddings in input
//! order.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::EmbeddingConfig;
use crate::domain::ports::EmbeddingProvider;

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Embedding provider backed by an Ollama server.
pub struct OllamaEmbeddingProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimension: usize,
}

impl OllamaEmbeddingProvider {
    pub fn new(config: &EmbeddingConfig) -> PipelineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| {
                PipelineError::Embedding(format!("failed to build HTTP client: {err}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            dimension: config.dimension,
        })
    }

    async fn request(&self, input: &[String]) -> PipelineResult<Vec<Vec<f32>>> {
        let url = format!("{}/api/embed", self.base_url);
        let body = EmbedRequest {
            model: &self.model,
            input,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| PipelineError::Embedding(format!("request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(PipelineError::Embedding(format!(
                "embedding server returned {status}: {detail}"
            )));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|err| PipelineError::Embedding(format!("invalid response body: {err}")))?;

        if parsed.embeddings.len() != input.len() {
            return Err(PipelineError::Embedding(format!(
                "expected {} embeddings, got {}",
                input.len(),
                parsed.embeddings.len()
            )));
        }

        for embedding in &parsed.embeddings {
            if embedding.len() != self.dimension {
                return Err(PipelineError::Embedding(format!(
                    "model returned dimension {}, configured dimension is {}",
                    embedding.len(),
                    self.dimension
                )));
            }
        }

        debug!(count = parsed.embeddings.len(), "embeddings received");
        Ok(parsed.embeddings)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> PipelineResult<Vec<f32>> {
        let input = [text.to_string()];
        let mut embeddings = self.request(&input).await?;
        embeddings
            .pop()
            .ok_or_else(|| PipelineError::Embedding("empty embedding response".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> PipelineResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts).await
    }
}
