//! OpenAI-compatible chat completion client.
//!
//! Works against any server exposing the `/chat/completions` shape; the
//! default configuration points at Groq. Temperature 0 keeps answers
//! deterministic so cached and fresh results agree.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::GenerationConfig;
use crate::domain::ports::GenerationClient;

const API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Chat completion client for OpenAI-compatible endpoints.
pub struct OpenAiGenerationClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiGenerationClient {
    /// Create a client from configuration. The API key comes from the config
    /// when set, falling back to the `GROQ_API_KEY` environment variable.
    pub fn new(config: &GenerationConfig) -> PipelineResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .ok_or_else(|| {
                PipelineError::Generation(format!(
                    "no API key configured and {API_KEY_ENV} is not set"
                ))
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| {
                PipelineError::Generation(format!("failed to build HTTP client: {err}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl GenerationClient for OpenAiGenerationClient {
    fn name(&self) -> &'static str {
        "openai-compatible"
    }

    async fn generate(&self, prompt: &str) -> PipelineResult<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| PipelineError::Generation(format!("request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(PipelineError::Generation(format!(
                "generation server returned {status}: {detail}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| PipelineError::Generation(format!("invalid response body: {err}")))?;

        let answer = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| PipelineError::Generation("response contained no choices".to_string()))?;

        debug!(chars = answer.len(), "generation complete");
        Ok(answer)
    }
}
