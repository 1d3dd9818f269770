//! Generation client port for answer synthesis.

use async_trait::async_trait;

use crate::domain::errors::PipelineResult;

/// Trait for text-generation clients.
///
/// Each call is stateless (no conversation memory). Identical prompts may
/// yield different answers; tests must not assert byte-identical output.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Client name (e.g., "openai-compatible", "stub").
    fn name(&self) -> &'static str;

    /// Generate answer text for a fully assembled prompt.
    async fn generate(&self, prompt: &str) -> PipelineResult<String>;
}
