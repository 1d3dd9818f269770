//! Embedding provider port for semantic vector generation.
//!
//! Defines the trait for embedding providers that convert text into dense
//! vector representations for distance-based search.

use async_trait::async_trait;

use crate::domain::errors::PipelineResult;

/// Trait for embedding providers.
///
/// Implementations must be deterministic: the same input text yields the
/// same vector, which the cache and index design relies on even though the
/// provider is typically a network-backed service.
///
/// Failures abort the calling operation (index build or query); no partial
/// index state is ever persisted.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Provider name (e.g., "ollama", "stub").
    fn name(&self) -> &'static str;

    /// Embedding dimension for this provider/model. Fixed for the lifetime
    /// of the provider and checked against persisted indexes on load.
    fn dimension(&self) -> usize;

    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> PipelineResult<Vec<f32>>;

    /// Generate embeddings for multiple texts in one call, preserving input
    /// order. Used at index-build time.
    async fn embed_batch(&self, texts: &[String]) -> PipelineResult<Vec<Vec<f32>>>;
}
