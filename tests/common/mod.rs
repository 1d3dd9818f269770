//! Shared test fixtures: deterministic in-process stand-ins for the
//! embedding and generation ports, with call counters so tests can assert
//! that cached queries skip the expensive stages.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use docquery::domain::errors::{PipelineError, PipelineResult};
use docquery::domain::ports::{EmbeddingProvider, GenerationClient};

pub const STUB_DIMENSION: usize = 64;

/// Hash-based embedding, deterministic per input and unit length.
pub fn deterministic_embedding(text: &str, dimension: usize) -> Vec<f32> {
    let bytes = text.as_bytes();
    let mut embedding = vec![0.0f32; dimension];

    for (i, val) in embedding.iter_mut().enumerate() {
        let byte = if bytes.is_empty() {
            0
        } else {
            bytes[i % bytes.len()]
        };
        *val = ((byte as usize * 31 + i * 17) % 256) as f32 / 255.0 - 0.5;
    }

    let magnitude = embedding
        .iter()
        .map(|x| f64::from(*x) * f64::from(*x))
        .sum::<f64>()
        .sqrt() as f32;
    if magnitude > 1e-10 {
        for val in &mut embedding {
            *val /= magnitude;
        }
    }

    embedding
}

/// Deterministic embedding provider that counts its calls.
pub struct StubEmbedding {
    dimension: usize,
    pub calls: AtomicUsize,
}

impl Default for StubEmbedding {
    fn default() -> Self {
        Self::new()
    }
}

impl StubEmbedding {
    pub fn new() -> Self {
        Self::with_dimension(STUB_DIMENSION)
    }

    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbedding {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> PipelineResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(deterministic_embedding(text, self.dimension))
    }

    async fn embed_batch(&self, texts: &[String]) -> PipelineResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|t| deterministic_embedding(t, self.dimension))
            .collect())
    }
}

/// Generation client returning a fixed answer, counting its calls.
pub struct StubGenerator {
    pub answer: String,
    pub calls: AtomicUsize,
}

impl StubGenerator {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationClient for StubGenerator {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn generate(&self, _prompt: &str) -> PipelineResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer.clone())
    }
}

/// Embedding provider that fails every call.
pub struct FailingEmbedding;

#[async_trait]
impl EmbeddingProvider for FailingEmbedding {
    fn name(&self) -> &'static str {
        "failing-stub"
    }

    fn dimension(&self) -> usize {
        STUB_DIMENSION
    }

    async fn embed(&self, _text: &str) -> PipelineResult<Vec<f32>> {
        Err(PipelineError::Embedding("stub outage".to_string()))
    }

    async fn embed_batch(&self, _texts: &[String]) -> PipelineResult<Vec<Vec<f32>>> {
        Err(PipelineError::Embedding("stub outage".to_string()))
    }
}

/// Generation client that fails its first call and succeeds afterwards,
/// used to prove that failed queries are not cached.
pub struct FlakyGenerator {
    pub answer: String,
    pub calls: AtomicUsize,
}

impl FlakyGenerator {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl GenerationClient for FlakyGenerator {
    fn name(&self) -> &'static str {
        "flaky-stub"
    }

    async fn generate(&self, _prompt: &str) -> PipelineResult<String> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(PipelineError::Generation("transient outage".to_string()))
        } else {
            Ok(self.answer.clone())
        }
    }
}

