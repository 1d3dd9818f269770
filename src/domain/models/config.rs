//! Configuration models
//!
//! Plain data structures with programmatic defaults. Loading, merging, and
//! validation live in `infrastructure::config`.

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Source document to ingest.
    pub document: DocumentConfig,

    /// Vector index persistence.
    pub index: IndexConfig,

    /// Chunking parameters.
    pub chunking: ChunkingConfig,

    /// Retrieval parameters.
    pub retrieval: RetrievalConfig,

    /// Embedding service selection.
    pub embedding: EmbeddingConfig,

    /// Generation service selection.
    pub generation: GenerationConfig,

    /// HTTP server binding.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Which document to ingest at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Path to the source document (PDF or plain text).
    pub path: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: "policy.pdf".to_string(),
        }
    }
}

/// Where the vector index is persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Directory holding the index snapshot. Created on first build; loaded
    /// read-only on subsequent startups.
    pub persist_dir: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            persist_dir: "./index".to_string(),
        }
    }
}

/// Configuration for document chunking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum size of each chunk in characters.
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in characters, to avoid splitting
    /// relevant context at a boundary. Must be less than `chunk_size`.
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 50,
        }
    }
}

/// Configuration for the two-stage search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of candidates fetched from the vector index.
    pub top_k: usize,

    /// Number of candidates kept after the BM25 rerank. Must not exceed
    /// `top_k`.
    pub rerank_k: usize,

    /// Maximum source snippet length in characters.
    pub snippet_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            rerank_k: 5,
            snippet_chars: 300,
        }
    }
}

/// Embedding service selection and transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Base URL of the Ollama-compatible embedding service.
    pub base_url: String,

    /// Embedding model name.
    pub model: String,

    /// Expected embedding dimension. Must match between build time and query
    /// time; a mismatch is a fatal consistency error.
    pub dimension: usize,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "nomic-embed-text".to_string(),
            dimension: 768,
            timeout_secs: 30,
        }
    }
}

/// Generation service selection and transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// API key. Falls back to the `GROQ_API_KEY` environment variable when
    /// unset.
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible chat completions API.
    pub base_url: String,

    /// Generation model name.
    pub model: String,

    /// Sampling temperature. Zero minimizes run-to-run variation, though
    /// byte-identical repeatability is not guaranteed.
    pub temperature: f32,

    /// Maximum tokens in the generated answer.
    pub max_tokens: u32,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.0,
            max_tokens: 1024,
            timeout_secs: 60,
        }
    }
}

/// HTTP server binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,

    /// Bind port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, or error.
    pub level: String,

    /// Log format: json or pretty.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
