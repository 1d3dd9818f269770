//! Domain models for documents, queries, and configuration.

pub mod config;
pub mod document;
pub mod query;

pub use config::{
    ChunkingConfig, Config, DocumentConfig, EmbeddingConfig, GenerationConfig, IndexConfig,
    LoggingConfig, RetrievalConfig, ServerConfig,
};
pub use document::{clean_text, Chunk, PageUnit};
pub use query::{PageLabel, QueryResult, Source};
