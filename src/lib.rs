//! Docquery - policy document question answering
//!
//! Docquery ingests a single policy document, builds a persistent vector
//! index over overlapping text chunks, and answers natural-language questions
//! through a two-stage retrieve-then-rerank pipeline feeding a text
//! generation model. Answers carry page citations back to the source
//! document.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, ports, and the error taxonomy
//! - **Service Layer** (`services`): the query pipeline orchestrator
//! - **Infrastructure Layer** (`infrastructure`): document parsing, chunking,
//!   the vector index, the BM25 reranker, the result cache, and HTTP clients
//!   for the embedding and generation services
//! - **Server Layer** (`server`): thin axum glue exposing `POST /query`
//!
//! # Example
//!
//! ```ignore
//! use docquery::services::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Load config, initialize the pipeline, serve queries
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod server;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{PipelineError, PipelineResult};
pub use domain::models::{
    Chunk, ChunkingConfig, Config, PageLabel, PageUnit, QueryResult, RetrievalConfig, Source,
};
pub use domain::ports::{DocumentParser, EmbeddingProvider, GenerationClient};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::Pipeline;
