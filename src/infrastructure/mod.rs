//! Infrastructure layer: adapters behind the domain ports plus the concrete
//! retrieval machinery (loader, chunker, vector index, reranker, cache).

pub mod cache;
pub mod chunker;
pub mod config;
pub mod embeddings;
pub mod generation;
pub mod index;
pub mod loader;
pub mod rerank;

pub use cache::QueryCache;
pub use chunker::Chunker;
pub use index::VectorIndex;
pub use rerank::Bm25Reranker;
