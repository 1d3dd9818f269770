//! Ports for the question answering pipeline
//!
//! Narrow trait interfaces at the seams of the core so it can be exercised
//! with deterministic stub implementations, decoupled from any specific
//! external service.

pub mod embedding;
pub mod generation;
pub mod parser;

pub use embedding::EmbeddingProvider;
pub use generation::GenerationClient;
pub use parser::DocumentParser;
