//! Generation client adapters.

pub mod openai;

pub use openai::OpenAiGenerationClient;
