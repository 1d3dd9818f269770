//! Error taxonomy for the question answering pipeline.

use thiserror::Error;

/// Errors that can occur while building the index or answering a query.
///
/// Startup errors (`Load`, `Storage`, `IndexMismatch`) leave the pipeline
/// uninitialized; per-query errors (`Embedding`, `Generation`) are caught at
/// the orchestrator boundary and converted into a degraded response rather
/// than propagated to the caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to load document: {0}")]
    Load(String),

    #[error("Embedding service failure: {0}")]
    Embedding(String),

    #[error("Generation service failure: {0}")]
    Generation(String),

    #[error(
        "Persisted index is incompatible with the configured embedding model: \
         expected dimension {expected}, found {found}"
    )]
    IndexMismatch { expected: usize, found: usize },

    #[error("Index storage error: {0}")]
    Storage(String),
}

/// Convenience alias used throughout the crate.
pub type PipelineResult<T> = Result<T, PipelineError>;

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipelineError::Load("no such file".to_string());
        assert_eq!(err.to_string(), "Failed to load document: no such file");

        let err = PipelineError::IndexMismatch {
            expected: 768,
            found: 384,
        };
        assert!(err.to_string().contains("768"));
        assert!(err.to_string().contains("384"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PipelineError = io.into();
        assert!(matches!(err, PipelineError::Storage(_)));
    }
}
