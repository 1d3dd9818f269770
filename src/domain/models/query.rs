//! Query result wire shapes
//!
//! These types form the response contract consumed by the UI collaborator:
//! `{answer, sources: [{page, snippet}]}`. A degraded response uses the same
//! shape with an error-derived answer and an empty source list.

use serde::{Deserialize, Serialize};

/// Page reference in a source citation. Serializes as a number when the page
/// is known and as the string `"Unknown"` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageLabel {
    /// A concrete page number.
    Number(u32),
    /// Page provenance was unavailable for this chunk.
    Unknown(String),
}

impl From<Option<u32>> for PageLabel {
    fn from(page: Option<u32>) -> Self {
        match page {
            Some(page) => PageLabel::Number(page),
            None => PageLabel::Unknown("Unknown".to_string()),
        }
    }
}

/// One supporting passage for an answer, in rerank order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Page the passage came from.
    pub page: PageLabel,

    /// Leading characters of the cleaned chunk text.
    pub snippet: String,
}

/// The result of one query: a generated answer plus its source citations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Generated answer text, or a human-readable error description on the
    /// degraded path.
    pub answer: String,

    /// Supporting passages, ordered by rerank score. Empty on the degraded
    /// path.
    pub sources: Vec<Source>,
}

impl QueryResult {
    /// A well-formed result carrying an error-derived answer instead of
    /// crashing the caller.
    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            answer: message.into(),
            sources: Vec::new(),
        }
    }
}
