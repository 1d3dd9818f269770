//! Document and chunk models
//!
//! A loaded document is an ordered sequence of page units; the chunker turns
//! those into bounded, overlapping text chunks that carry page provenance
//! through indexing and retrieval.

use serde::{Deserialize, Serialize};

/// Collapse all line breaks and runs of whitespace into single spaces.
///
/// This is the shared normalization rule applied to every piece of text that
/// enters the pipeline. It is idempotent: `clean_text(clean_text(x))` equals
/// `clean_text(x)` for any input.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One page of cleaned text extracted from the source document.
///
/// Produced by the document loader and consumed by the chunker; never
/// persisted on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageUnit {
    /// Page number within the source document. `None` when the source format
    /// carries no page information.
    pub page: Option<u32>,

    /// Cleaned page text (whitespace-normalized).
    pub text: String,
}

impl PageUnit {
    /// Create a page unit, normalizing the text on the way in.
    pub fn new(page: Option<u32>, text: &str) -> Self {
        Self {
            page,
            text: clean_text(text),
        }
    }
}

/// A bounded text span with page provenance, the unit of indexing and
/// retrieval.
///
/// Chunks are created once at index-build time and are immutable thereafter;
/// they are destroyed only when the index is rebuilt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Stable identity used by the index.
    pub id: String,

    /// Page number inherited from the source page unit.
    pub page: Option<u32>,

    /// The chunk text. Always whitespace-normalized and at most
    /// `chunk_size` characters long.
    pub text: String,
}

impl Chunk {
    /// Create a new chunk with an identity derived from its position.
    pub fn new(page: Option<u32>, chunk_index: usize, text: String) -> Self {
        let id = match page {
            Some(page) => format!("page-{page}:chunk-{chunk_index}"),
            None => format!("chunk-{chunk_index}"),
        };

        Self { id, page, text }
    }

    /// Character length of the chunk text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// The first `max_chars` characters of the chunk text, used for source
    /// snippets in query responses.
    pub fn snippet(&self, max_chars: usize) -> String {
        self.text.chars().take(max_chars).collect()
    }
}
