//! Text chunking
//!
//! Splits normalized page text into overlapping fixed-size passages,
//! preserving page provenance. Sizes are measured in characters and slicing
//! is always on character boundaries, so multi-byte text never splits a
//! code point.

use crate::domain::models::{Chunk, ChunkingConfig, PageUnit};

/// Deterministic sliding-window chunker.
///
/// Identical input and configuration always yield identical chunk
/// boundaries. Consecutive chunks from the same page share `chunk_overlap`
/// characters so relevant context is never split exactly at a boundary.
pub struct Chunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Chunker {
    /// Create a chunker from validated configuration.
    ///
    /// # Panics
    /// Panics when `chunk_size` or `chunk_overlap` is zero, or when
    /// `chunk_overlap >= chunk_size`; the config loader rejects such values
    /// before they reach this point, so hitting the panic indicates a
    /// programming error.
    pub fn new(config: &ChunkingConfig) -> Self {
        assert!(config.chunk_size > 0, "chunk_size must be greater than 0");
        assert!(
            config.chunk_overlap > 0,
            "chunk_overlap must be greater than 0"
        );
        assert!(
            config.chunk_overlap < config.chunk_size,
            "chunk_overlap must be less than chunk_size"
        );

        Self {
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
        }
    }

    /// Chunk an ordered sequence of page units, preserving page order.
    pub fn chunk_pages(&self, pages: &[PageUnit]) -> Vec<Chunk> {
        pages.iter().flat_map(|page| self.chunk_page(page)).collect()
    }

    /// Chunk a single page into overlapping windows.
    fn chunk_page(&self, unit: &PageUnit) -> Vec<Chunk> {
        let text = &unit.text;

        // Byte offsets of every character boundary, including the end.
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let total_chars = bounds.len() - 1;

        if total_chars == 0 {
            return Vec::new();
        }

        let step = self.chunk_size - self.chunk_overlap;
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut chunk_index = 0;

        loop {
            let end = (start + self.chunk_size).min(total_chars);
            let slice = &text[bounds[start]..bounds[end]];
            chunks.push(Chunk::new(unit.page, chunk_index, slice.to_string()));

            if end == total_chars {
                break;
            }

            start += step;
            chunk_index += 1;
        }

        chunks
    }
}
