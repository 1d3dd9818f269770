//! Property tests for text normalization and chunk geometry.

use docquery::domain::models::{clean_text, ChunkingConfig, PageUnit};
use docquery::infrastructure::Chunker;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_clean_text_is_idempotent(text in ".{0,400}") {
        let once = clean_text(&text);
        prop_assert_eq!(clean_text(&once), once);
    }

    #[test]
    fn prop_clean_text_has_no_repeated_whitespace(text in ".{0,400}") {
        let cleaned = clean_text(&text);
        prop_assert!(!cleaned.contains("  "));
        prop_assert!(!cleaned.contains('\n'));
        prop_assert!(!cleaned.starts_with(' '));
        prop_assert!(!cleaned.ends_with(' '));
    }

    #[test]
    fn prop_chunks_respect_length_bound(
        text in "[a-z ]{0,2000}",
        size in 20usize..200,
        overlap in 1usize..19,
    ) {
        let chunker = Chunker::new(&ChunkingConfig {
            chunk_size: size,
            chunk_overlap: overlap,
        });
        let chunks = chunker.chunk_pages(&[PageUnit::new(Some(1), &text)]);

        for chunk in &chunks {
            prop_assert!(chunk.char_len() <= size);
            prop_assert!(chunk.char_len() > 0);
        }
    }

    #[test]
    fn prop_consecutive_chunks_share_overlap(
        text in "[a-z]{200,1500}",
        size in 50usize..150,
        overlap in 1usize..49,
    ) {
        let chunker = Chunker::new(&ChunkingConfig {
            chunk_size: size,
            chunk_overlap: overlap,
        });
        let chunks = chunker.chunk_pages(&[PageUnit::new(Some(1), &text)]);

        for pair in chunks.windows(2) {
            let prev: Vec<char> = pair[0].text.chars().collect();
            let next: Vec<char> = pair[1].text.chars().collect();
            prop_assert!(prev.len() >= overlap);
            prop_assert_eq!(
                &prev[prev.len() - overlap..],
                &next[..overlap.min(next.len())]
            );
        }
    }

    #[test]
    fn prop_non_overlap_concatenation_reconstructs_text(
        text in "[a-z ]{0,1500}",
        size in 50usize..150,
        overlap in 1usize..49,
    ) {
        let cleaned = clean_text(&text);
        let chunker = Chunker::new(&ChunkingConfig {
            chunk_size: size,
            chunk_overlap: overlap,
        });
        let chunks = chunker.chunk_pages(&[PageUnit::new(Some(1), &text)]);

        let step = size - overlap;
        let mut reconstructed = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i + 1 == chunks.len() {
                reconstructed.push_str(&chunk.text);
            } else {
                reconstructed.extend(chunk.text.chars().take(step));
            }
        }

        prop_assert_eq!(reconstructed, cleaned);
    }

    #[test]
    fn prop_chunking_is_deterministic(
        text in "[a-z ]{0,1000}",
        size in 20usize..200,
        overlap in 1usize..19,
    ) {
        let config = ChunkingConfig {
            chunk_size: size,
            chunk_overlap: overlap,
        };
        let a = Chunker::new(&config).chunk_pages(&[PageUnit::new(Some(1), &text)]);
        let b = Chunker::new(&config).chunk_pages(&[PageUnit::new(Some(1), &text)]);

        prop_assert_eq!(a.len(), b.len());
        for (left, right) in a.iter().zip(b.iter()) {
            prop_assert_eq!(&left.id, &right.id);
            prop_assert_eq!(&left.text, &right.text);
        }
    }
}
