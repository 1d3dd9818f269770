//! BM25 reranking over vector search candidates.
//!
//! Vector search recalls candidates by semantic proximity; BM25 then
//! reorders them by exact term overlap with the query, which favors chunks
//! that literally contain the question's words. The corpus statistics are
//! computed over the candidate set only, not the whole index.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::models::Chunk;
use crate::infrastructure::index::SearchHit;

const DEFAULT_K1: f32 = 1.5;
const DEFAULT_B: f32 = 0.75;

/// Okapi BM25 scorer with standard parameters.
pub struct Bm25Reranker {
    k1: f32,
    b: f32,
}

impl Default for Bm25Reranker {
    fn default() -> Self {
        Self {
            k1: DEFAULT_K1,
            b: DEFAULT_B,
        }
    }
}

impl Bm25Reranker {
    pub fn new(k1: f32, b: f32) -> Self {
        Self { k1, b }
    }

    /// Rerank `candidates` by BM25 score against `query`, descending, and
    /// keep the top `rerank_k`.
    ///
    /// The sort is stable, so candidates with equal scores (including the
    /// all-zero case where no query term appears anywhere) retain their
    /// vector search order.
    pub fn rerank(&self, query: &str, candidates: Vec<SearchHit>, rerank_k: usize) -> Vec<Chunk> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let query_terms = tokenize(query);
        let docs: Vec<Vec<String>> = candidates
            .iter()
            .map(|hit| tokenize(&hit.chunk.text))
            .collect();

        let n = docs.len() as f32;
        let avg_len = docs.iter().map(Vec::len).sum::<usize>() as f32 / n;

        // Document frequency per query term, over the candidate set.
        let mut df: HashMap<&str, usize> = HashMap::new();
        for term in &query_terms {
            let count = docs
                .iter()
                .filter(|doc| doc.iter().any(|t| t == term))
                .count();
            df.insert(term, count);
        }

        let mut scored: Vec<(f32, Chunk)> = candidates
            .into_iter()
            .zip(docs.iter())
            .map(|(hit, doc)| {
                let score = self.score(&query_terms, doc, &df, n, avg_len);
                (score, hit.chunk)
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(rerank_k);

        debug!(rerank_k, kept = scored.len(), "rerank complete");
        scored.into_iter().map(|(_, chunk)| chunk).collect()
    }

    fn score(
        &self,
        query_terms: &[String],
        doc: &[String],
        df: &HashMap<&str, usize>,
        n: f32,
        avg_len: f32,
    ) -> f32 {
        let doc_len = doc.len() as f32;

        query_terms
            .iter()
            .map(|term| {
                let tf = doc.iter().filter(|t| *t == term).count() as f32;
                if tf == 0.0 {
                    return 0.0;
                }

                let df = df.get(term.as_str()).copied().unwrap_or(0) as f32;
                let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();
                let norm = self.k1 * (1.0 - self.b + self.b * doc_len / avg_len);

                idf * tf * (self.k1 + 1.0) / (tf + norm)
            })
            .sum()
    }
}

/// Lowercased whitespace tokenization, matching the pipeline's text
/// normalization. No stemming or stop-word removal.
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect()
}
