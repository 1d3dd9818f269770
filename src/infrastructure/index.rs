//! Vector index with JSON disk persistence.
//!
//! A flat in-memory index over chunk embeddings. Search is a linear cosine
//! scan, which is fast enough for a single document's worth of chunks and
//! keeps the index trivially serializable.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::Chunk;

const SNAPSHOT_FILE: &str = "index.json";

/// A retrieved chunk with its distance from the query vector.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub chunk: Chunk,
    pub distance: f32,
}

/// On-disk snapshot of a built index.
#[derive(Debug, Serialize, Deserialize)]
struct IndexSnapshot {
    model: String,
    dimension: usize,
    built_at: DateTime<Utc>,
    chunks: Vec<Chunk>,
    vectors: Vec<Vec<f32>>,
}

/// In-memory vector index over the document's chunks.
///
/// Built once at startup (or loaded from a persisted snapshot) and read-only
/// thereafter. Chunks and vectors are parallel arrays; position `i` in one
/// corresponds to position `i` in the other.
pub struct VectorIndex {
    chunks: Vec<Chunk>,
    vectors: Vec<Vec<f32>>,
    dimension: usize,
    model: String,
}

impl VectorIndex {
    /// Build an index from chunks and their embeddings.
    ///
    /// # Panics
    /// Panics when the two slices differ in length; the embedding provider
    /// guarantees one vector per input, so a mismatch is a programming error.
    pub fn build(model: &str, dimension: usize, chunks: Vec<Chunk>, vectors: Vec<Vec<f32>>) -> Self {
        assert_eq!(
            chunks.len(),
            vectors.len(),
            "every chunk must have exactly one embedding"
        );

        Self {
            chunks,
            vectors,
            dimension,
            model: model.to_string(),
        }
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Embedding dimension this index was built with.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Embedding model this index was built with.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Persist the index as a JSON snapshot under `dir`.
    pub fn save(&self, dir: &Path) -> PipelineResult<()> {
        fs::create_dir_all(dir)?;

        let snapshot = IndexSnapshot {
            model: self.model.clone(),
            dimension: self.dimension,
            built_at: Utc::now(),
            chunks: self.chunks.clone(),
            vectors: self.vectors.clone(),
        };

        let path = dir.join(SNAPSHOT_FILE);
        let json = serde_json::to_string(&snapshot)?;
        fs::write(&path, json)?;

        info!(path = %path.display(), chunks = self.chunks.len(), "index persisted");
        Ok(())
    }

    /// Whether a persisted snapshot exists under `dir`.
    pub fn snapshot_exists(dir: &Path) -> bool {
        dir.join(SNAPSHOT_FILE).is_file()
    }

    /// Load a persisted snapshot from `dir`.
    ///
    /// Fails with [`PipelineError::IndexMismatch`] when the snapshot was
    /// built with a different embedding dimension than the one configured
    /// now; a stale index would silently return garbage distances, so the
    /// mismatch is fatal and the operator must rebuild.
    pub fn load(dir: &Path, expected_dimension: usize) -> PipelineResult<Self> {
        let path = dir.join(SNAPSHOT_FILE);
        let json = fs::read_to_string(&path)?;
        let snapshot: IndexSnapshot = serde_json::from_str(&json)?;

        if snapshot.dimension != expected_dimension {
            return Err(PipelineError::IndexMismatch {
                expected: expected_dimension,
                found: snapshot.dimension,
            });
        }

        info!(
            path = %path.display(),
            chunks = snapshot.chunks.len(),
            model = %snapshot.model,
            built_at = %snapshot.built_at,
            "index loaded from snapshot"
        );

        Ok(Self {
            chunks: snapshot.chunks,
            vectors: snapshot.vectors,
            dimension: snapshot.dimension,
            model: snapshot.model,
        })
    }

    /// Return the `k` chunks nearest to `query`, ordered by ascending cosine
    /// distance. Ties keep index order; the sort is stable.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<SearchHit> {
        let mut hits: Vec<SearchHit> = self
            .chunks
            .iter()
            .zip(self.vectors.iter())
            .map(|(chunk, vector)| SearchHit {
                chunk: chunk.clone(),
                distance: cosine_distance(query, vector),
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(k);

        debug!(k, returned = hits.len(), "vector search complete");
        hits
    }
}

/// Cosine distance between two vectors (1 - cosine similarity).
///
/// Returns `f32::MAX` for mismatched lengths or zero-magnitude vectors so
/// that degenerate entries sort last instead of poisoning the ranking.
fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::MAX;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return f32::MAX;
    }

    1.0 - dot / (mag_a * mag_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(i: usize) -> Chunk {
        Chunk::new(Some(1), i, format!("chunk number {i}"))
    }

    fn small_index() -> VectorIndex {
        VectorIndex::build(
            "test-model",
            3,
            vec![chunk(0), chunk(1), chunk(2)],
            vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.9, 0.1, 0.0],
            ],
        )
    }

    #[test]
    fn test_cosine_distance_identical_vectors() {
        let d = cosine_distance(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        assert!(d.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_distance_orthogonal_vectors() {
        let d = cosine_distance(&[1.0, 0.0], &[0.0, 1.0]);
        assert!((d - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_distance_degenerate_inputs() {
        assert_eq!(cosine_distance(&[1.0, 0.0], &[1.0]), f32::MAX);
        assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]), f32::MAX);
    }

    #[test]
    fn test_search_orders_by_distance() {
        let index = small_index();
        let hits = index.search(&[1.0, 0.0, 0.0], 3);

        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].chunk.id, "page-1:chunk-0");
        assert_eq!(hits[1].chunk.id, "page-1:chunk-2");
        assert_eq!(hits[2].chunk.id, "page-1:chunk-1");
        assert!(hits[0].distance <= hits[1].distance);
        assert!(hits[1].distance <= hits[2].distance);
    }

    #[test]
    fn test_search_truncates_to_k() {
        let index = small_index();
        assert_eq!(index.search(&[1.0, 0.0, 0.0], 2).len(), 2);
    }

    #[test]
    fn test_search_k_larger_than_index() {
        let index = small_index();
        assert_eq!(index.search(&[1.0, 0.0, 0.0], 50).len(), 3);
    }

    #[test]
    fn test_search_ties_keep_index_order() {
        let index = VectorIndex::build(
            "test-model",
            2,
            vec![chunk(0), chunk(1)],
            vec![vec![0.0, 1.0], vec![0.0, 1.0]],
        );

        let hits = index.search(&[1.0, 0.0], 2);
        assert_eq!(hits[0].chunk.id, "page-1:chunk-0");
        assert_eq!(hits[1].chunk.id, "page-1:chunk-1");
    }

    #[test]
    #[should_panic(expected = "every chunk must have exactly one embedding")]
    fn test_build_rejects_length_mismatch() {
        VectorIndex::build("test-model", 2, vec![chunk(0)], vec![]);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let index = small_index();
        index.save(dir.path()).unwrap();

        assert!(VectorIndex::snapshot_exists(dir.path()));

        let loaded = VectorIndex::load(dir.path(), 3).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.model(), "test-model");
        assert_eq!(loaded.dimension(), 3);

        let hits = loaded.search(&[1.0, 0.0, 0.0], 1);
        assert_eq!(hits[0].chunk.id, "page-1:chunk-0");
    }

    #[test]
    fn test_load_rejects_dimension_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        small_index().save(dir.path()).unwrap();

        let result = VectorIndex::load(dir.path(), 768);
        assert!(matches!(
            result,
            Err(PipelineError::IndexMismatch {
                expected: 768,
                found: 3
            })
        ));
    }

    #[test]
    fn test_load_missing_snapshot_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = VectorIndex::load(dir.path(), 3);
        assert!(matches!(result, Err(PipelineError::Storage(_))));
    }
}
