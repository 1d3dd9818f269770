//! In-memory query result cache.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::domain::models::QueryResult;

/// Normalize a raw query into its cache key: trimmed and lowercased, so
/// queries differing only in surrounding whitespace or letter case share an
/// entry.
pub fn normalize_key(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Unbounded map from normalized query to successful result.
///
/// Only successful results are stored; degraded responses are always
/// recomputed. The cache lives for the process lifetime and is never
/// evicted, which is acceptable for a single-document service with a
/// bounded question vocabulary.
///
/// Two concurrent first-time queries for the same key will both miss, both
/// compute, and both write. The results are identical for a deterministic
/// generation setup, so the duplicate work is tolerated rather than
/// serialized behind a per-key lock.
pub struct QueryCache {
    entries: RwLock<HashMap<String, QueryResult>>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a result by its already-normalized key.
    pub fn get(&self, key: &str) -> Option<QueryResult> {
        let result = self.entries.read().get(key).cloned();
        if result.is_some() {
            debug!(key, "cache hit");
        }
        result
    }

    /// Store a successful result under its normalized key.
    pub fn put(&self, key: String, result: QueryResult) {
        self.entries.write().insert(key, result);
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
