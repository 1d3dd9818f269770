//! Pipeline orchestration.
//!
//! Wires the loader, chunker, embedding provider, vector index, reranker,
//! cache and generation client into the two operations the service exposes:
//! one-time initialization and per-query answering.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::errors::PipelineResult;
use crate::domain::models::{Config, QueryResult, RetrievalConfig, Source};
use crate::domain::ports::{EmbeddingProvider, GenerationClient};
use crate::infrastructure::cache::{normalize_key, QueryCache};
use crate::infrastructure::chunker::Chunker;
use crate::infrastructure::index::VectorIndex;
use crate::infrastructure::loader::load_document;
use crate::infrastructure::rerank::Bm25Reranker;

const CONTEXT_DELIMITER: &str = "\n\n---\n\n";

/// The question answering pipeline.
///
/// Construction is a one-time blocking operation that loads or builds the
/// vector index; a failure there leaves the service without a pipeline and
/// every query gets the fixed not-ready response at the HTTP layer. After
/// construction the pipeline is immutable apart from its cache, so it is
/// shared across request handlers behind an `Arc`.
pub struct Pipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn GenerationClient>,
    index: VectorIndex,
    reranker: Bm25Reranker,
    cache: QueryCache,
    retrieval: RetrievalConfig,
}

impl Pipeline {
    /// Load the persisted index if one exists, otherwise build it from the
    /// configured document and persist the result.
    ///
    /// Fails fast on a missing document, an unreadable document, an
    /// embedding failure during build, or a persisted index built with a
    /// different embedding dimension than the provider reports.
    pub async fn initialize(
        config: &Config,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn GenerationClient>,
    ) -> PipelineResult<Self> {
        let persist_dir = std::path::Path::new(&config.index.persist_dir);

        let index = if VectorIndex::snapshot_exists(persist_dir) {
            info!(dir = %persist_dir.display(), "loading persisted index");
            VectorIndex::load(persist_dir, embedder.dimension())?
        } else {
            info!(
                document = %config.document.path,
                "no persisted index found, building from document"
            );

            let pages = load_document(std::path::Path::new(&config.document.path))?;
            let chunks = Chunker::new(&config.chunking).chunk_pages(&pages);
            info!(pages = pages.len(), chunks = chunks.len(), "document chunked");

            let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
            let vectors = embedder.embed_batch(&texts).await?;

            let index = VectorIndex::build(
                &config.embedding.model,
                embedder.dimension(),
                chunks,
                vectors,
            );
            index.save(persist_dir)?;
            index
        };

        info!(
            chunks = index.len(),
            dimension = index.dimension(),
            model = index.model(),
            "pipeline ready"
        );

        Ok(Self {
            embedder,
            generator,
            index,
            reranker: Bm25Reranker::default(),
            cache: QueryCache::new(),
            retrieval: config.retrieval.clone(),
        })
    }

    /// Answer a query.
    ///
    /// Returns the cached result when the normalized query has been answered
    /// before. Otherwise runs retrieve, rerank and generate; a successful
    /// result is cached, a failed one is converted into a degraded response
    /// and not cached so a transient outage does not poison the cache.
    pub async fn query(&self, raw_query: &str) -> QueryResult {
        let key = normalize_key(raw_query);
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        match self.run_stages(raw_query).await {
            Ok(result) => {
                self.cache.put(key, result.clone());
                result
            }
            Err(err) => {
                warn!(error = %err, "query failed, returning degraded response");
                QueryResult::degraded(format!(
                    "An error occurred while processing your query: {err}"
                ))
            }
        }
    }

    async fn run_stages(&self, query: &str) -> PipelineResult<QueryResult> {
        let query_vector = self.embedder.embed(query).await?;

        let candidates = self.index.search(&query_vector, self.retrieval.top_k);
        debug!(candidates = candidates.len(), "retrieval complete");

        let reranked = self
            .reranker
            .rerank(query, candidates, self.retrieval.rerank_k);

        let prompt = build_prompt(query, reranked.iter().map(|c| (c.page, c.text.as_str())));
        let answer = self.generator.generate(&prompt).await?;

        let sources = reranked
            .iter()
            .map(|chunk| Source {
                page: chunk.page.into(),
                snippet: chunk.snippet(self.retrieval.snippet_chars),
            })
            .collect();

        Ok(QueryResult { answer, sources })
    }
}

/// Assemble the generation prompt: page-tagged context blocks in rerank
/// order, joined by a fixed delimiter, wrapped in the instruction template
/// with the literal question.
fn build_prompt<'a>(query: &str, chunks: impl Iterator<Item = (Option<u32>, &'a str)>) -> String {
    let context = chunks
        .map(|(page, text)| match page {
            Some(page) => format!("[Page {page}] {text}"),
            None => format!("[Page Unknown] {text}"),
        })
        .collect::<Vec<_>>()
        .join(CONTEXT_DELIMITER);

    format!(
        "Use the context below to answer the question concisely. \
         Cite page numbers when relevant.\n\n\
         Context:\n{context}\n\nQuestion: {query}\n\nAnswer:"
    )
}
