use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::analysis::analyzer::Analyzer;
use crate::core::config::EngineConfig;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::stats::EngineStats;
use crate::core::types::{DocId, ScoringMode, SearchOptions};
use crate::index::inverted::{InvertedIndex, PostingEntry};
use crate::query::cache::{QueryCache, QueryKey};
use crate::query::executor::QueryExecutor;
use crate::query::parser::QueryParser;
use crate::scoring::scorer::{CoverDensityScorer, FrequencyScorer, Scorer};
use crate::search::results::{ScoredDocument, SearchResults, TopKCollector};

/// Analyzer and index move together: a reload must never let a reader pair a
/// new analyzer with postings built by the old one mid-query.
struct EngineState {
    analyzer: Analyzer,
    index: InvertedIndex,
}

/// The engine facade: ingest, configure, query.
///
/// The index is the single shared mutable resource. Writers hold the write
/// lock for one document operation (per-document atomicity); readers run in
/// parallel with each other and see either the pre- or post-update state of
/// any given document, never an interleaving. Everything outside the lock is
/// a pure function over immutable inputs.
///
/// Result-cache accesses are ordered by the state lock: readers insert while
/// still holding the read lock, writers invalidate while still holding the
/// write lock. A result computed against the pre-write index therefore cannot
/// land in the cache after that write's invalidation.
pub struct Engine {
    state: RwLock<EngineState>,
    executor: QueryExecutor,
    cache: QueryCache,
    config: EngineConfig,

    start_time: Instant,
    query_count: AtomicU64,
    write_count: AtomicU64,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let analyzer = Analyzer::standard(
            config.stop_words.clone(),
            config.conflations.clone(),
        );
        Engine {
            state: RwLock::new(EngineState {
                analyzer,
                index: InvertedIndex::new(),
            }),
            executor: QueryExecutor::new(),
            cache: QueryCache::new(config.cache_capacity),
            config,
            start_time: Instant::now(),
            query_count: AtomicU64::new(0),
            write_count: AtomicU64::new(0),
        }
    }

    /// Seed an engine from interchange entries, bypassing the write path.
    pub fn from_entries(config: EngineConfig, entries: Vec<PostingEntry>) -> Self {
        let engine = Engine::new(config);
        {
            let mut state = engine.state.write();
            state.index = InvertedIndex::from_entries(entries);
        }
        engine
    }

    /// Index or re-index a document. Re-indexing replaces the previous
    /// vector wholesale; indexing identical text twice is idempotent.
    pub fn index(&self, doc_id: DocId, text: &str) -> Result<()> {
        let mut state = self.state.write();
        let tokens = state.analyzer.analyze(text);
        debug!(doc_id = doc_id.0, tokens = tokens.len(), "indexing document");
        state.index.upsert(doc_id, &tokens);
        self.cache.clear();
        drop(state);

        self.write_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Remove a document from the index. Removing an unknown id is a no-op
    /// surfaced as `Ok(false)`.
    pub fn remove(&self, doc_id: DocId) -> Result<bool> {
        let mut state = self.state.write();
        let removed = state.index.remove(doc_id);
        if removed {
            self.cache.clear();
        }
        drop(state);

        if removed {
            debug!(doc_id = doc_id.0, "removed document");
            self.write_count.fetch_add(1, Ordering::Relaxed);
        } else {
            warn!(doc_id = doc_id.0, "remove of unknown document ignored");
        }
        Ok(removed)
    }

    /// Drop every indexed document. The analysis configuration survives.
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.index.clear();
        self.cache.clear();
        drop(state);

        self.write_count.fetch_add(1, Ordering::Relaxed);
        info!("index cleared");
    }

    /// Replace the stop-word set and conflation table between indexing
    /// batches. Holds exclusive access for the duration and drops the result
    /// cache; previously indexed documents keep the vectors built under the
    /// old configuration until re-indexed by the caller.
    pub fn reload<S>(&self, stop_words: Vec<S>, conflations: Vec<(S, S)>)
    where
        S: Into<String>,
    {
        let analyzer = Analyzer::standard(stop_words, conflations);
        let mut state = self.state.write();
        state.analyzer = analyzer;
        self.cache.clear();
        drop(state);

        info!("analysis configuration reloaded");
    }

    /// Evaluate a query and return hits ordered by descending score, ties by
    /// ascending document id.
    pub fn search(&self, query_text: &str, options: &SearchOptions) -> Result<SearchResults> {
        self.query_count.fetch_add(1, Ordering::Relaxed);

        if options.limit == 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "search limit must be at least 1".to_string(),
            ));
        }

        let key = QueryKey::new(query_text, options);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let start = Instant::now();
        let state = self.state.read();

        let parser = QueryParser::new(&state.analyzer);
        let query = parser.parse(query_text, options.tolerant)?;
        let candidates = self.executor.execute(&query, &state.index);
        let stems = query.positive_stems();

        let scorer: &dyn Scorer = match options.mode {
            ScoringMode::Frequency => &FrequencyScorer,
            ScoringMode::CoverDensity => &CoverDensityScorer,
        };

        let mut collector = TopKCollector::new(options.limit);
        for doc_id in candidates {
            let score = scorer.score(&state.index, doc_id, &stems);
            collector.collect(ScoredDocument { doc_id, score });
        }

        let results = SearchResults {
            total_hits: collector.total_collected,
            max_score: collector.max_score(),
            hits: collector.into_results(),
            took_ms: start.elapsed().as_millis() as u64,
        };
        // Insert while still holding the read lock; writers clear under the
        // write lock, which orders this insert before any later invalidation.
        self.cache.put(key, results.clone());
        drop(state);

        debug!(
            query = query_text,
            hits = results.total_hits,
            scorer = scorer.name(),
            positional = query.has_positional(),
            "search executed"
        );
        Ok(results)
    }

    /// Interchange snapshot of the index, sorted by stem.
    pub fn snapshot(&self) -> Vec<PostingEntry> {
        self.state.read().index.to_entries()
    }

    pub fn stats(&self) -> EngineStats {
        let state = self.state.read();
        EngineStats {
            uptime_secs: self.start_time.elapsed().as_secs(),
            total_documents: state.index.doc_count(),
            distinct_terms: state.index.term_count(),
            total_tokens: state.index.total_tokens,
            query_count: self.query_count.load(Ordering::Relaxed),
            write_count: self.write_count.load(Ordering::Relaxed),
            cache: self.cache.stats(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Search options preloaded with the configured default result limit.
    pub fn default_options(&self) -> SearchOptions {
        SearchOptions {
            limit: self.config.default_limit,
            ..Default::default()
        }
    }
}
