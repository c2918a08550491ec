//! End-to-end tests for the engine facade.
//!
//! Exercises the full pipeline on the UMSI corpus: analysis, indexing,
//! querying, ranking, removal, and the interchange format.

use invertex::core::config::EngineConfig;
use invertex::core::types::{DocId, ScoringMode, SearchOptions};
use invertex::engine::Engine;
use invertex::index::inverted::PostingEntry;

fn umsi_config() -> EngineConfig {
    EngineConfig::default()
        .with_stop_words(vec!["is", "this", "and"])
        .with_conflations(vec![("teaching", "teach"), ("teaches", "teach")])
}

fn setup_engine() -> Engine {
    let engine = Engine::new(umsi_config());
    engine
        .index(DocId(1), "This is SQL and Python and other fun teaching stuff")
        .unwrap();
    engine
        .index(DocId(2), "More people should learn SQL from UMSI")
        .unwrap();
    engine
        .index(DocId(3), "UMSI also teaches Python and also SQL")
        .unwrap();
    engine
}

fn search_ids(engine: &Engine, query: &str) -> Vec<u64> {
    let results = engine.search(query, &SearchOptions::default()).unwrap();
    let mut ids: Vec<u64> = results.hits.iter().map(|h| h.doc_id.value()).collect();
    ids.sort_unstable();
    ids
}

#[test]
fn umsi_corpus_scenario() {
    let engine = setup_engine();

    assert_eq!(search_ids(&engine, "SQL"), vec![1, 2, 3]);
    assert_eq!(search_ids(&engine, "teach"), vec![1, 3]);
    assert_eq!(search_ids(&engine, "learn & umsi"), vec![2]);
}

#[test]
fn conflation_is_symmetric_between_index_and_query() {
    let engine = setup_engine();

    // doc 1 was indexed with "teaching"; both the stem and another variant
    // must retrieve it
    assert_eq!(search_ids(&engine, "teach"), vec![1, 3]);
    assert_eq!(search_ids(&engine, "teaches"), vec![1, 3]);
    assert_eq!(search_ids(&engine, "teaching"), vec![1, 3]);
}

#[test]
fn stop_words_are_invisible() {
    let engine = setup_engine();

    // querying a stop word alone returns no documents
    assert!(search_ids(&engine, "and").is_empty());
    assert!(search_ids(&engine, "this").is_empty());

    // a document of nothing but stop words produces no postings
    engine.index(DocId(10), "this is and is this").unwrap();
    assert!(search_ids(&engine, "this").is_empty());
    let snapshot = engine.snapshot();
    assert!(snapshot.iter().all(|entry| {
        entry.postings.iter().all(|p| p.doc_id != DocId(10))
    }));
}

#[test]
fn boolean_operators() {
    let engine = Engine::new(EngineConfig::default());
    engine.index(DocId(1), "alpha").unwrap();
    engine.index(DocId(2), "alpha beta").unwrap();
    engine.index(DocId(3), "beta").unwrap();

    assert_eq!(search_ids(&engine, "alpha & beta"), vec![2]);
    assert_eq!(search_ids(&engine, "alpha | beta"), vec![1, 2, 3]);
    assert_eq!(search_ids(&engine, "alpha & !beta"), vec![1]);
}

#[test]
fn phrase_and_near_queries() {
    let engine = Engine::new(EngineConfig::default());
    engine.index(DocId(1), "learn SQL").unwrap();
    engine.index(DocId(2), "learn Python SQL").unwrap();

    assert_eq!(search_ids(&engine, "\"learn SQL\""), vec![1]);
    assert!(search_ids(&engine, "\"SQL learn\"").is_empty());
    assert_eq!(search_ids(&engine, "near(learn, SQL, 2)"), vec![1, 2]);
    assert_eq!(search_ids(&engine, "near(learn, SQL, 1)"), vec![1]);
}

#[test]
fn phrase_skips_removed_stop_words() {
    let engine = Engine::new(EngineConfig::default().with_stop_words(vec!["from"]));
    engine.index(DocId(1), "learn from UMSI").unwrap();

    // "from" is gone from both document and query; the survivors are adjacent
    assert_eq!(search_ids(&engine, "\"learn UMSI\""), vec![1]);
    assert_eq!(search_ids(&engine, "\"learn from UMSI\""), vec![1]);
}

#[test]
fn frequency_ranking_rewards_repetition() {
    let engine = Engine::new(EngineConfig::default());
    engine.index(DocId(1), "sql basics").unwrap();
    engine.index(DocId(2), "sql sql sql basics").unwrap();

    let results = engine.search("sql", &SearchOptions::default()).unwrap();
    let ids: Vec<u64> = results.hits.iter().map(|h| h.doc_id.value()).collect();
    assert_eq!(ids, vec![2, 1]);
    assert!(results.hits[0].score > results.hits[1].score);
    assert_eq!(results.max_score, results.hits[0].score);
}

#[test]
fn cover_density_prefers_clustered_matches() {
    let engine = Engine::new(EngineConfig::default());
    engine
        .index(DocId(1), "learn sql padding padding padding")
        .unwrap();
    engine
        .index(DocId(2), "learn padding padding padding sql")
        .unwrap();

    let options = SearchOptions {
        mode: ScoringMode::CoverDensity,
        ..Default::default()
    };
    let results = engine.search("learn sql", &options).unwrap();
    let ids: Vec<u64> = results.hits.iter().map(|h| h.doc_id.value()).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(results.hits[0].score > results.hits[1].score);
}

#[test]
fn removal_prunes_postings() {
    let engine = setup_engine();

    assert_eq!(engine.remove(DocId(2)).unwrap(), true);
    assert!(search_ids(&engine, "learn").is_empty());
    assert_eq!(search_ids(&engine, "sql"), vec![1, 3]);

    // removed id appears in no posting list
    let snapshot = engine.snapshot();
    assert!(snapshot.iter().all(|entry| {
        entry.postings.iter().all(|p| p.doc_id != DocId(2))
    }));

    // removing an unknown document is a surfaced no-op
    assert_eq!(engine.remove(DocId(99)).unwrap(), false);
}

#[test]
fn reindex_is_idempotent_through_the_facade() {
    let engine = Engine::new(umsi_config());
    engine.index(DocId(1), "learn SQL teaching teaching").unwrap();
    let once = engine.snapshot();
    engine.index(DocId(1), "learn SQL teaching teaching").unwrap();
    let twice = engine.snapshot();

    assert_eq!(once, twice);
}

#[test]
fn interchange_seeds_an_engine() {
    let engine = setup_engine();
    let entries = engine.snapshot();

    // round-trip through the canonical JSON form
    let json = serde_json::to_string_pretty(&entries).unwrap();
    let decoded: Vec<PostingEntry> = serde_json::from_str(&json).unwrap();

    let seeded = Engine::from_entries(umsi_config(), decoded);
    assert_eq!(search_ids(&seeded, "teach"), vec![1, 3]);
    assert_eq!(search_ids(&seeded, "learn & umsi"), vec![2]);
    assert_eq!(seeded.snapshot(), entries);
}

#[test]
fn syntax_error_in_strict_mode_tolerated_in_tolerant_mode() {
    let engine = setup_engine();

    let strict = SearchOptions::default();
    assert!(engine.search("learn &| umsi", &strict).is_err());

    let tolerant = SearchOptions {
        tolerant: true,
        ..Default::default()
    };
    let results = engine.search("learn &| umsi", &tolerant).unwrap();
    let ids: Vec<u64> = results.hits.iter().map(|h| h.doc_id.value()).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn concurrent_reads_during_writes() {
    use std::sync::Arc;
    use std::thread;

    let engine = Arc::new(setup_engine());
    let mut handles = Vec::new();

    for worker in 0..4u64 {
        let engine = Arc::clone(&engine);
        handles.push(thread::spawn(move || {
            for i in 0..50u64 {
                let doc_id = DocId(100 + worker * 100 + i);
                engine.index(doc_id, "concurrent sql writes").unwrap();
                let results = engine
                    .search("sql", &SearchOptions { limit: 1000, ..Default::default() })
                    .unwrap();
                // the three seed documents are always visible
                assert!(results.total_hits >= 3);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let stats = engine.stats();
    assert_eq!(stats.total_documents, 3 + 4 * 50);
}
