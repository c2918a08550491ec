//! Fixture-driven tests: seed index state directly from the canonical
//! interchange form, bypassing the write path.

use invertex::core::types::DocId;
use invertex::index::inverted::{InvertedIndex, PostingEntry};
use invertex::query::ast::Query;
use invertex::query::executor::QueryExecutor;

fn fixture_entries() -> Vec<PostingEntry> {
    let json = r#"[
        {"stem": "learn", "postings": [
            {"doc_id": 2, "positions": [3]}
        ]},
        {"stem": "sql", "postings": [
            {"doc_id": 1, "positions": [0]},
            {"doc_id": 2, "positions": [4]},
            {"doc_id": 3, "positions": [5]}
        ]},
        {"stem": "umsi", "postings": [
            {"doc_id": 2, "positions": [6]},
            {"doc_id": 3, "positions": [0]}
        ]}
    ]"#;
    serde_json::from_str(json).unwrap()
}

#[test]
fn seeded_index_answers_lookups() {
    let index = InvertedIndex::from_entries(fixture_entries());

    assert_eq!(index.doc_count(), 3);
    assert_eq!(index.document_frequency("sql"), 3);
    assert_eq!(index.document_frequency("missing"), 0);
    assert!(index.postings("missing").is_none());

    let sql = index.postings("sql").unwrap();
    assert_eq!(sql.get(DocId(2)).unwrap().positions, vec![4]);
}

#[test]
fn seeded_index_supports_evaluation() {
    let index = InvertedIndex::from_entries(fixture_entries());
    let executor = QueryExecutor::new();

    let query = Query::And(vec![
        Query::Term("learn".into()),
        Query::Term("umsi".into()),
    ]);
    assert_eq!(executor.execute(&query, &index), vec![DocId(2)]);

    // learn(3) .. umsi(6) sits outside a 2-wide window but inside 3
    let near = Query::Near {
        stems: vec!["learn".into(), "umsi".into()],
        distance: 2,
    };
    assert!(executor.execute(&near, &index).is_empty());

    let near = Query::Near {
        stems: vec!["learn".into(), "umsi".into()],
        distance: 3,
    };
    assert_eq!(executor.execute(&near, &index), vec![DocId(2)]);
}

#[test]
fn snapshot_matches_seed() {
    let entries = fixture_entries();
    let index = InvertedIndex::from_entries(entries.clone());
    assert_eq!(index.to_entries(), entries);
}
