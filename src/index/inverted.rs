use std::collections::HashMap;
use serde::{Serialize, Deserialize};

use crate::analysis::token::Token;
use crate::core::types::DocId;
use crate::index::posting::{Posting, PostingList};

/// Per-document registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocEntry {
    /// Number of surviving tokens after filtering and conflation
    pub token_count: usize,
}

/// Interchange form of one stem's postings: `{stem, [{doc_id, [positions...]}...]}`.
///
/// Canonical fixture format for seeding and verifying index state directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingEntry {
    pub stem: String,
    pub postings: Vec<Posting>,
}

/// Positional inverted index: stem → posting list.
///
/// Invariant: a stem is present iff at least one live document contains it
/// after filtering and conflation; empty posting lists are pruned.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    pub postings: HashMap<String, PostingList>,
    pub docs: HashMap<DocId, DocEntry>,
    pub total_tokens: usize,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex {
            postings: HashMap::new(),
            docs: HashMap::new(),
            total_tokens: 0,
        }
    }

    /// Insert or re-index a document from its analyzed token vector.
    ///
    /// Re-index is delete-then-insert: any prior postings for `doc_id` are
    /// removed first, so indexing the same text twice is idempotent.
    pub fn upsert(&mut self, doc_id: DocId, tokens: &[Token]) {
        self.remove(doc_id);

        let mut stem_positions: HashMap<&str, Vec<u32>> = HashMap::new();
        for token in tokens {
            stem_positions
                .entry(token.text.as_str())
                .or_default()
                .push(token.position);
        }

        for (stem, mut positions) in stem_positions {
            positions.sort_unstable();
            self.postings
                .entry(stem.to_string())
                .or_default()
                .add_posting(Posting::new(doc_id, positions));
        }

        self.docs.insert(
            doc_id,
            DocEntry {
                token_count: tokens.len(),
            },
        );
        self.total_tokens += tokens.len();
    }

    /// Remove a document from every posting list it appears in, pruning
    /// now-empty lists. Returns false (a no-op) for an unknown id.
    pub fn remove(&mut self, doc_id: DocId) -> bool {
        let Some(entry) = self.docs.remove(&doc_id) else {
            return false;
        };

        for list in self.postings.values_mut() {
            list.remove_doc(doc_id);
        }
        self.postings.retain(|_, list| !list.is_empty());

        self.total_tokens -= entry.token_count;
        true
    }

    /// Read-only lookup; absence of the stem is not an error.
    pub fn postings(&self, stem: &str) -> Option<&PostingList> {
        self.postings.get(stem)
    }

    /// Number of live documents containing the stem (0 if absent).
    pub fn document_frequency(&self, stem: &str) -> usize {
        self.postings.get(stem).map_or(0, |list| list.doc_freq())
    }

    pub fn contains(&self, doc_id: DocId) -> bool {
        self.docs.contains_key(&doc_id)
    }

    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Sorted live document ids; the universe for NOT complements.
    pub fn doc_ids(&self) -> Vec<DocId> {
        let mut ids: Vec<DocId> = self.docs.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    /// Serialize the index to interchange entries, sorted by stem for
    /// deterministic fixtures.
    pub fn to_entries(&self) -> Vec<PostingEntry> {
        let mut entries: Vec<PostingEntry> = self
            .postings
            .iter()
            .map(|(stem, list)| PostingEntry {
                stem: stem.clone(),
                postings: list.postings.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.stem.cmp(&b.stem));
        entries
    }

    /// Rebuild an index from interchange entries, reconstructing the document
    /// registry from the postings themselves.
    pub fn from_entries(entries: Vec<PostingEntry>) -> Self {
        let mut index = InvertedIndex::new();

        for entry in entries {
            let mut list = PostingList::new();
            for posting in entry.postings {
                let doc = index
                    .docs
                    .entry(posting.doc_id)
                    .or_insert(DocEntry { token_count: 0 });
                doc.token_count += posting.positions.len();
                index.total_tokens += posting.positions.len();
                list.add_posting(posting);
            }
            if !list.is_empty() {
                index.postings.insert(entry.stem, list);
            }
        }

        index
    }

    pub fn clear(&mut self) {
        self.postings.clear();
        self.docs.clear();
        self.total_tokens = 0;
    }

    /// Index-corruption check: every posting must reference a registered
    /// document. Programming errors here fail loudly.
    pub fn assert_consistent(&self) {
        for (stem, list) in &self.postings {
            assert!(!list.is_empty(), "empty posting list for stem {:?}", stem);
            for posting in &list.postings {
                assert!(
                    self.docs.contains_key(&posting.doc_id),
                    "posting for stem {:?} references unregistered document {:?}",
                    stem,
                    posting.doc_id
                );
            }
        }
    }
}
