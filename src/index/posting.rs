use serde::{Serialize, Deserialize};
use crate::core::types::DocId;

/// One document's occurrences of a stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    /// Token positions, strictly increasing; used by phrase and NEAR queries
    pub positions: Vec<u32>,
}

impl Posting {
    pub fn new(doc_id: DocId, positions: Vec<u32>) -> Self {
        debug_assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "posting positions must be strictly increasing"
        );
        Posting { doc_id, positions }
    }

    pub fn term_freq(&self) -> u32 {
        self.positions.len() as u32
    }
}

/// Posting list for a stem
/// Note: sorted by doc_id for efficient merging
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingList {
    pub postings: Vec<Posting>, // Sorted by doc_id
}

impl PostingList {
    pub fn new() -> Self {
        PostingList {
            postings: Vec::new(),
        }
    }

    /// Insert or replace the posting for its document. Replace-on-existing
    /// gives re-indexing its delete-then-insert semantics per stem.
    pub fn add_posting(&mut self, posting: Posting) {
        match self.postings.binary_search_by_key(&posting.doc_id.0, |p| p.doc_id.0) {
            Ok(pos) => {
                self.postings[pos] = posting;
            }
            Err(pos) => {
                self.postings.insert(pos, posting);
            }
        }
    }

    /// Remove a document's posting; true if one was present.
    pub fn remove_doc(&mut self, doc_id: DocId) -> bool {
        match self.postings.binary_search_by_key(&doc_id.0, |p| p.doc_id.0) {
            Ok(pos) => {
                self.postings.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    pub fn get(&self, doc_id: DocId) -> Option<&Posting> {
        self.postings
            .binary_search_by_key(&doc_id.0, |p| p.doc_id.0)
            .ok()
            .map(|pos| &self.postings[pos])
    }

    pub fn doc_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.postings.iter().map(|p| p.doc_id)
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn doc_freq(&self) -> usize {
        self.postings.len()
    }

    pub fn total_freq(&self) -> u64 {
        self.postings.iter().map(|p| p.term_freq() as u64).sum()
    }
}
