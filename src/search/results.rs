use std::cmp::Ordering;
use std::collections::BinaryHeap;
use serde::Serialize;

use crate::core::types::DocId;

/// Search results container
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub hits: Vec<ScoredDocument>,
    pub total_hits: usize,
    pub max_score: f32,
    pub took_ms: u64,
}

/// Document with relevance score
#[derive(Debug, Clone, Serialize)]
pub struct ScoredDocument {
    pub doc_id: DocId,
    pub score: f32,
}

// Heap ordering: "greatest" is the worst hit (lowest score, then highest doc
// id), so the heap root is the first candidate to evict. Equal scores break
// ties by ascending doc id for deterministic output.
impl PartialEq for ScoredDocument {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.doc_id == other.doc_id
    }
}

impl Eq for ScoredDocument {}

impl PartialOrd for ScoredDocument {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredDocument {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.doc_id.cmp(&other.doc_id))
    }
}

/// Top-K collector for efficient result collection
pub struct TopKCollector {
    pub heap: BinaryHeap<ScoredDocument>,
    pub k: usize,
    pub total_collected: usize,
}

impl TopKCollector {
    pub fn new(k: usize) -> Self {
        TopKCollector {
            heap: BinaryHeap::with_capacity(k + 1),
            k,
            total_collected: 0,
        }
    }

    pub fn collect(&mut self, scored_doc: ScoredDocument) {
        self.total_collected += 1;
        if self.k == 0 {
            return;
        }

        self.heap.push(scored_doc);
        if self.heap.len() > self.k {
            self.heap.pop();
        }
    }

    pub fn max_score(&self) -> f32 {
        self.heap
            .iter()
            .map(|doc| doc.score)
            .fold(0.0, f32::max)
    }

    /// Drain into descending-score order, ties by ascending doc id.
    pub fn into_results(self) -> Vec<ScoredDocument> {
        // Ascending in heap order is best-first: the ordering is inverted so
        // that the heap root is the eviction candidate.
        self.heap.into_sorted_vec()
    }
}
