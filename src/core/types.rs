use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub u64);

impl DocId {
    pub fn new(id: u64) -> Self {
        DocId(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for DocId {
    fn from(id: u64) -> Self {
        DocId(id)
    }
}

/// Scoring policy selected per search call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringMode {
    /// tf·idf: rewards term repetition
    Frequency,
    /// tf·idf boosted by how tightly query terms cluster in the document
    CoverDensity,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchOptions {
    pub mode: ScoringMode,
    /// Discard unparseable query tokens instead of failing
    pub tolerant: bool,
    /// Maximum number of hits returned
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            mode: ScoringMode::Frequency,
            tolerant: false,
            limit: 10,
        }
    }
}
