use serde::{Serialize, Deserialize};

/// Engine configuration: analysis tables plus cache sizing.
///
/// Stop words and conflation pairs are loaded once and treated as immutable
/// for the engine's operating lifetime; `Engine::reload` swaps them between
/// indexing batches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Case-insensitive stop-word set
    pub stop_words: Vec<String>,
    /// Surface word → canonical stem pairs; unmapped words are their own stem
    pub conflations: Vec<(String, String)>,
    /// Capacity of the query result cache (entries)
    pub cache_capacity: usize,
    /// Result limit used when a search does not specify one
    pub default_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            stop_words: Vec::new(),
            conflations: Vec::new(),
            cache_capacity: 256,
            default_limit: 10,
        }
    }
}

impl EngineConfig {
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_conflations<I, S>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        self.conflations = pairs
            .into_iter()
            .map(|(word, stem)| (word.into(), stem.into()))
            .collect();
        self
    }
}
