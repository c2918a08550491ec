use serde::Serialize;

use crate::query::cache::CacheStats;

/// Engine statistics for monitoring
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub uptime_secs: u64,

    // Index metrics
    pub total_documents: usize,
    pub distinct_terms: usize,
    pub total_tokens: usize,

    // Operation counters
    pub query_count: u64,
    pub write_count: u64,

    pub cache: CacheStats,
}

impl EngineStats {
    pub fn avg_document_length(&self) -> f32 {
        if self.total_documents == 0 {
            0.0
        } else {
            self.total_tokens as f32 / self.total_documents as f32
        }
    }
}
