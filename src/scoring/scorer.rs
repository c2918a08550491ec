use crate::core::types::DocId;
use crate::index::inverted::InvertedIndex;

/// Scorer trait
///
/// Scores one candidate document against the query's positive stems. Both
/// implementations are monotonic in term frequency and return 0 for a
/// document containing none of the stems.
pub trait Scorer: Send + Sync {
    fn score(&self, index: &InvertedIndex, doc_id: DocId, stems: &[String]) -> f32;

    fn name(&self) -> &str;
}

/// Smoothed inverse document frequency: 1 + ln((N+1)/(df+1)).
///
/// The +1 floor keeps ubiquitous terms from zeroing out, so more occurrences
/// always score strictly higher.
fn idf(index: &InvertedIndex, stem: &str) -> f32 {
    let df = index.document_frequency(stem);
    if df == 0 {
        return 0.0;
    }
    let n = index.doc_count() as f32;
    1.0 + ((n + 1.0) / (df as f32 + 1.0)).ln()
}

fn tf(index: &InvertedIndex, doc_id: DocId, stem: &str) -> f32 {
    index
        .postings(stem)
        .and_then(|list| list.get(doc_id))
        .map_or(0.0, |posting| posting.term_freq() as f32)
}

/// Frequency scorer: sum of tf·idf over the query stems.
pub struct FrequencyScorer;

impl Scorer for FrequencyScorer {
    fn score(&self, index: &InvertedIndex, doc_id: DocId, stems: &[String]) -> f32 {
        stems
            .iter()
            .map(|stem| tf(index, doc_id, stem) * idf(index, stem))
            .sum()
    }

    fn name(&self) -> &str {
        "frequency"
    }
}

/// Cover-density scorer: the frequency score boosted by how tightly the
/// matched stems cluster.
///
/// The boost derives from the minimal positional window covering every query
/// stem present in the document; a document where the stems sit side by side
/// outranks one where they are scattered. With fewer than two matched stems
/// the score equals the plain frequency score.
pub struct CoverDensityScorer;

impl Scorer for CoverDensityScorer {
    fn score(&self, index: &InvertedIndex, doc_id: DocId, stems: &[String]) -> f32 {
        let base = FrequencyScorer.score(index, doc_id, stems);
        if base == 0.0 {
            return 0.0;
        }

        match min_cover_span(index, doc_id, stems) {
            Some((matched, span)) if matched > 1 => {
                let density = (matched as f32 - 1.0) / (span as f32 + 1.0);
                base * (1.0 + density)
            }
            _ => base,
        }
    }

    fn name(&self) -> &str {
        "cover_density"
    }
}

/// Minimal window covering every query stem the document contains, as
/// (matched stem count, span). None if the document matches no stem.
fn min_cover_span(
    index: &InvertedIndex,
    doc_id: DocId,
    stems: &[String],
) -> Option<(usize, u32)> {
    let mut merged: Vec<(u32, usize)> = Vec::new();
    let mut matched = 0;

    for stem in stems {
        let Some(posting) = index.postings(stem).and_then(|list| list.get(doc_id)) else {
            continue;
        };
        merged.extend(posting.positions.iter().map(|&p| (p, matched)));
        matched += 1;
    }

    if matched == 0 {
        return None;
    }
    merged.sort_unstable();

    let mut counts = vec![0usize; matched];
    let mut covered = 0;
    let mut best: Option<u32> = None;
    let mut lo = 0;

    for hi in 0..merged.len() {
        let (hi_pos, hi_stem) = merged[hi];
        counts[hi_stem] += 1;
        if counts[hi_stem] == 1 {
            covered += 1;
        }

        while covered == matched {
            let (lo_pos, lo_stem) = merged[lo];
            let span = hi_pos - lo_pos;
            best = Some(best.map_or(span, |b| b.min(span)));
            counts[lo_stem] -= 1;
            if counts[lo_stem] == 0 {
                covered -= 1;
            }
            lo += 1;
        }
    }

    Some((matched, best.unwrap_or(0)))
}
