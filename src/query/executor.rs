use crate::core::types::DocId;
use crate::index::inverted::InvertedIndex;
use crate::index::posting::PostingList;
use crate::query::ast::Query;

/// Stateless query evaluator: structural recursion over the expression tree,
/// producing sorted candidate document ids from the inverted index.
///
/// Unknown stems contribute empty candidate sets; they are never an error.
#[derive(Debug, Default)]
pub struct QueryExecutor;

impl QueryExecutor {
    pub fn new() -> Self {
        QueryExecutor
    }

    pub fn execute(&self, query: &Query, index: &InvertedIndex) -> Vec<DocId> {
        match query {
            Query::Term(stem) => term_docs(index, stem),

            Query::And(children) => {
                if children.is_empty() {
                    return Vec::new();
                }
                let mut result = self.execute(&children[0], index);
                for child in &children[1..] {
                    if result.is_empty() {
                        break;
                    }
                    result = intersect_sorted(&result, &self.execute(child, index));
                }
                result
            }

            Query::Or(children) => {
                let mut result = Vec::new();
                for child in children {
                    result = union_sorted(&result, &self.execute(child, index));
                }
                result
            }

            Query::Not(child) => {
                let matched = self.execute(child, index);
                difference_sorted(&index.doc_ids(), &matched)
            }

            Query::Phrase(stems) => {
                let candidates = self.all_stems_docs(stems, index);
                candidates
                    .into_iter()
                    .filter(|&doc_id| phrase_matches(index, doc_id, stems))
                    .collect()
            }

            Query::Near { stems, distance } => {
                let candidates = self.all_stems_docs(stems, index);
                candidates
                    .into_iter()
                    .filter(|&doc_id| near_matches(index, doc_id, stems, *distance))
                    .collect()
            }
        }
    }

    /// Documents containing every listed stem (the unordered AND that phrase
    /// and NEAR constraints further narrow).
    fn all_stems_docs(&self, stems: &[String], index: &InvertedIndex) -> Vec<DocId> {
        let Some(first) = stems.first() else {
            return Vec::new();
        };
        let mut result = term_docs(index, first);
        for stem in &stems[1..] {
            if result.is_empty() {
                break;
            }
            result = intersect_sorted(&result, &term_docs(index, stem));
        }
        result
    }
}

fn term_docs(index: &InvertedIndex, stem: &str) -> Vec<DocId> {
    index
        .postings(stem)
        .map(|list| list.doc_ids().collect())
        .unwrap_or_default()
}

/// Linear merge of two sorted id lists.
pub fn intersect_sorted(left: &[DocId], right: &[DocId]) -> Vec<DocId> {
    let mut result = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < left.len() && j < right.len() {
        if left[i] == right[j] {
            result.push(left[i]);
            i += 1;
            j += 1;
        } else if left[i] < right[j] {
            i += 1;
        } else {
            j += 1;
        }
    }

    result
}

pub fn union_sorted(left: &[DocId], right: &[DocId]) -> Vec<DocId> {
    let mut result = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < left.len() && j < right.len() {
        if left[i] == right[j] {
            result.push(left[i]);
            i += 1;
            j += 1;
        } else if left[i] < right[j] {
            result.push(left[i]);
            i += 1;
        } else {
            result.push(right[j]);
            j += 1;
        }
    }
    result.extend_from_slice(&left[i..]);
    result.extend_from_slice(&right[j..]);

    result
}

/// Elements of `universe` absent from `matched`; both sorted.
pub fn difference_sorted(universe: &[DocId], matched: &[DocId]) -> Vec<DocId> {
    let mut result = Vec::new();
    let mut j = 0;

    for &doc_id in universe {
        while j < matched.len() && matched[j] < doc_id {
            j += 1;
        }
        if j >= matched.len() || matched[j] != doc_id {
            result.push(doc_id);
        }
    }

    result
}

/// Exact-order adjacency: every stem at the position one past its
/// predecessor. Positions were assigned on the filtered stream, so "no other
/// indexed stem intervening" means consecutive positions.
fn phrase_matches(index: &InvertedIndex, doc_id: DocId, stems: &[String]) -> bool {
    let Some(position_lists) = doc_positions(index, doc_id, stems) else {
        return false;
    };

    for &start in position_lists[0] {
        let mut matched = true;
        for (step, positions) in position_lists[1..].iter().enumerate() {
            let wanted = start + step as u32 + 1;
            if positions.binary_search(&wanted).is_err() {
                matched = false;
                break;
            }
        }
        if matched {
            return true;
        }
    }

    false
}

/// Order-insensitive proximity: some choice of one position per stem whose
/// span (max − min) is at most `distance`. Checked with a sliding window
/// over the merged, stem-tagged position stream.
fn near_matches(index: &InvertedIndex, doc_id: DocId, stems: &[String], distance: u32) -> bool {
    let Some(position_lists) = doc_positions(index, doc_id, stems) else {
        return false;
    };

    let mut merged: Vec<(u32, usize)> = Vec::new();
    for (stem_idx, positions) in position_lists.iter().enumerate() {
        merged.extend(positions.iter().map(|&p| (p, stem_idx)));
    }
    merged.sort_unstable();

    let mut counts = vec![0usize; position_lists.len()];
    let mut covered = 0;
    let mut lo = 0;

    for hi in 0..merged.len() {
        let (hi_pos, hi_stem) = merged[hi];
        counts[hi_stem] += 1;
        if counts[hi_stem] == 1 {
            covered += 1;
        }

        while covered == position_lists.len() {
            let (lo_pos, lo_stem) = merged[lo];
            if hi_pos - lo_pos <= distance {
                return true;
            }
            counts[lo_stem] -= 1;
            if counts[lo_stem] == 0 {
                covered -= 1;
            }
            lo += 1;
        }
    }

    false
}

/// Position lists for each stem in one document; None if any stem is absent.
fn doc_positions<'a>(
    index: &'a InvertedIndex,
    doc_id: DocId,
    stems: &[String],
) -> Option<Vec<&'a Vec<u32>>> {
    debug_assert!(index.contains(doc_id), "candidate document not in corpus");

    let mut lists = Vec::with_capacity(stems.len());
    for stem in stems {
        let list: &PostingList = index.postings(stem)?;
        lists.push(&list.get(doc_id)?.positions);
    }
    Some(lists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::Analyzer;

    fn ids(raw: &[u64]) -> Vec<DocId> {
        raw.iter().copied().map(DocId).collect()
    }

    fn build_index() -> InvertedIndex {
        let analyzer = Analyzer::standard(
            vec!["is", "this", "and", "from"],
            vec![("teaching", "teach"), ("teaches", "teach")],
        );
        let mut index = InvertedIndex::new();
        index.upsert(DocId(1), &analyzer.analyze("learn SQL today"));
        index.upsert(DocId(2), &analyzer.analyze("learn Python SQL"));
        index.upsert(DocId(3), &analyzer.analyze("SQL learn"));
        index
    }

    #[test]
    fn set_algebra_on_sorted_lists() {
        assert_eq!(intersect_sorted(&ids(&[1, 2]), &ids(&[2, 3])), ids(&[2]));
        assert_eq!(
            union_sorted(&ids(&[1, 2]), &ids(&[2, 3])),
            ids(&[1, 2, 3])
        );
        assert_eq!(
            difference_sorted(&ids(&[1, 2, 3]), &ids(&[2])),
            ids(&[1, 3])
        );
    }

    #[test]
    fn and_or_not_over_the_index() {
        let index = build_index();
        let executor = QueryExecutor::new();

        let and = Query::And(vec![Query::Term("learn".into()), Query::Term("today".into())]);
        assert_eq!(executor.execute(&and, &index), ids(&[1]));

        let or = Query::Or(vec![Query::Term("today".into()), Query::Term("python".into())]);
        assert_eq!(executor.execute(&or, &index), ids(&[1, 2]));

        let not = Query::And(vec![
            Query::Term("learn".into()),
            Query::Not(Box::new(Query::Term("python".into()))),
        ]);
        assert_eq!(executor.execute(&not, &index), ids(&[1, 3]));
    }

    #[test]
    fn unknown_stem_yields_empty_candidates() {
        let index = build_index();
        let executor = QueryExecutor::new();

        assert!(executor.execute(&Query::Term("rust".into()), &index).is_empty());

        let and = Query::And(vec![Query::Term("learn".into()), Query::Term("rust".into())]);
        assert!(executor.execute(&and, &index).is_empty());

        let or = Query::Or(vec![Query::Term("today".into()), Query::Term("rust".into())]);
        assert_eq!(executor.execute(&or, &index), ids(&[1]));
    }

    #[test]
    fn empty_clauses_match_nothing() {
        let index = build_index();
        let executor = QueryExecutor::new();
        assert!(executor.execute(&Query::And(vec![]), &index).is_empty());
        assert!(executor.execute(&Query::Or(vec![]), &index).is_empty());
    }

    #[test]
    fn phrase_requires_order_and_adjacency() {
        let index = build_index();
        let executor = QueryExecutor::new();

        let learn_sql = Query::Phrase(vec!["learn".into(), "sql".into()]);
        // doc 1: adjacent in order; doc 2: python intervenes; doc 3: reversed
        assert_eq!(executor.execute(&learn_sql, &index), ids(&[1]));

        let sql_learn = Query::Phrase(vec!["sql".into(), "learn".into()]);
        assert_eq!(executor.execute(&sql_learn, &index), ids(&[3]));
    }

    #[test]
    fn near_is_order_insensitive_within_window() {
        let index = build_index();
        let executor = QueryExecutor::new();

        let near2 = Query::Near {
            stems: vec!["learn".into(), "sql".into()],
            distance: 2,
        };
        assert_eq!(executor.execute(&near2, &index), ids(&[1, 2, 3]));

        let near1 = Query::Near {
            stems: vec!["learn".into(), "sql".into()],
            distance: 1,
        };
        // doc 2 holds learn(0) python(1) sql(2): span 2 exceeds the window
        assert_eq!(executor.execute(&near1, &index), ids(&[1, 3]));
    }

    #[test]
    fn phrase_adjacency_ignores_removed_stop_words() {
        let analyzer = Analyzer::standard(vec!["from"], Vec::<(&str, &str)>::new());
        let mut index = InvertedIndex::new();
        index.upsert(DocId(9), &analyzer.analyze("learn from UMSI"));

        let executor = QueryExecutor::new();
        let phrase = Query::Phrase(vec!["learn".into(), "umsi".into()]);
        assert_eq!(executor.execute(&phrase, &index), ids(&[9]));
    }
}
