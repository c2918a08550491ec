use serde::{Serialize, Deserialize};

/// Query expression tree, parsed once and evaluated by structural recursion.
///
/// Every stem in the tree has already passed through the analysis pipeline,
/// so it is directly comparable with index terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Query {
    /// Single normalized stem
    Term(String),
    /// All children must match; an empty conjunction matches nothing
    And(Vec<Query>),
    /// Any child must match; an empty disjunction matches nothing
    Or(Vec<Query>),
    /// Complement within the live document set
    Not(Box<Query>),
    /// Stems in exact order with no other indexed stem intervening
    Phrase(Vec<String>),
    /// All stems within `distance` positions of each other, order-insensitive
    Near { stems: Vec<String>, distance: u32 },
}

impl Query {
    /// Distinct stems contributing positively to relevance; NOT subtrees are
    /// excluded since their terms are required to be absent.
    pub fn positive_stems(&self) -> Vec<String> {
        let mut stems = Vec::new();
        self.collect_positive(&mut stems);
        stems.sort_unstable();
        stems.dedup();
        stems
    }

    fn collect_positive(&self, out: &mut Vec<String>) {
        match self {
            Query::Term(stem) => out.push(stem.clone()),
            Query::And(children) | Query::Or(children) => {
                for child in children {
                    child.collect_positive(out);
                }
            }
            Query::Not(_) => {}
            Query::Phrase(stems) | Query::Near { stems, .. } => {
                out.extend(stems.iter().cloned());
            }
        }
    }

    /// True if any node carries positional constraints.
    pub fn has_positional(&self) -> bool {
        match self {
            Query::Term(_) => false,
            Query::And(children) | Query::Or(children) => {
                children.iter().any(Query::has_positional)
            }
            Query::Not(child) => child.has_positional(),
            Query::Phrase(_) | Query::Near { .. } => true,
        }
    }
}
