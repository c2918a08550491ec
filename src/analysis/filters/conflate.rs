use std::collections::HashMap;
use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

/// Maps word variants to canonical stems via a lookup table.
///
/// Many-to-one: several surface words may share a stem. A word with no
/// mapping is its own stem. Applied identically at index and query time so
/// that a query for "teaches" resolves to the same stem "teach" used when
/// "teaching" was indexed.
pub struct ConflationFilter {
    pub table: HashMap<String, String>,
}

impl ConflationFilter {
    pub fn new<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        ConflationFilter {
            table: pairs
                .into_iter()
                .map(|(word, stem)| (word.into().to_lowercase(), stem.into().to_lowercase()))
                .collect(),
        }
    }

    pub fn stem_of<'a>(&'a self, word: &'a str) -> &'a str {
        self.table.get(word).map(String::as_str).unwrap_or(word)
    }
}

impl TokenFilter for ConflationFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens.into_iter()
            .map(|mut token| {
                if let Some(stem) = self.table.get(&token.text) {
                    token.text = stem.clone();
                }
                token
            })
            .collect()
    }

    fn name(&self) -> &str {
        "conflate"
    }

    fn clone_box(&self) -> Box<dyn TokenFilter> {
        Box::new(ConflationFilter {
            table: self.table.clone(),
        })
    }
}
