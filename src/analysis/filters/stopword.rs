use std::collections::HashSet;
use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

/// Drops tokens present in the configured stop-word set.
///
/// Membership is case-insensitive: the set is lowercased on construction and
/// tokens arrive lowercased from the tokenizer.
pub struct StopWordFilter {
    pub stop_words: HashSet<String>,
}

impl StopWordFilter {
    pub fn new<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopWordFilter {
            stop_words: stop_words
                .into_iter()
                .map(|w| w.into().to_lowercase())
                .collect(),
        }
    }

    pub fn english() -> Self {
        let words = vec![
            "a", "an", "and", "are", "as", "at", "be", "by", "for",
            "from", "has", "he", "in", "is", "it", "its", "of", "on",
            "that", "the", "to", "was", "will", "with",
        ];
        StopWordFilter::new(words)
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

impl TokenFilter for StopWordFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens.into_iter()
            .filter(|token| !self.stop_words.contains(&token.text))
            .collect()
    }

    fn name(&self) -> &str {
        "stop_words"
    }

    fn clone_box(&self) -> Box<dyn TokenFilter> {
        Box::new(StopWordFilter {
            stop_words: self.stop_words.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_configured_words() {
        let filter = StopWordFilter::new(vec!["is", "this", "and"]);
        let tokens = vec![
            Token::new("this".into(), 0, 0),
            Token::new("is".into(), 1, 5),
            Token::new("sql".into(), 2, 8),
        ];
        let filtered = filter.filter(tokens);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].text, "sql");
    }

    #[test]
    fn english_list_covers_common_function_words() {
        let filter = StopWordFilter::english();
        assert!(filter.is_stop_word("the"));
        assert!(filter.is_stop_word("and"));
        assert!(filter.is_stop_word("with"));
        assert!(!filter.is_stop_word("sql"));
    }

    #[test]
    fn set_is_case_insensitive() {
        let filter = StopWordFilter::new(vec!["The", "AND"]);
        assert!(filter.is_stop_word("the"));
        assert!(filter.is_stop_word("and"));
        assert!(!filter.is_stop_word("sql"));
    }
}
