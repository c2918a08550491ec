use crate::analysis::filter::TokenFilter;
use crate::analysis::filters::conflate::ConflationFilter;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::{StandardTokenizer, Tokenizer};

/// Text analysis pipeline: the document vectorizer.
///
/// Composes tokenizer and filters, then renumbers positions on the surviving
/// stream so that adjacency in phrase and proximity queries is computed over
/// surviving stems only. The same pipeline normalizes both documents and
/// query terms.
#[derive(Clone)]
pub struct Analyzer {
    pub tokenizer: Box<dyn Tokenizer>,
    pub filters: Vec<Box<dyn TokenFilter>>,
    pub name: String,
}

impl Analyzer {
    pub fn new(name: String, tokenizer: Box<dyn Tokenizer>) -> Self {
        Analyzer {
            tokenizer,
            filters: Vec::new(),
            name,
        }
    }

    pub fn add_filter(mut self, filter: Box<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Standard pipeline: tokenize → stop-word filter → conflation.
    pub fn standard<I, S, P>(stop_words: I, conflations: P) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        P: IntoIterator<Item = (S, S)>,
    {
        Analyzer::new("standard".to_string(), Box::new(StandardTokenizer::default()))
            .add_filter(Box::new(StopWordFilter::new(stop_words)))
            .add_filter(Box::new(ConflationFilter::new(conflations)))
    }

    pub fn analyze(&self, text: &str) -> Vec<Token> {
        let mut tokens = self.tokenizer.tokenize(text);

        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }

        // Positions are assigned on the filtered, conflated stream: a removed
        // stop word does not leave a gap.
        for (position, token) in tokens.iter_mut().enumerate() {
            token.position = position as u32;
        }

        tokens
    }

    /// Normalize a single query word. `None` means the word was filtered out
    /// (a stop word) and is invisible to the index.
    pub fn normalize_term(&self, word: &str) -> Option<String> {
        self.analyze(word).into_iter().next().map(|t| t.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn umsi_analyzer() -> Analyzer {
        Analyzer::standard(
            vec!["is", "this", "and"],
            vec![("teaching", "teach"), ("teaches", "teach")],
        )
    }

    #[test]
    fn positions_are_renumbered_after_filtering() {
        let analyzer = umsi_analyzer();
        let tokens = analyzer.analyze("This is SQL and Python");
        let pairs: Vec<(&str, u32)> = tokens
            .iter()
            .map(|t| (t.text.as_str(), t.position))
            .collect();
        assert_eq!(pairs, vec![("sql", 0), ("python", 1)]);
    }

    #[test]
    fn conflation_applies_after_stop_words() {
        let analyzer = umsi_analyzer();
        let tokens = analyzer.analyze("UMSI teaches and teaching");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["umsi", "teach", "teach"]);
    }

    #[test]
    fn normalize_term_drops_stop_words() {
        let analyzer = umsi_analyzer();
        assert_eq!(analyzer.normalize_term("Teaches"), Some("teach".to_string()));
        assert_eq!(analyzer.normalize_term("sql"), Some("sql".to_string()));
        assert_eq!(analyzer.normalize_term("this"), None);
    }

    #[test]
    fn clones_analyze_identically() {
        let analyzer = umsi_analyzer();
        let clone = analyzer.clone();
        assert_eq!(
            analyzer.analyze("UMSI teaches SQL"),
            clone.analyze("UMSI teaches SQL")
        );
    }

    #[test]
    fn all_stop_words_yield_empty_vector() {
        let analyzer = umsi_analyzer();
        assert!(analyzer.analyze("this is and is this").is_empty());
    }
}
