use crate::analysis::token::Token;
use unicode_segmentation::UnicodeSegmentation;

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn name(&self) -> &str;

    fn clone_box(&self) -> Box<dyn Tokenizer>;
}

impl Clone for Box<dyn Tokenizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Standard Unicode tokenizer
///
/// Splits on non-alphanumeric boundaries and lowercases every token. The same
/// policy is applied to documents and queries, which is what makes index
/// lookups meaningful.
#[derive(Clone)]
pub struct StandardTokenizer {
    pub max_token_length: usize,
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        StandardTokenizer {
            max_token_length: 255,
        }
    }
}

impl StandardTokenizer {
    /// Lazy token stream over `text`. Restartable by calling again; empty
    /// text yields an empty stream.
    pub fn stream<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Token> + 'a {
        text.unicode_word_indices()
            .filter(|(_, word)| word.len() <= self.max_token_length)
            .enumerate()
            .map(|(position, (offset, word))| {
                Token::new(word.to_lowercase(), position as u32, offset)
            })
    }
}

impl Tokenizer for StandardTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        self.stream(text).collect()
    }

    fn name(&self) -> &str {
        "standard"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_non_alphanumeric_and_lowercases() {
        let tokenizer = StandardTokenizer::default();
        let tokens = tokenizer.tokenize("Hello, SQL-world!");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["hello", "sql", "world"]);
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[2].position, 2);
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        let tokenizer = StandardTokenizer::default();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("  \t\n").is_empty());
    }

    #[test]
    fn stream_is_restartable() {
        let tokenizer = StandardTokenizer::default();
        let first: Vec<Token> = tokenizer.stream("learn sql").collect();
        let second: Vec<Token> = tokenizer.stream("learn sql").collect();
        assert_eq!(first, second);
    }

    #[test]
    fn offsets_point_into_source() {
        let tokenizer = StandardTokenizer::default();
        let tokens = tokenizer.tokenize("learn SQL");
        assert_eq!(tokens[0].offset, 0);
        assert_eq!(tokens[1].offset, 6);
    }
}
