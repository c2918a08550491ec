use crate::analysis::analyzer::Analyzer;
use crate::core::error::{Error, Result};
use crate::query::ast::Query;

/// Query parser: lexer + recursive descent over the operator grammar.
///
/// Surface syntax: `&` AND, `|` OR, `!` NOT, parentheses for grouping,
/// `"..."` for phrases, `near(a, b, ..., k)` for proximity. Bare
/// juxtaposition of terms is AND; `|` binds loosest, `!` tightest.
///
/// Every surface word is normalized through the same analysis pipeline used
/// for documents. A word that analyzes to nothing (a stop word) vanishes
/// from its clause; a query that vanishes entirely matches nothing.
pub struct QueryParser<'a> {
    analyzer: &'a Analyzer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexKind {
    Word,
    Phrase,
    Amp,
    Pipe,
    Bang,
    LParen,
    RParen,
    Comma,
}

#[derive(Debug, Clone)]
struct LexToken {
    kind: LexKind,
    text: String,
    start: usize,
    end: usize,
}

impl<'a> QueryParser<'a> {
    pub fn new(analyzer: &'a Analyzer) -> Self {
        QueryParser { analyzer }
    }

    /// Parse a query string into its expression tree.
    ///
    /// In tolerant mode a malformed expression degrades to an implicit AND
    /// over every stem surviving analysis of the raw input, instead of
    /// failing.
    pub fn parse(&self, input: &str, tolerant: bool) -> Result<Query> {
        match self.parse_strict(input) {
            Ok(query) => Ok(query),
            Err(_) if tolerant => Ok(self.fallback(input)),
            Err(err) => Err(err),
        }
    }

    fn parse_strict(&self, input: &str) -> Result<Query> {
        let tokens = lex(input)?;
        let mut cursor = Cursor { tokens, pos: 0, input_len: input.len() };
        let query = self.parse_or(&mut cursor)?;

        if let Some(token) = cursor.peek() {
            return Err(Error::query_syntax(
                token.start..token.end,
                "unexpected token",
            ));
        }

        // A fully elided query (stop words only, or empty input) matches
        // nothing rather than everything.
        Ok(query.unwrap_or(Query::Or(Vec::new())))
    }

    /// Best-effort parse: all surviving stems, implicit AND.
    fn fallback(&self, input: &str) -> Query {
        let stems: Vec<Query> = self
            .analyzer
            .analyze(input)
            .into_iter()
            .map(|token| Query::Term(token.text))
            .collect();
        match stems.len() {
            0 => Query::Or(Vec::new()),
            1 => stems.into_iter().next().unwrap(),
            _ => Query::And(stems),
        }
    }

    fn parse_or(&self, cursor: &mut Cursor) -> Result<Option<Query>> {
        let mut nodes = Vec::new();
        if let Some(node) = self.parse_and(cursor)? {
            nodes.push(node);
        }

        while cursor.peek_kind() == Some(LexKind::Pipe) {
            cursor.bump();
            if let Some(node) = self.parse_and(cursor)? {
                nodes.push(node);
            }
        }

        Ok(match nodes.len() {
            0 => None,
            1 => Some(nodes.into_iter().next().unwrap()),
            _ => Some(Query::Or(nodes)),
        })
    }

    fn parse_and(&self, cursor: &mut Cursor) -> Result<Option<Query>> {
        let mut nodes = Vec::new();
        let mut seen_operand = false;

        loop {
            match cursor.peek_kind() {
                Some(LexKind::Amp) => {
                    if !seen_operand {
                        let span = cursor.peek_span();
                        return Err(Error::query_syntax(
                            span,
                            "operator without left-hand term",
                        ));
                    }
                    cursor.bump();
                    if let Some(node) = self.parse_unary(cursor)? {
                        nodes.push(node);
                    }
                }
                Some(LexKind::Pipe) | Some(LexKind::RParen) | Some(LexKind::Comma) | None => {
                    break;
                }
                _ => {
                    if let Some(node) = self.parse_unary(cursor)? {
                        nodes.push(node);
                    }
                }
            }
            seen_operand = true;
        }

        Ok(match nodes.len() {
            0 => None,
            1 => Some(nodes.into_iter().next().unwrap()),
            _ => Some(Query::And(nodes)),
        })
    }

    fn parse_unary(&self, cursor: &mut Cursor) -> Result<Option<Query>> {
        if cursor.peek_kind() == Some(LexKind::Bang) {
            cursor.bump();
            let child = self.parse_unary(cursor)?;
            // A negated stop word vanishes along with its operator
            return Ok(child.map(|q| Query::Not(Box::new(q))));
        }
        self.parse_primary(cursor)
    }

    fn parse_primary(&self, cursor: &mut Cursor) -> Result<Option<Query>> {
        let Some(token) = cursor.peek().cloned() else {
            let end = cursor.input_len;
            return Err(Error::query_syntax(end..end, "expected term"));
        };

        match token.kind {
            LexKind::LParen => {
                cursor.bump();
                let inner = self.parse_or(cursor)?;
                if cursor.peek_kind() != Some(LexKind::RParen) {
                    return Err(Error::query_syntax(
                        token.start..token.end,
                        "unbalanced group",
                    ));
                }
                cursor.bump();
                Ok(inner)
            }
            LexKind::Phrase => {
                cursor.bump();
                let stems: Vec<String> = self
                    .analyzer
                    .analyze(&token.text)
                    .into_iter()
                    .map(|t| t.text)
                    .collect();
                Ok(match stems.len() {
                    0 => None,
                    1 => Some(Query::Term(stems.into_iter().next().unwrap())),
                    _ => Some(Query::Phrase(stems)),
                })
            }
            LexKind::Word if token.text.eq_ignore_ascii_case("near")
                && cursor.peek_kind_at(1) == Some(LexKind::LParen) =>
            {
                self.parse_near(cursor, &token)
            }
            LexKind::Word => {
                cursor.bump();
                Ok(self.analyzer.normalize_term(&token.text).map(Query::Term))
            }
            _ => Err(Error::query_syntax(token.start..token.end, "expected term")),
        }
    }

    /// `near(w1, w2, ..., k)`: all words within k positions of each other.
    fn parse_near(&self, cursor: &mut Cursor, keyword: &LexToken) -> Result<Option<Query>> {
        cursor.bump(); // near
        cursor.bump(); // (

        let mut args: Vec<LexToken> = Vec::new();
        loop {
            match cursor.peek().cloned() {
                Some(token) if token.kind == LexKind::Word => {
                    cursor.bump();
                    args.push(token);
                    match cursor.peek_kind() {
                        Some(LexKind::Comma) => {
                            cursor.bump();
                        }
                        Some(LexKind::RParen) => {
                            cursor.bump();
                            break;
                        }
                        _ => {
                            return Err(Error::query_syntax(
                                keyword.start..keyword.end,
                                "malformed near() argument list",
                            ));
                        }
                    }
                }
                _ => {
                    return Err(Error::query_syntax(
                        keyword.start..keyword.end,
                        "malformed near() argument list",
                    ));
                }
            }
        }

        let Some(distance_arg) = args.pop() else {
            return Err(Error::query_syntax(
                keyword.start..keyword.end,
                "near() requires terms and a distance",
            ));
        };
        let distance: u32 = distance_arg.text.parse().map_err(|_| {
            Error::query_syntax(
                distance_arg.start..distance_arg.end,
                "near() distance must be an integer",
            )
        })?;
        if args.is_empty() {
            return Err(Error::query_syntax(
                keyword.start..keyword.end,
                "near() requires at least one term",
            ));
        }

        let stems: Vec<String> = args
            .iter()
            .filter_map(|arg| self.analyzer.normalize_term(&arg.text))
            .collect();

        Ok(match stems.len() {
            0 => None,
            1 => Some(Query::Term(stems.into_iter().next().unwrap())),
            _ => Some(Query::Near { stems, distance }),
        })
    }
}

struct Cursor {
    tokens: Vec<LexToken>,
    pos: usize,
    input_len: usize,
}

impl Cursor {
    fn peek(&self) -> Option<&LexToken> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<LexKind> {
        self.peek().map(|t| t.kind)
    }

    fn peek_kind_at(&self, offset: usize) -> Option<LexKind> {
        self.tokens.get(self.pos + offset).map(|t| t.kind)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn peek_span(&self) -> std::ops::Range<usize> {
        self.peek()
            .map(|t| t.start..t.end)
            .unwrap_or(self.input_len..self.input_len)
    }
}

fn lex(input: &str) -> Result<Vec<LexToken>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '&' | '|' | '!' | '(' | ')' | ',' => {
                chars.next();
                let kind = match c {
                    '&' => LexKind::Amp,
                    '|' => LexKind::Pipe,
                    '!' => LexKind::Bang,
                    '(' => LexKind::LParen,
                    ')' => LexKind::RParen,
                    _ => LexKind::Comma,
                };
                tokens.push(LexToken {
                    kind,
                    text: c.to_string(),
                    start,
                    end: start + c.len_utf8(),
                });
            }
            '"' => {
                chars.next();
                let content_start = start + 1;
                let mut content_end = None;
                for (i, ch) in chars.by_ref() {
                    if ch == '"' {
                        content_end = Some(i);
                        break;
                    }
                }
                let Some(content_end) = content_end else {
                    return Err(Error::query_syntax(
                        start..input.len(),
                        "unterminated phrase",
                    ));
                };
                tokens.push(LexToken {
                    kind: LexKind::Phrase,
                    text: input[content_start..content_end].to_string(),
                    start,
                    end: content_end + 1,
                });
            }
            c if c.is_alphanumeric() => {
                let mut end = start;
                while let Some(&(i, ch)) = chars.peek() {
                    if ch.is_alphanumeric() {
                        end = i + ch.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(LexToken {
                    kind: LexKind::Word,
                    text: input[start..end].to_string(),
                    start,
                    end,
                });
            }
            _ => {
                return Err(Error::query_syntax(
                    start..start + c.len_utf8(),
                    "unexpected character",
                ));
            }
        }
    }

    Ok(tokens)
}
