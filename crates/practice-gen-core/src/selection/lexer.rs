//! Tokenizer for selection requests

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Comma,
    Colon,
    /// A run of non-delimiter characters, trimmed
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range into the source; for `Text` it excludes surrounding whitespace
    pub span: Range<usize>,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }
}

pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text_start: Option<usize> = None;
    let mut text_end = 0;

    for (idx, ch) in source.char_indices() {
        let kind = match ch {
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            c if c.is_whitespace() => continue,
            c => {
                text_start.get_or_insert(idx);
                text_end = idx + c.len_utf8();
                continue;
            }
        };

        if let Some(start) = text_start.take() {
            tokens.push(Token {
                kind: TokenKind::Text,
                span: start..text_end,
            });
        }
        tokens.push(Token {
            kind,
            span: idx..idx + 1,
        });
    }

    if let Some(start) = text_start {
        tokens.push(Token {
            kind: TokenKind::Text,
            span: start..text_end,
        });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn whitespace_around_delimiters_is_dropped() {
        let source = "  intro-to-arrays :  2 , basic-loops:all ";
        let tokens = tokenize(source);
        let texts: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Text)
            .map(|t| t.text(source))
            .collect();
        assert_eq!(texts, vec!["intro-to-arrays", "2", "basic-loops", "all"]);
    }

    #[test]
    fn inner_whitespace_stays_in_text() {
        let source = "two words: 1";
        let tokens = tokenize(source);
        assert_eq!(tokens[0].text(source), "two words");
    }

    #[test]
    fn delimiters_only() {
        use TokenKind::*;
        assert_eq!(kinds(",:,"), vec![Comma, Colon, Comma]);
        assert!(tokenize("   ").is_empty());
    }
}
