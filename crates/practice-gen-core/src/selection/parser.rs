//! Recursive-descent parser over [`tokenize`] output
//!
//! ```text
//! selection := "all"
//!            | "all" "," "except" ":" name ("," name)*
//!            | entry ("," entry)*
//! entry     := name ":" count
//! ```
//!
//! `count` is the raw text between the entry's first `:` and the next `,`.

use super::lexer::{tokenize, Token, TokenKind};
use super::{CategoryRequest, SelectionSpec};
use crate::error::{PracticeGenError, Result};

const ALL: &str = "all";
const EXCEPT: &str = "except";

pub fn parse(raw: &str) -> Result<SelectionSpec> {
    let source = raw.trim();
    let tokens = tokenize(source);
    Parser {
        source,
        tokens: &tokens,
        pos: 0,
    }
    .selection()
}

struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn selection(mut self) -> Result<SelectionSpec> {
        if self.tokens.is_empty() {
            return Err(PracticeGenError::parse("empty input"));
        }

        if self.peek_text() == Some(ALL) {
            match self.tokens.get(1).map(|t| t.kind) {
                None => return Ok(SelectionSpec::AllCategories),
                Some(TokenKind::Comma) => {
                    self.pos = 2;
                    return self.except_clause();
                }
                // `all: 3` names a category called "all"
                _ => {}
            }
        }

        let mut entries = vec![self.entry()?];
        while self.eat(TokenKind::Comma) {
            entries.push(self.entry()?);
        }
        self.expect_end()?;

        Ok(SelectionSpec::PerCategory(entries))
    }

    fn except_clause(&mut self) -> Result<SelectionSpec> {
        if self.peek_text() != Some(EXCEPT) {
            return Err(PracticeGenError::parse("expected 'except:' after 'all,'"));
        }
        self.pos += 1;
        if !self.eat(TokenKind::Colon) {
            return Err(PracticeGenError::parse("expected ':' after 'except'"));
        }

        let mut excluded: Vec<String> = Vec::new();
        loop {
            let name = self.name("category after 'except:'")?;
            if !excluded.iter().any(|n| n == name) {
                excluded.push(name.to_string());
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect_end()?;

        Ok(SelectionSpec::AllExcept(excluded))
    }

    fn entry(&mut self) -> Result<CategoryRequest> {
        let category = self.name("category name")?.to_string();
        let Some(colon) = self.next_if(TokenKind::Colon) else {
            return Err(PracticeGenError::parse(format!(
                "entry '{}' has no ':' separator",
                category
            )));
        };

        // Everything up to the next comma belongs to the count, colons included
        let start = colon.span.end;
        let mut end = start;
        while let Some(token) = self.tokens.get(self.pos) {
            if token.kind == TokenKind::Comma {
                break;
            }
            end = token.span.end;
            self.pos += 1;
        }

        Ok(CategoryRequest {
            category,
            count: self.source[start..end].trim().to_string(),
        })
    }

    fn name(&mut self, what: &str) -> Result<&'a str> {
        match self.tokens.get(self.pos) {
            Some(token) if token.kind == TokenKind::Text => {
                self.pos += 1;
                Ok(token.text(self.source))
            }
            _ => Err(PracticeGenError::parse(format!("expected {}", what))),
        }
    }

    fn peek_text(&self) -> Option<&'a str> {
        self.tokens
            .get(self.pos)
            .filter(|t| t.kind == TokenKind::Text)
            .map(|t| t.text(self.source))
    }

    fn next_if(&mut self, kind: TokenKind) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos).filter(|t| t.kind == kind)?;
        self.pos += 1;
        Some(token)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        self.next_if(kind).is_some()
    }

    fn expect_end(&self) -> Result<()> {
        if self.pos < self.tokens.len() {
            return Err(PracticeGenError::parse(format!(
                "unexpected trailing input at byte {}",
                self.tokens[self.pos].span.start
            )));
        }
        Ok(())
    }
}
