//! Forward-only token cursor
//!
//! Lookahead is a single token ([`TokenCursor::peek`]); there is no way to
//! rewind. Running out of tokens where a construct still needs one is
//! reported as [`NormalizeError::UnexpectedEndOfInput`].

use crate::errors::NormalizeError;
use crate::parser::lexer::{Punct, Token, TokenKind};

#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    /// Consume the current token.
    pub fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Consume the current token, which `construct` cannot do without.
    pub fn next_token(&mut self, construct: &'static str) -> Result<Token, NormalizeError> {
        self.advance()
            .ok_or(NormalizeError::UnexpectedEndOfInput { construct })
    }

    pub fn check_punct(&self, punct: Punct) -> bool {
        self.peek().is_some_and(|t| t.is_punct(punct))
    }

    /// Consume the current token if it is `punct`.
    pub fn match_punct(&mut self, punct: Punct) -> bool {
        if self.check_punct(punct) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    pub fn expect_punct(
        &mut self,
        punct: Punct,
        expected: &'static str,
        construct: &'static str,
    ) -> Result<(), NormalizeError> {
        let token = self.next_token(construct)?;
        if token.is_punct(punct) {
            Ok(())
        } else {
            Err(NormalizeError::UnexpectedToken {
                expected,
                found: token.to_string(),
                line: token.line,
            })
        }
    }

    /// Line of the next token, or of the last one once exhausted.
    pub fn line(&self) -> usize {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(0)
    }

    /// Consume tokens after an already consumed `open` until the matching
    /// `close` has been consumed.
    pub fn skip_balanced(
        &mut self,
        open: Punct,
        close: Punct,
        construct: &'static str,
    ) -> Result<(), NormalizeError> {
        let mut depth = 1usize;

        while depth > 0 {
            let token = self.next_token(construct)?;
            if token.is_punct(open) {
                depth += 1;
            } else if token.is_punct(close) {
                depth -= 1;
            }
        }

        Ok(())
    }
}
