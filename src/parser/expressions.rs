//! Statement emitter and function call processing
//!
//! Turns an expression token run into canonical symbols. Identifiers and
//! literals collapse to [`VALUE`], known functions followed by `(` become a
//! call with one [`PARAM`] per argument, operators are copied as they are and
//! index expressions (`[...]`) are dropped.
//!
//! # Modes
//!
//! - statement mode stops at `;`, `,` or `:` (left unconsumed) and appends a
//!   terminator when a `;` follows an operand
//! - header mode is used right after the `(` of an `if`/`while`/`switch`/`for`
//!   header: it counts parentheses from one and stops after the `)` that
//!   brings the count to zero, or at a `;` (the `for` clause separator)
//!
//! A `:` that answers a pending `?` is part of the expression in both modes.
//!
//! All methods are implemented as `pub(crate)` methods on the [`Normalizer`] struct.

use crate::errors::NormalizeError;
use crate::parser::lexer::{Punct, TokenKind};
use crate::parser::parse::Normalizer;
use crate::parser::pattern::{
    Pattern, ARG_SEPARATOR, CALL_CLOSE, CALL_OPEN, LABEL, PARAM, TERMINATOR, VALUE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Statement,
    Header,
}

/// How a header run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeaderEnd {
    /// The enclosing `)` was consumed and emitted
    Closed,
    /// Stopped in front of a `;` with the parenthesis still open
    Terminated,
}

/// Operators copied verbatim into the pattern
fn is_expression_operator(op: &str) -> bool {
    op.starts_with(['=', '+', '-', '*', '/', '%', '>', '<'])
        || matches!(op, "&" | "|" | "!" | "." | "->" | "^" | "~" | "?")
}

impl<'t> Normalizer<'t> {
    /// Emit a free-standing statement or initializer. The terminating token
    /// is left for the caller.
    pub(crate) fn emit_statement(&mut self) -> Result<Pattern, NormalizeError> {
        let (pattern, _) = self.emit(Mode::Statement, "statement")?;
        Ok(pattern)
    }

    /// Emit a parenthesised header whose `(` has just been consumed.
    pub(crate) fn emit_header(
        &mut self,
        construct: &'static str,
    ) -> Result<(Pattern, HeaderEnd), NormalizeError> {
        self.emit(Mode::Header, construct)
    }

    /// Emit a header that must close its own parenthesis.
    pub(crate) fn emit_closed_header(
        &mut self,
        construct: &'static str,
    ) -> Result<Pattern, NormalizeError> {
        let line = self.cursor.line();
        match self.emit_header(construct)? {
            (pattern, HeaderEnd::Closed) => Ok(pattern),
            (_, HeaderEnd::Terminated) => Err(NormalizeError::UnbalancedHeader { construct, line }),
        }
    }

    fn emit(
        &mut self,
        mode: Mode,
        construct: &'static str,
    ) -> Result<(Pattern, HeaderEnd), NormalizeError> {
        let mut pattern = Pattern::new();
        let mut depth = 1usize;
        let mut pending_ternaries = 0usize;

        loop {
            let kind = self
                .cursor
                .peek_kind()
                .cloned()
                .ok_or(NormalizeError::UnexpectedEndOfInput { construct })?;

            match kind {
                TokenKind::Punct(Punct::Semicolon) => {
                    if mode == Mode::Statement && pattern.ends_with_operand() {
                        pattern.push(TERMINATOR);
                    }
                    return Ok((pattern, HeaderEnd::Terminated));
                }
                TokenKind::Punct(Punct::Colon) if pending_ternaries > 0 => {
                    pending_ternaries -= 1;
                    pattern.push(":");
                    self.cursor.advance();
                }
                TokenKind::Punct(Punct::Comma | Punct::Colon) if mode == Mode::Statement => {
                    return Ok((pattern, HeaderEnd::Terminated));
                }
                TokenKind::Punct(Punct::LParen) => {
                    if mode == Mode::Header {
                        depth += 1;
                    }
                    pattern.push("(");
                    self.cursor.advance();
                }
                TokenKind::Punct(Punct::RParen) => {
                    pattern.push(")");
                    self.cursor.advance();
                    if mode == Mode::Header {
                        depth -= 1;
                        if depth == 0 {
                            return Ok((pattern, HeaderEnd::Closed));
                        }
                    }
                }
                TokenKind::Punct(Punct::LBracket) => {
                    self.cursor.advance();
                    self.cursor
                        .skip_balanced(Punct::LBracket, Punct::RBracket, "index expression")?;
                }
                TokenKind::Operator(op) if is_expression_operator(&op) => {
                    if op == "?" {
                        pending_ternaries += 1;
                    }
                    pattern.push(&op);
                    self.cursor.advance();
                }
                TokenKind::Punct(punct @ (Punct::Comma | Punct::Colon)) => {
                    // header mode: part of the expression
                    pattern.push(punct.as_str());
                    self.cursor.advance();
                }
                other => {
                    self.cursor.advance();
                    let is_call = matches!(&other, TokenKind::Word(w) if self.tables.is_function(w))
                        && self.cursor.check_punct(Punct::LParen);

                    if is_call {
                        let call = self.parse_call()?;
                        pattern.append(&call);
                    } else if mode == Mode::Statement
                        && pending_ternaries == 0
                        && self.cursor.check_punct(Punct::Colon)
                    {
                        pattern.push(LABEL);
                    } else {
                        pattern.push(VALUE);
                    }
                }
            }
        }
    }

    /// Emit a call whose name has been consumed; the cursor is on its `(`.
    /// Arguments keep only their count.
    pub(crate) fn parse_call(&mut self) -> Result<Pattern, NormalizeError> {
        self.cursor
            .expect_punct(Punct::LParen, "'(' after function name", "function call")?;

        let mut call = Pattern::from(CALL_OPEN);
        if self.cursor.match_punct(Punct::RParen) {
            call.push(CALL_CLOSE);
            return Ok(call);
        }

        call.push(PARAM);
        let mut depth = 0usize;

        loop {
            let token = self.cursor.next_token("function call")?;
            match token.kind {
                TokenKind::Punct(Punct::LParen | Punct::LBracket | Punct::LBrace) => depth += 1,
                TokenKind::Punct(Punct::RParen) if depth == 0 => break,
                TokenKind::Punct(Punct::RParen | Punct::RBracket | Punct::RBrace) => {
                    depth = depth.saturating_sub(1)
                }
                TokenKind::Punct(Punct::Comma) if depth == 0 => {
                    call.push(ARG_SEPARATOR);
                    call.push(PARAM);
                }
                _ => {}
            }
        }

        call.push(CALL_CLOSE);
        Ok(call)
    }
}
