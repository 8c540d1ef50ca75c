//! Normalizer: the top-level scan loop
//!
//! This module provides the [`Normalizer`] struct, which owns the token
//! cursor and the output pattern for one file and borrows the run's
//! [`ClassificationTables`] mutably.
//!
//! # Architecture
//!
//! One forward pass, no backtracking. [`Normalizer::normalize`] reads a token,
//! classifies it and hands the cursor to the matching handler:
//! - `declarations`: data-type-prefixed declarations and typedefs
//! - `statements`: conditions, loops and `goto`
//! - `expressions`: free-standing statements, headers and function calls
//!
//! Handlers are split across files using `impl Normalizer` blocks, the same
//! way the handlers share the one cursor.

use crate::errors::{Diagnostic, NormalizeError};
use crate::parser::cursor::TokenCursor;
use crate::parser::lexer::{tokenize, Punct, Token, TokenKind};
use crate::parser::pattern::{Pattern, RETURN};
use crate::parser::tables::ClassificationTables;
use log::{trace, warn};

/// Shape string of one file plus the recoverable issues met on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub pattern: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Recursive descent normalizer over a forward-only token stream
pub struct Normalizer<'t> {
    pub(crate) cursor: TokenCursor,
    pub(crate) tables: &'t mut ClassificationTables,
    pub(crate) output: Pattern,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<'t> Normalizer<'t> {
    /// Tokenize formatted source (see [`crate::preprocess::prepare`]).
    pub fn new(formatted: &str, tables: &'t mut ClassificationTables) -> Self {
        let tokens = tokenize(formatted, tables);
        Self::from_tokens(tokens, tables)
    }

    pub fn from_tokens(tokens: Vec<Token>, tables: &'t mut ClassificationTables) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            tables,
            output: Pattern::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Run the driver loop until the cursor is exhausted.
    pub fn normalize(mut self) -> Result<Shape, NormalizeError> {
        while let Some(kind) = self.cursor.peek_kind().cloned() {
            trace!("dispatch `{}` at line {}", kind, self.cursor.line());

            match kind {
                TokenKind::Ignorable(_)
                | TokenKind::Punct(Punct::LBrace)
                | TokenKind::Punct(Punct::RBrace) => {
                    self.cursor.advance();
                    // stray terminator left behind by a dropped keyword
                    self.cursor.match_punct(Punct::Semicolon);
                }
                TokenKind::Word(word) if self.tables.is_data_type(&word) => {
                    self.cursor.advance();
                    self.parse_declaration(&word)?;
                }
                TokenKind::Condition(condition) => {
                    self.cursor.advance();
                    self.parse_condition(condition)?;
                }
                TokenKind::Loop(keyword) => {
                    self.cursor.advance();
                    self.parse_loop(keyword)?;
                }
                TokenKind::Typedef => {
                    self.cursor.advance();
                    self.parse_typedef()?;
                }
                TokenKind::Goto => {
                    self.cursor.advance();
                    self.parse_goto()?;
                }
                TokenKind::Return => {
                    self.cursor.advance();
                    self.output.push(RETURN);
                }
                TokenKind::Word(_)
                | TokenKind::Number(_)
                | TokenKind::Literal
                | TokenKind::Punct(_)
                | TokenKind::Operator(_) => {
                    let statement = self.emit_statement()?;
                    self.output.append(&statement);
                    // the `;` `,` or `:` that ended it
                    self.cursor.advance();
                }
            }
        }

        Ok(Shape {
            pattern: self.output.into_string(),
            diagnostics: self.diagnostics,
        })
    }

    /// Record a recoverable diagnostic.
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Skip the rest of a statement that could not be understood: through the
    /// next `;`, but never past a block boundary.
    pub(crate) fn recover_to_terminator(&mut self) {
        while let Some(token) = self.cursor.peek() {
            if token.is_punct(Punct::LBrace) || token.is_punct(Punct::RBrace) {
                break;
            }
            let done = token.is_punct(Punct::Semicolon);
            self.cursor.advance();
            if done {
                break;
            }
        }
    }
}

/// Normalize already formatted source text against `tables`.
pub fn normalize(formatted: &str, tables: &mut ClassificationTables) -> Result<Shape, NormalizeError> {
    Normalizer::new(formatted, tables).normalize()
}
