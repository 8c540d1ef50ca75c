//! Control structure handling
//!
//! - Conditions: `if`, `else if`, `else`, `switch`, `case`, `default`
//! - Loops: `for`, `while`, `do`
//! - Jumps: `goto`
//!
//! Only headers are handled here. Bodies are ordinary tokens picked up by
//! the driver afterwards, so a `do { ... } while (c);` yields an opening
//! [`DO_LOOP`] and, later, an unrelated `while` loop symbol.
//!
//! # Grammar
//!
//! ```text
//! if_head     ::= ("if" | "else" "if") "(" header ")"   -> _c_( header )
//! else_head   ::= "else"                               -> _c_()
//! switch_head ::= "switch" "(" header ")"              -> (nothing)
//! case_label  ::= "case" tokens ":"                    -> _c_(_v_==_v_)
//! for_head    ::= "for" "(" init ";" cond ";" step ")" -> _l_( cond )
//! while_head  ::= "while" "(" header ")"               -> _l_( header )
//! ```
//!
//! All methods are implemented as `pub(crate)` methods on the [`Normalizer`] struct.

use crate::errors::NormalizeError;
use crate::parser::expressions::HeaderEnd;
use crate::parser::lexer::{Condition, Loop, Punct, TokenKind};
use crate::parser::parse::Normalizer;
use crate::parser::pattern::{CASE, CONDITION_OPEN, DEFAULT, DO_LOOP, ELSE, LOOP_OPEN};

impl<'t> Normalizer<'t> {
    /// Handle a condition keyword that has been consumed.
    pub(crate) fn parse_condition(&mut self, keyword: Condition) -> Result<(), NormalizeError> {
        match keyword {
            Condition::If => self.parse_if(),
            Condition::Else => {
                if self.cursor.peek_kind() == Some(&TokenKind::Condition(Condition::If)) {
                    self.cursor.advance();
                    self.parse_if()
                } else {
                    self.output.push(ELSE);
                    Ok(())
                }
            }
            Condition::Switch => {
                self.cursor
                    .expect_punct(Punct::LParen, "'(' after 'switch'", "switch")?;
                // the controlling expression has no shape of its own
                self.emit_closed_header("switch")?;
                Ok(())
            }
            Condition::Case => {
                self.output.push(CASE);
                loop {
                    let token = self.cursor.next_token("case label")?;
                    if token.is_punct(Punct::Colon) {
                        return Ok(());
                    }
                }
            }
            Condition::Default => {
                self.output.push(DEFAULT);
                self.cursor.match_punct(Punct::Colon);
                Ok(())
            }
        }
    }

    fn parse_if(&mut self) -> Result<(), NormalizeError> {
        self.cursor.expect_punct(Punct::LParen, "'(' after 'if'", "if")?;
        let header = self.emit_closed_header("if")?;

        self.output.push(CONDITION_OPEN);
        self.output.append(&header);
        Ok(())
    }

    /// Handle a loop keyword that has been consumed.
    pub(crate) fn parse_loop(&mut self, keyword: Loop) -> Result<(), NormalizeError> {
        match keyword {
            Loop::For => self.parse_for(),
            Loop::While => {
                self.cursor
                    .expect_punct(Punct::LParen, "'(' after 'while'", "while")?;
                let header = self.emit_closed_header("while")?;

                self.output.push(LOOP_OPEN);
                self.output.append(&header);
                Ok(())
            }
            Loop::Do => {
                self.output.push(DO_LOOP);
                Ok(())
            }
        }
    }

    /// Init clause dropped, condition clause emitted, step clause dropped.
    fn parse_for(&mut self) -> Result<(), NormalizeError> {
        self.cursor.expect_punct(Punct::LParen, "'(' after 'for'", "for")?;

        loop {
            let token = self.cursor.next_token("for header")?;
            if token.is_punct(Punct::Semicolon) {
                break;
            }
        }

        let line = self.cursor.line();
        let (condition, end) = self.emit_header("for")?;
        if end == HeaderEnd::Closed {
            return Err(NormalizeError::UnbalancedHeader {
                construct: "for",
                line,
            });
        }
        self.cursor
            .expect_punct(Punct::Semicolon, "';' after for condition", "for")?;

        self.output.push(LOOP_OPEN);
        self.output.append(&condition);
        self.output.push(")");

        self.emit_closed_header("for")?;
        Ok(())
    }

    /// `goto label;` carries no shape; everything through the `;` is dropped.
    pub(crate) fn parse_goto(&mut self) -> Result<(), NormalizeError> {
        loop {
            let token = self.cursor.next_token("goto")?;
            if token.is_punct(Punct::Semicolon) {
                return Ok(());
            }
        }
    }
}
