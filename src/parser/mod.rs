//! C token normalizer
//!
//! This module turns formatted C source into a shape string:
//! - [`lexer`]: Tokenization (formatted text → classified tokens)
//! - [`cursor`]: Forward-only token cursor with one token of lookahead
//! - [`tables`]: Data types, keywords and known function names
//! - [`pattern`]: The symbol alphabet and the output accumulator
//! - [`parse`]: The [`Normalizer`] driver loop
//!
//! The driver's handlers live in `declarations`, `statements` and
//! `expressions`, each contributing an `impl Normalizer` block.
//!
//! # What survives normalization
//!
//! - Identifiers and literals collapse to `_v_`; their names and values are gone
//! - Calls to known functions keep only their argument count
//! - Operators are copied verbatim, index expressions are dropped
//! - Conditions and loops keep their controlling expression
//! - Declarations without an initializer, `goto`, `break` and braces vanish
//!
//! # Parser Implementation
//!
//! Hand-written single pass over the token stream. No external parser
//! generator dependencies.

pub mod cursor;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod pattern;
mod statements;
pub mod tables;

pub use parse::{normalize, Normalizer, Shape};
pub use tables::{ClassificationTables, TableSnapshot};
