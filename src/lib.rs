//! # Introduction
//!
//! cshape reduces C source files to *shape strings*: a compact rendering of
//! each file's statement structure with every name and literal erased. Two
//! files that differ only in identifier names, literal values, comments or
//! layout produce the same shape, which makes shapes a cheap first filter for
//! structural similarity.
//!
//! ## Extraction pipeline
//!
//! ```text
//! File → Preprocessor → Literal scrubber → Formatter → Lexer → Normalizer → Shape
//! ```
//!
//! 1. [`preprocess`]: strips comments (in-process or through an external C
//!    preprocessor), blanks literal contents and spaces out punctuation.
//! 2. [`parser`]: tokenizes the formatted text and walks it once, emitting
//!    the canonical symbols into a [`Shape`].
//! 3. [`extractor`]: the run-scoped [`ShapeExtractor`] that carries the
//!    [`ClassificationTables`] from one file to the next.
//! 4. [`config`]: TOML configuration for the above.
//!
//! ## Example
//!
//! ```
//! use cshape::ShapeExtractor;
//!
//! let mut extractor = ShapeExtractor::default();
//! let shape = extractor.extract_source("if (x > 0) { return x; }").unwrap();
//! assert_eq!(shape.pattern, "_c_(_v_>_v_)_r__v_;");
//! ```

pub mod config;
pub mod errors;
pub mod extractor;
pub mod parser;
pub mod preprocess;

pub use config::{ExtractorConfig, FunctionDiscovery, PreprocessorConfig};
pub use errors::{Diagnostic, ExtractError, NormalizeError, PreprocessError};
pub use extractor::ShapeExtractor;
pub use parser::{ClassificationTables, Shape, TableSnapshot};
