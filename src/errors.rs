//! Error types for shape extraction
//!
//! Three layers, from the outside in:
//!
//! - [`PreprocessError`]: the comment/macro stage could not produce text for a file.
//! - [`NormalizeError`]: the token stream ended or went out of balance mid-construct.
//! - [`ExtractError`]: what the [`crate::extractor::ShapeExtractor`] hands back per file.
//!
//! All three abort the current file only. Recoverable oddities are reported as
//! [`Diagnostic`]s next to the shape instead.

use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Failure of the comment-stripping / macro-expanding stage
#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to launch preprocessor `{program}`: {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    #[error("preprocessor `{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("preprocessor produced no output for {path}")]
    EmptyOutput { path: PathBuf },
}

/// Malformed input detected while normalizing the token stream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The cursor ran out of tokens inside an unfinished construct
    #[error("unexpected end of input inside {construct}")]
    UnexpectedEndOfInput { construct: &'static str },

    /// A construct required a specific token and found another
    #[error("expected {expected} at line {line}, found `{found}`")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        line: usize,
    },

    /// A parenthesised header hit `;` before its parentheses closed
    #[error("unbalanced parentheses in {construct} header at line {line}")]
    UnbalancedHeader { construct: &'static str, line: usize },
}

/// Everything that can stop a single file from producing a shape
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Recoverable condition noticed during normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A declared name followed by something other than `,` `=` `[` `(` `;`
    UnrecognizedDeclarationShape {
        name: String,
        found: String,
        line: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnrecognizedDeclarationShape { name, found, line } => {
                write!(
                    f,
                    "unrecognized declaration of '{}' at line {}: followed by `{}`",
                    name, line, found
                )
            }
        }
    }
}
