//! Text preparation ahead of tokenization
//!
//! - [`comments`]: built-in comment stripper
//! - [`literals`]: string/char literal scrubber
//! - [`format`]: punctuation spacing and line filtering
//!
//! The first stage is pluggable through [`Preprocessor`]: the built-in
//! stripper needs nothing from the host, [`CommandPreprocessor`] hands the
//! file to an external C preprocessor when macros must be expanded.

pub mod comments;
pub mod format;
pub mod literals;

use crate::errors::PreprocessError;
use log::debug;
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

/// Produces comment-free text for one source file
pub trait Preprocessor {
    fn preprocess(&self, path: &Path) -> Result<String, PreprocessError>;
}

/// Reads the file and strips comments in-process. Macros are left unexpanded
/// and directive lines are later dropped by the formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPreprocessor;

impl Preprocessor for BuiltinPreprocessor {
    fn preprocess(&self, path: &Path) -> Result<String, PreprocessError> {
        let source = fs::read_to_string(path).map_err(|source| PreprocessError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(comments::strip_comments(&source))
    }
}

/// Runs an external program with the file path appended to `args` and takes
/// its standard output as the preprocessed text.
#[derive(Debug, Clone)]
pub struct CommandPreprocessor {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandPreprocessor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `gcc -fpreprocessed -dD -E -P`: comments removed, no line markers.
    pub fn gcc() -> Self {
        Self::new(
            "gcc",
            ["-fpreprocessed", "-dD", "-E", "-P"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }
}

impl Preprocessor for CommandPreprocessor {
    fn preprocess(&self, path: &Path) -> Result<String, PreprocessError> {
        debug!("running {} {:?} {}", self.program, self.args, path.display());

        // `output` drains both pipes and reaps the child before returning
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| PreprocessError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(PreprocessError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        if text.trim().is_empty() {
            return Err(PreprocessError::EmptyOutput {
                path: path.to_path_buf(),
            });
        }

        Ok(text)
    }
}

/// Scrub literals and format comment-free text into token-ready lines.
pub fn prepare(text: &str) -> String {
    format::format_source(&literals::scrub_literals(text))
}
