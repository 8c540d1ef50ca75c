//! Run-scoped shape extraction
//!
//! [`ShapeExtractor`] owns everything one run shares between files: the
//! configuration, the preprocessor and the [`ClassificationTables`]. Files are
//! processed strictly in the order given, and function names or types learned
//! in one file stay known for the next unless `isolate_files` is set.
//!
//! A failing file never stops a batch; [`ShapeExtractor::extract_files`]
//! returns one result per path.

use crate::config::{ExtractorConfig, FunctionDiscovery};
use crate::errors::ExtractError;
use crate::parser::lexer::tokenize;
use crate::parser::parse::{Normalizer, Shape};
use crate::parser::tables::{ClassificationTables, TableSnapshot};
use crate::preprocess::{comments, prepare, Preprocessor};
use log::debug;
use std::path::{Path, PathBuf};

pub struct ShapeExtractor {
    config: ExtractorConfig,
    tables: ClassificationTables,
    /// Tables as seeded by the configuration, before any file was read
    baseline: TableSnapshot,
    preprocessor: Box<dyn Preprocessor>,
}

impl ShapeExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        let mut tables = ClassificationTables::new();
        config.apply_to(&mut tables);
        let baseline = tables.snapshot();
        let preprocessor = config.build_preprocessor();

        Self {
            config,
            tables,
            baseline,
            preprocessor,
        }
    }

    /// Replace the configured preprocessor.
    pub fn with_preprocessor(mut self, preprocessor: impl Preprocessor + 'static) -> Self {
        self.preprocessor = Box::new(preprocessor);
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn tables(&self) -> &ClassificationTables {
        &self.tables
    }

    pub fn tables_mut(&mut self) -> &mut ClassificationTables {
        &mut self.tables
    }

    /// Forget every name learned so far.
    pub fn reset(&mut self) {
        self.tables.restore(&self.baseline);
    }

    /// Extract the shape of in-memory source. Comments are stripped with the
    /// built-in stripper whatever preprocessor is configured.
    pub fn extract_source(&mut self, source: &str) -> Result<Shape, ExtractError> {
        let text = comments::strip_comments(source);
        self.extract_text(&text)
    }

    pub fn extract_file(&mut self, path: &Path) -> Result<Shape, ExtractError> {
        let text = self.preprocessor.preprocess(path)?;
        let shape = self.extract_text(&text)?;

        debug!(
            "{}: {} bytes of shape, {} diagnostics",
            path.display(),
            shape.pattern.len(),
            shape.diagnostics.len()
        );
        Ok(shape)
    }

    pub fn extract_files<P: AsRef<Path>>(
        &mut self,
        paths: &[P],
    ) -> Vec<(PathBuf, Result<Shape, ExtractError>)> {
        paths
            .iter()
            .map(|path| {
                let path = path.as_ref();
                (path.to_path_buf(), self.extract_file(path))
            })
            .collect()
    }

    fn extract_text(&mut self, text: &str) -> Result<Shape, ExtractError> {
        if !self.config.isolate_files {
            return self.normalize_text(text);
        }

        let snapshot = self.tables.snapshot();
        let result = self.normalize_text(text);
        self.tables.restore(&snapshot);
        result
    }

    fn normalize_text(&mut self, text: &str) -> Result<Shape, ExtractError> {
        let formatted = prepare(text);
        let tokens = tokenize(&formatted, &self.tables);

        if self.config.function_discovery == FunctionDiscovery::TwoPass {
            // discovery pass: only the learned names are kept
            Normalizer::from_tokens(tokens.clone(), &mut self.tables).normalize()?;
            debug!(
                "discovery pass: {} known functions, {} data types",
                self.tables.function_count(),
                self.tables.data_type_count()
            );
        }

        Ok(Normalizer::from_tokens(tokens, &mut self.tables).normalize()?)
    }
}

impl Default for ShapeExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}
