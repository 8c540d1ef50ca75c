//! Extractor configuration
//!
//! Loaded from TOML; every key is optional.
//!
//! ```toml
//! function_discovery = "two-pass"
//! isolate_files = true
//! extra_data_types = ["u8", "u32"]
//! extra_functions = ["my_alloc"]
//! extra_ignorable = ["__restrict"]
//!
//! [preprocessor.command]
//! program = "gcc"
//! args = ["-fpreprocessed", "-dD", "-E", "-P"]
//! ```

use crate::errors::ExtractError;
use crate::parser::tables::ClassificationTables;
use crate::preprocess::{BuiltinPreprocessor, CommandPreprocessor, Preprocessor};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Which stage produces comment-free text from a file
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreprocessorConfig {
    #[default]
    Builtin,
    Command {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

/// When a function name becomes callable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FunctionDiscovery {
    /// Only calls after the declaration are recognized
    #[default]
    OnePass,
    /// The whole file is scanned for declarations first
    TwoPass,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    pub preprocessor: PreprocessorConfig,
    pub function_discovery: FunctionDiscovery,
    /// Restore the tables after every file
    pub isolate_files: bool,
    pub extra_data_types: Vec<String>,
    pub extra_functions: Vec<String>,
    pub extra_ignorable: Vec<String>,
}

impl ExtractorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ExtractError> {
        toml::from_str(text).map_err(|e| ExtractError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, ExtractError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ExtractError::Config(format!("{}: {}", path.display(), e)))?;
        toml::from_str(&text)
            .map_err(|e| ExtractError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn build_preprocessor(&self) -> Box<dyn Preprocessor> {
        match &self.preprocessor {
            PreprocessorConfig::Builtin => Box::new(BuiltinPreprocessor),
            PreprocessorConfig::Command { program, args } => {
                Box::new(CommandPreprocessor::new(program.clone(), args.clone()))
            }
        }
    }

    /// Seed `tables` with the configured extra names.
    pub fn apply_to(&self, tables: &mut ClassificationTables) {
        for name in &self.extra_data_types {
            tables.learn_data_type(name);
        }
        for name in &self.extra_functions {
            tables.learn_function(name);
        }
        for word in &self.extra_ignorable {
            tables.add_ignorable(word);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        let config = ExtractorConfig::from_toml_str("").unwrap();
        assert_eq!(config, ExtractorConfig::default());
        assert_eq!(config.preprocessor, PreprocessorConfig::Builtin);
        assert_eq!(config.function_discovery, FunctionDiscovery::OnePass);
        assert!(!config.isolate_files);
    }

    #[test]
    fn test_full_config() {
        let config = ExtractorConfig::from_toml_str(
            r#"
            function_discovery = "two-pass"
            isolate_files = true
            extra_data_types = ["u8"]
            extra_functions = ["my_alloc"]
            extra_ignorable = ["__restrict"]

            [preprocessor.command]
            program = "cpp"
            args = ["-P"]
            "#,
        )
        .unwrap();

        assert_eq!(config.function_discovery, FunctionDiscovery::TwoPass);
        assert!(config.isolate_files);
        assert_eq!(
            config.preprocessor,
            PreprocessorConfig::Command {
                program: "cpp".to_string(),
                args: vec!["-P".to_string()],
            }
        );
    }

    #[test]
    fn test_builtin_preprocessor_by_name() {
        let config = ExtractorConfig::from_toml_str("preprocessor = \"builtin\"").unwrap();
        assert_eq!(config.preprocessor, PreprocessorConfig::Builtin);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = ExtractorConfig::from_toml_str("isolate = true").unwrap_err();
        assert!(matches!(err, ExtractError::Config(_)));
    }

    #[test]
    fn test_apply_to_tables() {
        let config = ExtractorConfig {
            extra_data_types: vec!["u8".to_string()],
            extra_functions: vec!["my_alloc".to_string()],
            extra_ignorable: vec!["__restrict".to_string()],
            ..Default::default()
        };
        let mut tables = ClassificationTables::new();
        config.apply_to(&mut tables);

        assert!(tables.is_data_type("u8"));
        assert!(tables.is_function("my_alloc"));
        assert!(tables.is_ignorable("__restrict"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "isolate_files = true").unwrap();

        let config = ExtractorConfig::from_file(file.path()).unwrap();
        assert!(config.isolate_files);

        let err = ExtractorConfig::from_file(Path::new("/no/such/cshape.toml")).unwrap_err();
        assert!(matches!(err, ExtractError::Config(_)));
    }
}
