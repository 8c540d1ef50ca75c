// cshape: structural shape strings for C source files

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use cshape::{ExtractorConfig, FunctionDiscovery, PreprocessorConfig, ShapeExtractor};

#[derive(Parser)]
#[command(name = "cshape", version)]
#[command(about = "Print name-erasing structural shapes of C source files")]
struct Cli {
    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Learn every function declared in a file before emitting its shape
    #[arg(long)]
    two_pass: bool,

    /// Forget names learned in one file before processing the next
    #[arg(long)]
    isolate: bool,

    /// External preprocessor; the file path is appended to its arguments
    #[arg(long, value_name = "PROGRAM")]
    cpp: Option<String>,

    /// Argument for the external preprocessor (repeatable)
    #[arg(long = "cpp-arg", value_name = "ARG", allow_hyphen_values = true)]
    cpp_args: Vec<String>,

    /// C source files, processed in order
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match ExtractorConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                return ExitCode::from(2);
            }
        },
        None => ExtractorConfig::default(),
    };

    if cli.two_pass {
        config.function_discovery = FunctionDiscovery::TwoPass;
    }
    if cli.isolate {
        config.isolate_files = true;
    }
    if let Some(program) = cli.cpp {
        config.preprocessor = PreprocessorConfig::Command {
            program,
            args: cli.cpp_args,
        };
    }

    let mut extractor = ShapeExtractor::new(config);
    let mut failed = false;

    for (path, result) in extractor.extract_files(&cli.files) {
        match result {
            Ok(shape) => println!("{}\t{}", path.display(), shape.pattern),
            Err(e) => {
                error!("{}: {}", path.display(), e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
