// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! CLI command definitions and handlers
//!
//! Defines the `kfc` command-line interface.

pub mod compile;
pub mod describe;
pub mod graph;
pub mod operators;
pub mod package;
pub mod run;
pub mod validate;

use clap::{Parser, Subcommand, ValueEnum};
use miette::Result;
use std::path::{Path, PathBuf};

use crate::operator::OperatorRegistry;
use crate::pipeline::{demo_pipeline, PipelineGraph, PipelineSpec};

/// Packaged pipeline operators
///
/// Invoke operators, inspect the package and compile pipeline definitions.
#[derive(Parser, Debug)]
#[clap(
    name = "kfc",
    version,
    about = "Packaged pipeline operators and pipeline definitions",
    long_about = None,
    after_help = "Examples:\n\
        kfc run multiply 4 5            Invoke an operator directly\n\
        kfc compile                     Compile the demo pipeline\n\
        kfc compile pipeline.yaml -f json\n\
        kfc graph pipeline.yaml -f dot  Show the node graph\n\
        kfc package                     Check entry points and bundled files\n\n\
        See 'kfc <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Invoke a registered operator directly
    Run {
        /// Operator name
        operator: String,

        /// Input values, in the operator's declared input order
        #[clap(allow_negative_numbers = true)]
        values: Vec<String>,
    },

    /// Compile a pipeline definition into a graph description
    Compile {
        /// Pipeline file (defaults to the built-in demo pipeline)
        #[clap(env = "KFC_PIPELINE")]
        pipeline: Option<PathBuf>,

        /// Output format
        #[clap(short, long, value_enum, default_value = "yaml")]
        format: CompileFormat,

        /// Output file (default: stdout)
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a pipeline definition
    Validate {
        /// Pipeline file (defaults to the built-in demo pipeline)
        #[clap(env = "KFC_PIPELINE")]
        pipeline: Option<PathBuf>,
    },

    /// Show a pipeline as a graph
    Graph {
        /// Pipeline file (defaults to the built-in demo pipeline)
        #[clap(env = "KFC_PIPELINE")]
        pipeline: Option<PathBuf>,

        /// Output format
        #[clap(short, long, value_enum, default_value = "text")]
        format: GraphFormat,
    },

    /// List registered operators
    Operators,

    /// Print an operator's definition as YAML
    Describe {
        /// Operator name
        operator: String,

        /// Output file (default: stdout)
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the package descriptor and check its entry points and resources
    Package {
        /// Package descriptor (defaults to the built-in descriptor)
        #[clap(short, long, env = "KFC_DESCRIPTOR")]
        descriptor: Option<PathBuf>,
    },
}

/// Output format for compiled pipelines
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompileFormat {
    Yaml,
    Json,
}

/// Graph output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    Text,
    Dot,
    Mermaid,
}

/// Define the pipeline in `path`, or the demo pipeline when no path is given
pub(crate) fn load_pipeline(
    path: Option<&Path>,
    registry: &OperatorRegistry,
) -> Result<PipelineGraph> {
    let graph = match path {
        Some(path) => PipelineSpec::from_file(path)?.define(registry)?,
        None => demo_pipeline(registry)?,
    };
    Ok(graph)
}

/// Write `content` to `output`, or print it
pub(crate) fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| crate::ComponentError::FileWriteError {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;
            tracing::info!(path = %path.display(), "Wrote output");
        }
        None => print!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_negative_value() {
        let cli = Cli::try_parse_from(["kfc", "run", "multiply", "-3", "2"]).unwrap();
        match cli.command {
            Commands::Run { operator, values } => {
                assert_eq!(operator, "multiply");
                assert_eq!(values, vec!["-3", "2"]);
            }
            other => panic!("Expected Run, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_compile_format() {
        let cli = Cli::try_parse_from(["kfc", "compile", "pipeline.yaml", "-f", "json"]).unwrap();
        match cli.command {
            Commands::Compile { pipeline, format, output } => {
                assert_eq!(pipeline, Some(PathBuf::from("pipeline.yaml")));
                assert_eq!(format, CompileFormat::Json);
                assert!(output.is_none());
            }
            other => panic!("Expected Compile, got {other:?}"),
        }
    }
}
