// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! Error types
//!
//! Every failure while registering operators, defining pipelines or loading
//! package metadata is fatal and surfaced to the caller as a
//! [`ComponentError`]. Each variant carries a diagnostic code and, where it
//! helps, a hint on how to fix the problem.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for kf-components operations
pub type ComponentResult<T> = Result<T, ComponentError>;

/// Main error type for kf-components
#[derive(Error, Debug, Diagnostic)]
pub enum ComponentError {
    // ─────────────────────────────────────────────────────────────────────────
    // Registry Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Operator '{name}' is already registered")]
    #[diagnostic(
        code(kf_components::duplicate_name),
        help("Each operator must be registered under a unique name")
    )]
    DuplicateName { name: String },

    #[error("Unknown operator '{name}'")]
    #[diagnostic(
        code(kf_components::unknown_operator),
        help("Run 'kfc operators' to list the registered operators")
    )]
    UnknownOperator { name: String },

    #[error("Invalid {kind} name '{name}'")]
    #[diagnostic(
        code(kf_components::invalid_name),
        help("Names must start with a lowercase letter and contain only a-z, 0-9, '-' or '_'")
    )]
    InvalidName { kind: String, name: String },

    #[error("Operator '{declared}' cannot be registered under the name '{name}'")]
    #[diagnostic(
        code(kf_components::name_mismatch),
        help("Register the operator under the name its definition declares")
    )]
    NameMismatch { name: String, declared: String },

    #[error("Command '{command}' is not an entry point of package '{package}'")]
    #[diagnostic(code(kf_components::unknown_entry_point))]
    UnknownEntryPoint { package: String, command: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Argument Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Operator '{operator}' is missing a value for input '{input}'")]
    #[diagnostic(
        code(kf_components::missing_argument),
        help("Bind '{input}' explicitly, or declare a pipeline parameter named '{input}'")
    )]
    MissingArgument { operator: String, input: String },

    #[error("Operator '{operator}' has no input named '{argument}'")]
    #[diagnostic(code(kf_components::unknown_argument))]
    UnknownArgument { operator: String, argument: String },

    #[error("Input '{input}' of operator '{operator}' expects {expected}, got '{got}'")]
    #[diagnostic(code(kf_components::invalid_argument))]
    InvalidArgument {
        operator: String,
        input: String,
        expected: String,
        got: String,
    },

    #[error("Operator '{operator}' takes {expected} argument(s), got {got}")]
    #[diagnostic(code(kf_components::too_many_arguments))]
    TooManyArguments {
        operator: String,
        expected: usize,
        got: usize,
    },

    #[error("Operator '{operator}' failed: {message}")]
    #[diagnostic(code(kf_components::operation_failed))]
    OperationFailed { operator: String, message: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Pipeline Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Node '{node}' references unresolved operator '{operator}'")]
    #[diagnostic(
        code(kf_components::unresolved_operator),
        help("Register '{operator}' in the operator package before defining the pipeline")
    )]
    UnresolvedOperator { node: String, operator: String },

    #[error("Node '{node}' references unknown pipeline parameter '{parameter}'")]
    #[diagnostic(code(kf_components::unknown_parameter))]
    UnknownParameter { node: String, parameter: String },

    #[error("Node name '{node}' is used more than once")]
    #[diagnostic(code(kf_components::duplicate_node))]
    DuplicateNode { node: String },

    #[error("Node '{node}' runs after unknown node '{dependency}'")]
    #[diagnostic(
        code(kf_components::unknown_dependency),
        help("Check that '{dependency}' is defined in your pipeline")
    )]
    UnknownDependency { node: String, dependency: String },

    #[error("Circular dependency detected between nodes: {}", nodes.join(", "))]
    #[diagnostic(
        code(kf_components::circular_dependency),
        help("Review the 'after' lists of these nodes to remove the cycle")
    )]
    CircularDependency { nodes: Vec<String> },

    #[error("Invalid pipeline definition: {reason}")]
    #[diagnostic(code(kf_components::invalid_pipeline))]
    InvalidPipeline {
        reason: String,
        #[help]
        help: Option<String>,
    },

    #[error("Pipeline file not found: {path}")]
    #[diagnostic(
        code(kf_components::pipeline_not_found),
        help("Pass a pipeline file, or omit it to use the built-in demo pipeline")
    )]
    PipelineNotFound { path: PathBuf },

    // ─────────────────────────────────────────────────────────────────────────
    // File Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to read file '{path}': {error}")]
    #[diagnostic(code(kf_components::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("Failed to write file '{path}': {error}")]
    #[diagnostic(code(kf_components::file_write_error))]
    FileWriteError { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Format Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(kf_components::yaml_error))]
    Yaml { message: String },

    #[error("JSON error: {message}")]
    #[diagnostic(code(kf_components::json_error))]
    Json { message: String },

    #[error("TOML parsing error: {message}")]
    #[diagnostic(code(kf_components::toml_error))]
    Toml { message: String },

    #[error("Glob pattern error: {message}")]
    #[diagnostic(code(kf_components::glob_error))]
    GlobPattern { message: String },
}

impl From<serde_yaml::Error> for ComponentError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<serde_json::Error> for ComponentError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl From<toml::de::Error> for ComponentError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml { message: e.to_string() }
    }
}

impl From<glob::PatternError> for ComponentError {
    fn from(e: glob::PatternError) -> Self {
        Self::GlobPattern { message: e.to_string() }
    }
}

impl ComponentError {
    /// Create an invalid argument error for a raw command-line value
    pub fn invalid_argument(
        operator: &str,
        input: &str,
        expected: impl ToString,
        got: &str,
    ) -> Self {
        Self::InvalidArgument {
            operator: operator.to_string(),
            input: input.to_string(),
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }

    /// Read a file, mapping failures to [`ComponentError::FileReadError`]
    pub fn read_file(path: &std::path::Path) -> ComponentResult<String> {
        std::fs::read_to_string(path).map_err(|e| Self::FileReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_dependency_lists_nodes() {
        let err = ComponentError::CircularDependency {
            nodes: vec!["a".into(), "b".into()],
        };
        assert_eq!(err.to_string(), "Circular dependency detected between nodes: a, b");
    }

    #[test]
    fn test_yaml_error_conversion() {
        let err: ComponentError = serde_yaml::from_str::<Vec<String>>("{").unwrap_err().into();
        assert!(matches!(err, ComponentError::Yaml { .. }));
    }
}
