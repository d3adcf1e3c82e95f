// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! Compile command - emit the graph description of a pipeline

use miette::Result;
use std::path::PathBuf;

use super::{emit, load_pipeline, CompileFormat};
use crate::operator::OperatorRegistry;

/// Run the compile command
pub async fn run(
    pipeline_path: Option<PathBuf>,
    format: CompileFormat,
    output: Option<PathBuf>,
    _verbose: bool,
) -> Result<()> {
    let registry = OperatorRegistry::builtin()?;
    let graph = load_pipeline(pipeline_path.as_deref(), &registry)?;

    let mut content = match format {
        CompileFormat::Yaml => graph.to_yaml()?,
        CompileFormat::Json => graph.to_json()?,
    };
    if !content.ends_with('\n') {
        content.push('\n');
    }

    emit(&content, output.as_deref())
}
