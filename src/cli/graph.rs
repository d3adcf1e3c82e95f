// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! Graph command - visualize a pipeline as a graph

use miette::Result;
use std::path::PathBuf;

use super::{load_pipeline, GraphFormat};
use crate::operator::OperatorRegistry;
use crate::pipeline::DagBuilder;

/// Run the graph command
pub async fn run(
    pipeline_path: Option<PathBuf>,
    format: GraphFormat,
    _verbose: bool,
) -> Result<()> {
    let registry = OperatorRegistry::builtin()?;
    let graph = load_pipeline(pipeline_path.as_deref(), &registry)?;

    let dag = DagBuilder::build(graph.nodes())?;

    let output = match format {
        GraphFormat::Text => dag.to_text(&graph)?,
        GraphFormat::Dot => dag.to_dot(),
        GraphFormat::Mermaid => dag.to_mermaid(),
    };

    print!("{}", output);

    Ok(())
}
