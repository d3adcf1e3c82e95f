// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! Validate command - check a pipeline definition

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use super::load_pipeline;
use crate::operator::OperatorRegistry;
use crate::utils::{print_error, print_section, print_success};

/// Run the validate command
pub async fn run(pipeline_path: Option<PathBuf>, verbose: bool) -> Result<()> {
    println!("{}", "Validating pipeline...".bold());
    println!();

    let registry = OperatorRegistry::builtin()?;

    let graph = match load_pipeline(pipeline_path.as_deref(), &registry) {
        Ok(graph) => graph,
        Err(e) => {
            print_error("Pipeline definition is invalid");
            println!();
            return Err(e);
        }
    };

    match &pipeline_path {
        Some(path) => print_success(&format!("Loaded {}", path.display())),
        None => print_success("Using the built-in demo pipeline"),
    }
    print_success(&format!("{} node(s) resolve to registered operators", graph.nodes().len()));

    if verbose {
        print_section("Pipeline summary");
        println!("  Name: {}", graph.name());
        if let Some(description) = graph.description() {
            println!("  Description: {}", description);
        }
        println!("  Nodes: {}", graph.nodes().len());
        for node in graph.nodes() {
            let args: Vec<String> = node
                .default_arguments()
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            let after = if node.after().is_empty() {
                String::new()
            } else {
                format!(" [after: {}]", node.after().join(", "))
            };
            println!(
                "    - {} ({}) {}{}",
                node.name(),
                node.operator(),
                args.join(", "),
                after.dimmed()
            );
        }
    }

    println!();
    println!("{}", "Pipeline is valid!".green().bold());
    Ok(())
}
