// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! Operators command - list registered operators

use colored::Colorize;
use miette::Result;

use crate::operator::OperatorRegistry;

/// Run the operators command
pub async fn run(verbose: bool) -> Result<()> {
    let registry = OperatorRegistry::builtin()?;

    for name in registry.names() {
        let operation = registry.resolve(name)?;
        let spec = operation.spec();

        let inputs: Vec<String> = spec
            .inputs
            .iter()
            .map(|i| format!("{}: {:?}", i.name, i.kind))
            .collect();
        let outputs: Vec<String> = spec.outputs.iter().map(|o| format!("{:?}", o.kind)).collect();

        println!(
            "{}({}) -> {}",
            name.bold(),
            inputs.join(", "),
            outputs.join(", ")
        );

        if verbose {
            if let Some(description) = &spec.description {
                println!("    {}", description.dimmed());
            }
            for resource in registry.resources(name)? {
                println!("    {} {}", "resource:".dimmed(), resource.display());
            }
        }
    }

    Ok(())
}
