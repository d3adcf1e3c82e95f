// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! Run command - invoke an operator directly, bypassing any pipeline

use colored::Colorize;
use miette::Result;

use crate::operator::{Arguments, OperatorRegistry};

/// Run the run command
pub async fn run(operator: String, values: Vec<String>, verbose: bool) -> Result<()> {
    let registry = OperatorRegistry::builtin()?;
    let operation = registry.resolve(&operator)?;

    let args = Arguments::from_positional(operation.spec(), values.as_slice())?;
    let result = operation.invoke(args)?;

    if verbose {
        eprintln!("{} {}({})", "Invoked".dimmed(), operator, values.join(", "));
    }

    println!("{}", result);
    Ok(())
}
