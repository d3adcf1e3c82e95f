// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! Describe command - print an operator definition

use miette::Result;
use std::path::PathBuf;

use super::emit;
use crate::operator::OperatorRegistry;

/// Run the describe command
pub async fn run(operator: String, output: Option<PathBuf>, _verbose: bool) -> Result<()> {
    let registry = OperatorRegistry::builtin()?;
    let yaml = registry.resolve(&operator)?.spec().to_yaml()?;
    emit(&yaml, output.as_deref())
}
