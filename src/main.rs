// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! kfc - packaged pipeline operators
//!
//! Invoke operators, inspect the package and compile pipeline definitions.

use clap::Parser;
use miette::Result;

use kf_components::cli::{Cli, Commands};
use kf_components::utils::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("kf_components=info");

    let cli = Cli::parse();

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    // Dispatch to command handlers
    match cli.command {
        Commands::Run { operator, values } => {
            kf_components::cli::run::run(operator, values, cli.verbose).await
        }
        Commands::Compile {
            pipeline,
            format,
            output,
        } => kf_components::cli::compile::run(pipeline, format, output, cli.verbose).await,
        Commands::Validate { pipeline } => {
            kf_components::cli::validate::run(pipeline, cli.verbose).await
        }
        Commands::Graph { pipeline, format } => {
            kf_components::cli::graph::run(pipeline, format, cli.verbose).await
        }
        Commands::Operators => kf_components::cli::operators::run(cli.verbose).await,
        Commands::Describe { operator, output } => {
            kf_components::cli::describe::run(operator, output, cli.verbose).await
        }
        Commands::Package { descriptor } => {
            kf_components::cli::package::run(descriptor, cli.verbose).await
        }
    }
}
