// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! multiply - command-line entry point for the `multiply` operator

use clap::Parser;
use miette::Result;

use kf_components::utils::init_tracing;
use kf_components::{OperatorRegistry, PackageDescriptor};

/// Multiply two numbers
#[derive(Parser, Debug)]
#[clap(name = "multiply", version, about = "Multiply two numbers", long_about = None)]
struct Args {
    /// First factor
    #[clap(allow_negative_numbers = true)]
    a: String,

    /// Second factor
    #[clap(allow_negative_numbers = true)]
    b: String,
}

fn main() -> Result<()> {
    init_tracing("kf_components=warn");

    let args = Args::parse();

    let registry = OperatorRegistry::builtin()?;
    let package = PackageDescriptor::builtin();
    package.validate(&registry)?;
    let product = package.invoke("multiply", &registry, &[args.a, args.b])?;

    println!("{}", product);
    Ok(())
}
